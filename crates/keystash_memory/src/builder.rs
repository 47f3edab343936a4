// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Builder for configuring in-memory backends.
//!
//! This module provides a builder API for `MemoryBackend` that abstracts
//! the underlying moka configuration.

use std::marker::PhantomData;

use tick::Clock;

use crate::backend::MemoryBackend;

/// Builder for configuring a `MemoryBackend`.
///
/// # Examples
///
/// ```
/// use keystash_memory::MemoryBackend;
/// use tick::Clock;
///
/// let backend = MemoryBackend::<String>::builder(Clock::new_frozen())
///     .max_capacity(1000)
///     .initial_capacity(100)
///     .name("sessions")
///     .build();
/// ```
#[derive(Debug)]
pub struct MemoryBackendBuilder<V> {
    pub(crate) clock: Clock,
    pub(crate) max_capacity: Option<u64>,
    pub(crate) initial_capacity: Option<usize>,
    pub(crate) name: Option<String>,
    _phantom: PhantomData<V>,
}

impl<V> MemoryBackendBuilder<V> {
    /// Creates a new builder for an unbounded backend.
    ///
    /// `clock` decides when entries expire.
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            max_capacity: None,
            initial_capacity: None,
            name: None,
            _phantom: PhantomData,
        }
    }

    /// Sets the maximum number of entries.
    ///
    /// Once the capacity is reached, moka evicts entries using `TinyLFU`.
    /// Evicted entries read as absent, exactly like expired ones.
    #[must_use]
    pub fn max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = Some(capacity);
        self
    }

    /// Sets the initial capacity (pre-allocation hint).
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = Some(capacity);
        self
    }

    /// Sets a name that may appear in moka's logs and debug output.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builds the configured `MemoryBackend`.
    #[must_use]
    pub fn build(self) -> MemoryBackend<V>
    where
        V: Clone + Send + Sync + 'static,
    {
        MemoryBackend::from_builder(self)
    }
}
