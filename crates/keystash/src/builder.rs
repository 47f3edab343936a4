// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Builder for [`SimpleCache`].

use std::marker::PhantomData;

use tick::Clock;

use crate::{
    SimpleCache, TelemetryConfig,
    cache::{CacheName, DEFAULT_NAME},
};

/// Builder for constructing a [`SimpleCache`].
///
/// Created by calling [`SimpleCache::builder`].
#[derive(Debug)]
pub struct SimpleCacheBuilder<V, B> {
    name: Option<CacheName>,
    backend: B,
    clock: Clock,
    telemetry: Option<TelemetryConfig>,
    _phantom: PhantomData<V>,
}

impl<V, B> SimpleCacheBuilder<V, B> {
    pub(crate) fn new(backend: B, clock: Clock) -> Self {
        Self {
            name: None,
            backend,
            clock,
            telemetry: None,
            _phantom: PhantomData,
        }
    }

    /// Sets the name reported in logs and metrics. Defaults to `"keystash"`.
    #[must_use]
    pub fn name(mut self, name: CacheName) -> Self {
        self.name = Some(name);
        self
    }

    /// Sets the telemetry configuration. Telemetry is off by default.
    #[must_use]
    pub fn telemetry(mut self, config: TelemetryConfig) -> Self {
        self.telemetry = Some(config);
        self
    }

    /// Builds the cache.
    #[must_use]
    pub fn build(self) -> SimpleCache<V, B> {
        let telemetry = self.telemetry.unwrap_or_default().build();
        SimpleCache::from_parts(self.name.unwrap_or(DEFAULT_NAME), self.backend, self.clock, telemetry)
    }
}
