// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! In-memory backend implementation using moka.

use std::{
    sync::Arc,
    time::{Duration, SystemTime},
};

use keystash_backend::{Backend, Error, Expiration, SaveOptions, Tags};
use moka::{ops::compute::Op, sync::Cache};
use tick::Clock;

use crate::builder::MemoryBackendBuilder;

#[derive(Clone, Debug)]
struct StoredEntry<V> {
    value: V,
    tags: Arc<Tags>,
    expiration: Expiration,
    // Set only for sliding entries with a deadline.
    window: Option<Duration>,
}

impl<V> StoredEntry<V> {
    fn new(value: V, options: &SaveOptions, now: SystemTime) -> Self {
        let expiration = options.expiration();
        let window = match expiration {
            Expiration::At(at) if options.is_sliding() => Some(at.duration_since(now).unwrap_or_default()),
            _ => None,
        };

        Self {
            value,
            tags: Arc::new(options.tags().clone()),
            expiration,
            window,
        }
    }
}

/// An in-memory backend backed by moka.
///
/// This backend provides:
/// - Absolute expiration checked against the configured clock on every read
/// - Sliding expiration that restarts the entry's window on each successful read
/// - Group invalidation by tag
/// - Capacity-bounded storage with moka's eviction
///
/// Clones share the same storage.
///
/// # Examples
///
/// ```
/// use keystash_backend::{Backend, SaveOptions};
/// use keystash_memory::MemoryBackend;
/// use tick::Clock;
///
/// let backend = MemoryBackend::<i32>::new(Clock::new_frozen());
///
/// backend.save("key", 42, &SaveOptions::new())?;
/// assert_eq!(backend.load("key")?, Some(42));
/// # Ok::<(), keystash_backend::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct MemoryBackend<V>
where
    V: Clone + Send + Sync + 'static,
{
    inner: Cache<String, StoredEntry<V>>,
    clock: Clock,
}

impl<V> MemoryBackend<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Creates a new unbounded in-memory backend.
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self::builder(clock).build()
    }

    /// Creates a new builder for configuring an in-memory backend.
    #[must_use]
    pub fn builder(clock: Clock) -> MemoryBackendBuilder<V> {
        MemoryBackendBuilder::new(clock)
    }

    pub(crate) fn from_builder(builder: MemoryBackendBuilder<V>) -> Self {
        let mut moka_builder = Cache::builder().support_invalidation_closures();

        if let Some(capacity) = builder.max_capacity {
            moka_builder = moka_builder.max_capacity(capacity);
        }

        if let Some(capacity) = builder.initial_capacity {
            moka_builder = moka_builder.initial_capacity(capacity);
        }

        if let Some(name) = builder.name.as_deref() {
            moka_builder = moka_builder.name(name);
        }

        Self {
            inner: moka_builder.build(),
            clock: builder.clock,
        }
    }

    /// Returns the number of live entries.
    ///
    /// Flushes moka's pending maintenance first so the count reflects recent
    /// writes and invalidations. Expired entries that have not been read
    /// since their deadline are still counted.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }

    /// Returns the clock used to evaluate expiration.
    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }
}

impl<V> Backend<V> for MemoryBackend<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn load(&self, key: &str) -> Result<Option<V>, Error> {
        let Some(entry) = self.inner.get(key) else {
            return Ok(None);
        };

        let now = self.clock.system_time();
        if entry.window.is_none() && !entry.expiration.is_expired_at(now) {
            return Ok(Some(entry.value));
        }

        // Expired and sliding entries are rewritten. The decision is taken again
        // under the per-key compute so a concurrent write is never overwritten.
        let mut loaded = None;
        self.inner.entry_by_ref(key).and_compute_with(|current| {
            let Some(current) = current else {
                return Op::Nop;
            };

            let mut entry = current.into_value();
            if entry.expiration.is_expired_at(now) {
                return Op::Remove;
            }

            let rearmed = entry.window.and_then(|window| now.checked_add(window));
            loaded = Some(entry.value.clone());
            match rearmed {
                Some(at) => {
                    entry.expiration = Expiration::At(at);
                    Op::Put(entry)
                }
                None => Op::Nop,
            }
        });

        Ok(loaded)
    }

    fn save(&self, key: &str, value: V, options: &SaveOptions) -> Result<(), Error> {
        let entry = StoredEntry::new(value, options, self.clock.system_time());
        self.inner.entry_by_ref(key).and_compute_with(|_| Op::Put(entry));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.inner.entry_by_ref(key).and_compute_with(|_| Op::Remove);
        Ok(())
    }

    fn invalidate_by_tags(&self, tags: &Tags) -> Result<(), Error> {
        if tags.is_empty() {
            return Ok(());
        }

        let tags = tags.clone();
        self.inner
            .invalidate_entries_if(move |_, entry| entry.tags.intersects(&tags))
            .map(|_| ())
            .map_err(Error::from_message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tick::ClockControl;

    fn expiring_in(clock: &Clock, secs: u64) -> SaveOptions {
        SaveOptions::new().with_expiration(clock.system_time() + Duration::from_secs(secs))
    }

    #[test]
    fn stored_entry_without_sliding_has_no_window() {
        let now = SystemTime::UNIX_EPOCH;
        let options = SaveOptions::new().with_expiration(now + Duration::from_secs(5));
        let entry = StoredEntry::new(1, &options, now);
        assert!(entry.window.is_none());
    }

    #[test]
    fn stored_entry_sliding_window_is_time_until_deadline() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(100);
        let options = SaveOptions::new()
            .with_expiration(now + Duration::from_secs(30))
            .sliding(true);
        let entry = StoredEntry::new(1, &options, now);
        assert_eq!(entry.window, Some(Duration::from_secs(30)));
    }

    #[test]
    fn stored_entry_sliding_without_deadline_never_slides() {
        let options = SaveOptions::new().sliding(true);
        let entry = StoredEntry::new(1, &options, SystemTime::UNIX_EPOCH);
        assert!(entry.window.is_none());
    }

    #[test]
    fn expired_entry_is_removed_on_read() {
        let control = ClockControl::new();
        let backend = MemoryBackend::<i32>::new(control.to_clock());
        backend.save("key", 1, &expiring_in(backend.clock(), 1)).unwrap();

        control.advance(Duration::from_secs(1));

        assert_eq!(backend.load("key").unwrap(), None);
        assert_eq!(backend.entry_count(), 0);
    }

    #[test]
    fn sliding_read_extends_deadline() {
        let control = ClockControl::new();
        let backend = MemoryBackend::<i32>::new(control.to_clock());
        backend
            .save("key", 1, &expiring_in(backend.clock(), 10).sliding(true))
            .unwrap();

        control.advance(Duration::from_secs(8));
        assert_eq!(backend.load("key").unwrap(), Some(1));

        control.advance(Duration::from_secs(8));
        assert_eq!(backend.load("key").unwrap(), Some(1));

        control.advance(Duration::from_secs(10));
        assert_eq!(backend.load("key").unwrap(), None);
    }
}
