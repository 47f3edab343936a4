// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The simple key/value cache facade.

use std::{collections::HashMap, marker::PhantomData, time::Duration};

use keystash_backend::{Backend, Expiration, SaveOptions, Tags};
use tick::Clock;

use crate::{
    Error, Result, Ttl,
    builder::SimpleCacheBuilder,
    key,
    telemetry::{CacheActivity, CacheOperation, CacheTelemetry},
};

/// Type alias for cache names used in telemetry.
pub type CacheName = &'static str;

/// Tag attached to every entry written through a [`SimpleCache`].
///
/// [`SimpleCache::clear`] invalidates this tag, so entries written to the same
/// backend by other components survive a clear.
pub const NAMESPACE_TAG: &str = "keystash.simple_cache";

pub(crate) const DEFAULT_NAME: CacheName = "keystash";

/// A simple key/value cache over a tagged, expiring [`Backend`].
///
/// Keys are non-empty strings. Reads fall back to a caller-supplied default
/// when an entry is missing or expired. Writes use a fixed expiration computed
/// from a [`Ttl`] at write time; reads never extend it.
///
/// Read failures in the backend surface as errors. Write failures are logged as
/// warnings and reported as `false`, so a cache outage degrades into misses
/// instead of failing the caller.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use keystash::SimpleCache;
/// use keystash_memory::MemoryBackend;
/// use tick::Clock;
///
/// let clock = Clock::new_frozen();
/// let cache = SimpleCache::new(MemoryBackend::<i32>::new(clock.clone()), clock);
///
/// assert!(cache.set("answer", 42, Duration::from_secs(60))?);
/// assert_eq!(cache.get("answer", 0)?, 42);
/// assert_eq!(cache.get("question", 0)?, 0);
///
/// assert!(cache.delete("answer")?);
/// assert!(!cache.has("answer")?);
/// # Ok::<(), keystash::Error>(())
/// ```
#[derive(Debug)]
pub struct SimpleCache<V, B> {
    name: CacheName,
    backend: B,
    clock: Clock,
    telemetry: CacheTelemetry,
    _phantom: PhantomData<V>,
}

impl<V, B> SimpleCache<V, B> {
    /// Creates a cache over `backend` with default settings.
    #[must_use]
    pub fn new(backend: B, clock: Clock) -> Self {
        Self::builder(backend, clock).build()
    }

    /// Returns a builder for a cache over `backend`.
    ///
    /// # Examples
    ///
    /// ```
    /// use keystash::{SimpleCache, TelemetryConfig};
    /// use keystash_memory::MemoryBackend;
    /// use tick::Clock;
    ///
    /// let clock = Clock::new_frozen();
    /// let cache = SimpleCache::<String, _>::builder(MemoryBackend::<String>::new(clock.clone()), clock)
    ///     .name("sessions")
    ///     .telemetry(TelemetryConfig::new().with_logs())
    ///     .build();
    ///
    /// assert_eq!(cache.name(), "sessions");
    /// ```
    #[must_use]
    pub fn builder(backend: B, clock: Clock) -> SimpleCacheBuilder<V, B> {
        SimpleCacheBuilder::new(backend, clock)
    }

    pub(crate) fn from_parts(name: CacheName, backend: B, clock: Clock, telemetry: CacheTelemetry) -> Self {
        Self {
            name,
            backend,
            clock,
            telemetry,
            _phantom: PhantomData,
        }
    }

    /// Returns the name used to identify this cache in telemetry.
    #[must_use]
    pub fn name(&self) -> CacheName {
        self.name
    }

    /// Returns the clock used to resolve TTLs.
    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Returns the wrapped backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<V, B> SimpleCache<V, B>
where
    B: Backend<V>,
{
    /// Returns the value stored under `key`, or `default` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidArgument`](crate::ErrorKind::InvalidArgument) error
    /// if `key` is empty, and a [`CacheOperation`](crate::ErrorKind::CacheOperation)
    /// error if the backend fails to read.
    pub fn get(&self, key: &str, default: V) -> Result<V> {
        let key = self.check_key(CacheOperation::Get, key)?;
        let stopwatch = self.clock.stopwatch();

        match self.backend.load(key) {
            Ok(Some(value)) => {
                self.record(CacheOperation::Get, CacheActivity::Hit, stopwatch.elapsed());
                Ok(value)
            }
            Ok(None) => {
                self.record(CacheOperation::Get, CacheActivity::Miss, stopwatch.elapsed());
                Ok(default)
            }
            Err(e) => {
                self.record(CacheOperation::Get, CacheActivity::Error, stopwatch.elapsed());
                Err(Error::backend(e))
            }
        }
    }

    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// Returns `false` if the backend rejected the write.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidArgument`](crate::ErrorKind::InvalidArgument) error
    /// if `key` is empty, and a [`CacheOperation`](crate::ErrorKind::CacheOperation)
    /// error if `ttl` resolves to an unrepresentable deadline.
    pub fn set(&self, key: &str, value: V, ttl: impl Into<Ttl>) -> Result<bool> {
        let key = self.check_key(CacheOperation::Set, key)?;
        let expiration = self.resolve(CacheOperation::Set, ttl.into())?;
        Ok(self.store(CacheOperation::Set, key, value, expiration))
    }

    /// Removes the entry under `key`.
    ///
    /// Removing a missing key succeeds. Returns `false` if the backend rejected
    /// the removal.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidArgument`](crate::ErrorKind::InvalidArgument) error
    /// if `key` is empty.
    pub fn delete(&self, key: &str) -> Result<bool> {
        let key = self.check_key(CacheOperation::Delete, key)?;
        Ok(self.discard(CacheOperation::Delete, key))
    }

    /// Invalidates every entry this facade wrote to the backend.
    ///
    /// Other entries in a shared backend are left alone. Returns `false` if
    /// the backend failed.
    pub fn clear(&self) -> bool {
        let stopwatch = self.clock.stopwatch();
        let result = self.backend.invalidate_by_tags(&Tags::single(NAMESPACE_TAG));
        self.settle(CacheOperation::Clear, CacheActivity::Cleared, result, stopwatch.elapsed())
    }

    /// Returns the values stored under `keys`, with `default` for missing ones.
    ///
    /// The result holds every requested key exactly once.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidArgument`](crate::ErrorKind::InvalidArgument) error
    /// if any key is empty; the backend is not called in that case. Returns a
    /// [`CacheOperation`](crate::ErrorKind::CacheOperation) error if the backend
    /// fails to read.
    ///
    /// # Examples
    ///
    /// ```
    /// use keystash::{SimpleCache, Ttl};
    /// use keystash_memory::MemoryBackend;
    /// use tick::Clock;
    ///
    /// let clock = Clock::new_frozen();
    /// let cache = SimpleCache::new(MemoryBackend::<&str>::new(clock.clone()), clock);
    /// cache.set("k2", "stored", Ttl::None)?;
    ///
    /// let values = cache.get_multiple(["k1", "k2", "k3"], "default")?;
    /// assert_eq!(values.len(), 3);
    /// assert_eq!(values["k1"], "default");
    /// assert_eq!(values["k2"], "stored");
    /// assert_eq!(values["k3"], "default");
    /// # Ok::<(), keystash::Error>(())
    /// ```
    pub fn get_multiple<I, K>(&self, keys: I, default: V) -> Result<HashMap<String, V>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
        V: Clone,
    {
        let keys: Vec<K> = keys.into_iter().collect();
        let keys = keys
            .iter()
            .map(|k| self.check_key(CacheOperation::GetMultiple, k.as_ref()))
            .collect::<Result<Vec<&str>>>()?;

        let stopwatch = self.clock.stopwatch();
        let mut loaded = match self.backend.bulk_load(&keys) {
            Ok(loaded) => loaded,
            Err(e) => {
                self.record(CacheOperation::GetMultiple, CacheActivity::Error, stopwatch.elapsed());
                return Err(Error::backend(e));
            }
        };

        let mut missed = false;
        let mut values = HashMap::with_capacity(keys.len());
        for key in keys {
            if values.contains_key(key) {
                continue;
            }

            let value = loaded.remove(key).flatten().unwrap_or_else(|| {
                missed = true;
                default.clone()
            });
            values.insert(key.to_owned(), value);
        }

        let activity = if missed { CacheActivity::Miss } else { CacheActivity::Hit };
        self.record(CacheOperation::GetMultiple, activity, stopwatch.elapsed());
        Ok(values)
    }

    /// Stores each pair in iteration order with a shared `ttl`.
    ///
    /// Stops at the first write the backend rejects and returns `false`.
    /// Entries written before that point stay in the cache.
    ///
    /// # Errors
    ///
    /// Returns a [`CacheOperation`](crate::ErrorKind::CacheOperation) error if
    /// `ttl` is invalid, before anything is written. Returns an
    /// [`InvalidArgument`](crate::ErrorKind::InvalidArgument) error when an
    /// empty key is reached; earlier pairs are already written by then.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use keystash::SimpleCache;
    /// use keystash_memory::MemoryBackend;
    /// use tick::Clock;
    ///
    /// let clock = Clock::new_frozen();
    /// let cache = SimpleCache::new(MemoryBackend::<i32>::new(clock.clone()), clock);
    ///
    /// assert!(cache.set_multiple([("a", 1), ("b", 2)], Duration::from_secs(30))?);
    /// assert_eq!(cache.get("b", 0)?, 2);
    /// # Ok::<(), keystash::Error>(())
    /// ```
    pub fn set_multiple<I, K>(&self, values: I, ttl: impl Into<Ttl>) -> Result<bool>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
    {
        let expiration = self.resolve(CacheOperation::SetMultiple, ttl.into())?;

        for (key, value) in values {
            let key = self.check_key(CacheOperation::SetMultiple, key.as_ref())?;
            if !self.store(CacheOperation::SetMultiple, key, value, expiration) {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Removes each key in iteration order.
    ///
    /// Stops at the first removal the backend rejects and returns `false`.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidArgument`](crate::ErrorKind::InvalidArgument) error
    /// when an empty key is reached; earlier keys are already removed by then.
    pub fn delete_multiple<I, K>(&self, keys: I) -> Result<bool>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        for key in keys {
            let key = self.check_key(CacheOperation::DeleteMultiple, key.as_ref())?;
            if !self.discard(CacheOperation::DeleteMultiple, key) {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Returns `true` if a value is stored under `key`.
    ///
    /// This performs a full backend read.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidArgument`](crate::ErrorKind::InvalidArgument) error
    /// if `key` is empty, and a [`CacheOperation`](crate::ErrorKind::CacheOperation)
    /// error if the backend fails to read.
    pub fn has(&self, key: &str) -> Result<bool> {
        let key = self.check_key(CacheOperation::Has, key)?;
        let stopwatch = self.clock.stopwatch();

        match self.backend.load(key) {
            Ok(value) => {
                let activity = if value.is_some() { CacheActivity::Hit } else { CacheActivity::Miss };
                self.record(CacheOperation::Has, activity, stopwatch.elapsed());
                Ok(value.is_some())
            }
            Err(e) => {
                self.record(CacheOperation::Has, CacheActivity::Error, stopwatch.elapsed());
                Err(Error::backend(e))
            }
        }
    }

    fn store(&self, operation: CacheOperation, key: &str, value: V, expiration: Expiration) -> bool {
        let options = SaveOptions::new()
            .with_expiration(expiration)
            .sliding(false)
            .with_tag(NAMESPACE_TAG);

        let stopwatch = self.clock.stopwatch();
        let result = self.backend.save(key, value, &options);
        self.settle(operation, CacheActivity::Stored, result, stopwatch.elapsed())
    }

    fn discard(&self, operation: CacheOperation, key: &str) -> bool {
        let stopwatch = self.clock.stopwatch();
        let result = self.backend.remove(key);
        self.settle(operation, CacheActivity::Deleted, result, stopwatch.elapsed())
    }

    fn settle(
        &self,
        operation: CacheOperation,
        activity: CacheActivity,
        result: keystash_backend::Result<()>,
        duration: Duration,
    ) -> bool {
        match result {
            Ok(()) => {
                self.record(operation, activity, duration);
                true
            }
            Err(e) => {
                self.record(operation, CacheActivity::Error, duration);
                CacheTelemetry::report_failure(self.name, operation, &e);
                false
            }
        }
    }
}

impl<V, B> SimpleCache<V, B> {
    fn check_key<'k>(&self, operation: CacheOperation, key: &'k str) -> Result<&'k str> {
        key::validate(key).inspect_err(|_| self.record(operation, CacheActivity::Rejected, Duration::ZERO))
    }

    fn resolve(&self, operation: CacheOperation, ttl: Ttl) -> Result<Expiration> {
        ttl.expiration(self.clock.system_time())
            .inspect_err(|_| self.record(operation, CacheActivity::Rejected, Duration::ZERO))
    }

    fn record(&self, operation: CacheOperation, activity: CacheActivity, duration: Duration) {
        self.telemetry.record(self.name, operation, activity, duration);
    }
}
