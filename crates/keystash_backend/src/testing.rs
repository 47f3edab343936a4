// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Mock backend for testing.
//!
//! This module provides `MockBackend`, an in-memory backend that records all
//! operations and supports failure injection for testing error paths.

use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;
use tick::Clock;

use crate::{Backend, Error, SaveOptions, Tags};

/// Recorded backend operation with full context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendOp<V> {
    /// A load was performed for the given key.
    Load(String),
    /// A save was performed.
    Save {
        /// The key that was written.
        key: String,
        /// The value that was written.
        value: V,
        /// The options the value was written with.
        options: SaveOptions,
    },
    /// A remove was performed for the given key.
    Remove(String),
    /// A bulk load was performed for the given keys.
    BulkLoad(Vec<String>),
    /// A tag invalidation was performed.
    InvalidateByTags(Tags),
}

type FailPredicate<V> = Box<dyn Fn(&BackendOp<V>) -> bool + Send + Sync>;

/// A configurable mock backend for testing.
///
/// Values are kept in memory together with the options they were saved with,
/// so tag invalidation behaves like a real store. Operations can be made to
/// fail on demand and every call is recorded for later verification.
///
/// Clones share storage, recorded operations and failure predicates.
///
/// # Examples
///
/// ```
/// use keystash_backend::{Backend, SaveOptions, testing::{BackendOp, MockBackend}};
///
/// let backend = MockBackend::<i32>::new();
/// backend.save("key", 42, &SaveOptions::new()).unwrap();
/// assert_eq!(backend.load("key").unwrap(), Some(42));
///
/// assert_eq!(backend.operations(), vec![
///     BackendOp::Save { key: "key".to_string(), value: 42, options: SaveOptions::new() },
///     BackendOp::Load("key".to_string()),
/// ]);
/// ```
///
/// # Failure Injection
///
/// ```
/// use keystash_backend::{Backend, SaveOptions, testing::{BackendOp, MockBackend}};
///
/// let backend = MockBackend::<i32>::new();
/// backend.fail_when(|op| matches!(op, BackendOp::Save { key, .. } if key == "forbidden"));
///
/// assert!(backend.save("forbidden", 1, &SaveOptions::new()).is_err());
/// assert!(backend.save("allowed", 1, &SaveOptions::new()).is_ok());
/// ```
pub struct MockBackend<V> {
    data: Arc<Mutex<HashMap<String, (V, SaveOptions)>>>,
    operations: Arc<Mutex<Vec<BackendOp<V>>>>,
    fail_when: Arc<Mutex<Option<FailPredicate<V>>>>,
    clock: Option<Clock>,
}

impl<V> std::fmt::Debug for MockBackend<V>
where
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockBackend")
            .field("data", &self.data)
            .field("operations", &self.operations)
            .field("fail_when", &self.fail_when.lock().is_some())
            .field("clock", &self.clock)
            .finish()
    }
}

impl<V> Clone for MockBackend<V> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            operations: Arc::clone(&self.operations),
            fail_when: Arc::clone(&self.fail_when),
            clock: self.clock.clone(),
        }
    }
}

impl<V> Default for MockBackend<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MockBackend<V> {
    /// Creates a new empty mock backend that never expires entries.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(HashMap::new())),
            operations: Arc::new(Mutex::new(Vec::new())),
            fail_when: Arc::new(Mutex::new(None)),
            clock: None,
        }
    }

    /// Creates a mock backend that reports entries as absent once their
    /// expiration has passed according to `clock`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use keystash_backend::{Backend, Expiration, SaveOptions, testing::MockBackend};
    /// use tick::ClockControl;
    ///
    /// let control = ClockControl::new();
    /// let clock = control.to_clock();
    /// let backend = MockBackend::<i32>::with_clock(clock.clone());
    ///
    /// let at = clock.system_time() + Duration::from_secs(5);
    /// backend.save("key", 1, &SaveOptions::new().with_expiration(Expiration::At(at))).unwrap();
    /// assert_eq!(backend.load("key").unwrap(), Some(1));
    ///
    /// control.advance(Duration::from_secs(5));
    /// assert_eq!(backend.load("key").unwrap(), None);
    /// ```
    #[must_use]
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            clock: Some(clock),
            ..Self::new()
        }
    }

    /// Returns the number of stored entries, expired ones included.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.data.lock().len()
    }

    /// Returns true if an entry is stored under `key`, expired or not.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.lock().contains_key(key)
    }

    /// Returns the options the entry under `key` was saved with.
    #[must_use]
    pub fn options_for(&self, key: &str) -> Option<SaveOptions> {
        self.data.lock().get(key).map(|(_, options)| options.clone())
    }
}

impl<V> MockBackend<V>
where
    V: Clone,
{
    /// Sets a predicate that determines when operations should fail.
    ///
    /// The predicate receives the operation and returns `true` if it should
    /// fail. Failed operations are still recorded but leave the data untouched.
    pub fn fail_when<F>(&self, predicate: F)
    where
        F: Fn(&BackendOp<V>) -> bool + Send + Sync + 'static,
    {
        *self.fail_when.lock() = Some(Box::new(predicate));
    }

    /// Clears the failure predicate, allowing all operations to succeed.
    pub fn clear_failures(&self) {
        *self.fail_when.lock() = None;
    }

    /// Returns a clone of all recorded operations.
    #[must_use]
    pub fn operations(&self) -> Vec<BackendOp<V>> {
        self.operations.lock().clone()
    }

    /// Clears all recorded operations.
    pub fn clear_operations(&self) {
        self.operations.lock().clear();
    }

    /// Records `op` and reports whether it should fail.
    fn record(&self, op: BackendOp<V>) -> bool {
        let fail = self.fail_when.lock().as_ref().is_some_and(|predicate| predicate(&op));
        self.operations.lock().push(op);
        fail
    }

    fn read(&self, key: &str) -> Option<V> {
        let data = self.data.lock();
        let (value, options) = data.get(key)?;
        match &self.clock {
            Some(clock) if options.expiration().is_expired_at(clock.system_time()) => None,
            _ => Some(value.clone()),
        }
    }
}

impl<V> Backend<V> for MockBackend<V>
where
    V: Clone + Send + Sync,
{
    fn load(&self, key: &str) -> Result<Option<V>, Error> {
        if self.record(BackendOp::Load(key.to_owned())) {
            return Err(Error::from_message("mock: load failed"));
        }
        Ok(self.read(key))
    }

    fn save(&self, key: &str, value: V, options: &SaveOptions) -> Result<(), Error> {
        let op = BackendOp::Save {
            key: key.to_owned(),
            value: value.clone(),
            options: options.clone(),
        };
        if self.record(op) {
            return Err(Error::from_message("mock: save failed"));
        }
        self.data.lock().insert(key.to_owned(), (value, options.clone()));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        if self.record(BackendOp::Remove(key.to_owned())) {
            return Err(Error::from_message("mock: remove failed"));
        }
        self.data.lock().remove(key);
        Ok(())
    }

    fn bulk_load(&self, keys: &[&str]) -> Result<HashMap<String, Option<V>>, Error> {
        let op = BackendOp::BulkLoad(keys.iter().map(|key| (*key).to_owned()).collect());
        if self.record(op) {
            return Err(Error::from_message("mock: bulk load failed"));
        }
        Ok(keys.iter().map(|key| ((*key).to_owned(), self.read(key))).collect())
    }

    fn invalidate_by_tags(&self, tags: &Tags) -> Result<(), Error> {
        if self.record(BackendOp::InvalidateByTags(tags.clone())) {
            return Err(Error::from_message("mock: invalidate by tags failed"));
        }
        self.data.lock().retain(|_, (_, options)| !options.tags().intersects(tags));
        Ok(())
    }
}
