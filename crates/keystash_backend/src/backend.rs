// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The core trait for storage backends.

use std::{collections::HashMap, sync::Arc};

use crate::{Error, SaveOptions, Tags};

/// A tagged, expiring key-value store.
///
/// `load` reports a missing or expired entry as `Ok(None)`, the absent
/// sentinel; `Err` is reserved for the store itself failing. Implementations
/// provide their own concurrency guarantees; callers add none.
///
/// Required methods: `load`, `save`, `remove`, `invalidate_by_tags`.
/// `bulk_load` defaults to one `load` per key, stopping at the first failure.
pub trait Backend<V>: Send + Sync {
    /// Reads the value stored under `key`.
    fn load(&self, key: &str) -> Result<Option<V>, Error>;

    /// Stores `value` under `key`, replacing any previous entry and its tags.
    fn save(&self, key: &str, value: V, options: &SaveOptions) -> Result<(), Error>;

    /// Removes the entry under `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), Error>;

    /// Reads several keys at once.
    ///
    /// The returned map has one entry per distinct requested key, `None` for
    /// absent ones.
    fn bulk_load(&self, keys: &[&str]) -> Result<HashMap<String, Option<V>>, Error> {
        let mut loaded = HashMap::with_capacity(keys.len());
        for key in keys {
            let value = self.load(key)?;
            loaded.insert((*key).to_owned(), value);
        }
        Ok(loaded)
    }

    /// Removes every entry saved with at least one of `tags`.
    fn invalidate_by_tags(&self, tags: &Tags) -> Result<(), Error>;
}

macro_rules! forward_backend {
    ($($ptr:ty),* $(,)?) => {
        $(
            impl<V, B> Backend<V> for $ptr
            where
                B: Backend<V> + ?Sized,
            {
                fn load(&self, key: &str) -> Result<Option<V>, Error> {
                    (**self).load(key)
                }

                fn save(&self, key: &str, value: V, options: &SaveOptions) -> Result<(), Error> {
                    (**self).save(key, value, options)
                }

                fn remove(&self, key: &str) -> Result<(), Error> {
                    (**self).remove(key)
                }

                fn bulk_load(&self, keys: &[&str]) -> Result<HashMap<String, Option<V>>, Error> {
                    (**self).bulk_load(keys)
                }

                fn invalidate_by_tags(&self, tags: &Tags) -> Result<(), Error> {
                    (**self).invalidate_by_tags(tags)
                }
            }
        )*
    };
}

forward_backend!(&B, Arc<B>, Box<B>);
