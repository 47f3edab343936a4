// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Storage capability consumed by `keystash`.
//!
//! A [`Backend`] is a key-value store with a richer native contract than the
//! simple get/set interface exposed to applications: entries carry an absolute
//! [`Expiration`], may opt into sliding expiration, and are labelled with
//! [`Tags`] so whole groups can be invalidated at once.
//!
//! # Implementing a Backend
//!
//! Only `load`, `save`, `remove` and `invalidate_by_tags` are required;
//! `bulk_load` falls back to one `load` per key.
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::RwLock;
//!
//! use keystash_backend::{Backend, Error, SaveOptions, Tags};
//!
//! struct TaggedMap<V>(RwLock<HashMap<String, (V, Tags)>>);
//!
//! impl<V: Clone + Send + Sync> Backend<V> for TaggedMap<V> {
//!     fn load(&self, key: &str) -> Result<Option<V>, Error> {
//!         Ok(self.0.read().unwrap().get(key).map(|(value, _)| value.clone()))
//!     }
//!
//!     fn save(&self, key: &str, value: V, options: &SaveOptions) -> Result<(), Error> {
//!         self.0.write().unwrap().insert(key.to_owned(), (value, options.tags().clone()));
//!         Ok(())
//!     }
//!
//!     fn remove(&self, key: &str) -> Result<(), Error> {
//!         self.0.write().unwrap().remove(key);
//!         Ok(())
//!     }
//!
//!     fn invalidate_by_tags(&self, tags: &Tags) -> Result<(), Error> {
//!         self.0.write().unwrap().retain(|_, (_, entry_tags)| !entry_tags.intersects(tags));
//!         Ok(())
//!     }
//! }
//! ```

mod backend;
pub mod error;
mod expiration;
mod options;
mod tags;
#[cfg(any(feature = "test-util", test))]
pub mod testing;

#[doc(inline)]
pub use backend::Backend;
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use expiration::Expiration;
#[doc(inline)]
pub use options::SaveOptions;
#[doc(inline)]
pub use tags::Tags;
