// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A simple key/value cache over tagged, expiring storage.
//!
//! [`SimpleCache`] exposes the familiar `get`/`set`/`delete`/`clear`/`has`
//! operations and their bulk forms on top of any
//! [`Backend`](keystash_backend::Backend). Every entry it writes carries
//! [`NAMESPACE_TAG`], so [`SimpleCache::clear`] only removes entries written
//! through the facade even when the backend is shared.
//!
//! - Keys are non-empty strings and are validated before the backend is touched.
//! - TTLs are given as a [`Ttl`] and resolved to a fixed deadline at write time.
//! - Reads return a caller-supplied default for missing and expired entries.
//! - Backend read failures are errors. Backend write failures are logged with
//!   `tracing` and reported as `false`.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use keystash::{SimpleCache, Ttl};
//! use keystash_memory::MemoryBackend;
//! use tick::Clock;
//!
//! let clock = Clock::new_frozen();
//! let cache = SimpleCache::new(MemoryBackend::<String>::new(clock.clone()), clock);
//!
//! cache.set("greeting", "hello".to_string(), Duration::from_secs(300))?;
//! cache.set_multiple([("a", "1".to_string()), ("b", "2".to_string())], Ttl::None)?;
//!
//! assert_eq!(cache.get("greeting", String::new())?, "hello");
//! assert!(cache.has("a")?);
//!
//! assert!(cache.clear());
//! assert!(!cache.has("a")?);
//! # Ok::<(), keystash::Error>(())
//! ```
//!
//! # Features
//!
//! - `memory` (default): re-exports the moka-based `MemoryBackend`.
//! - `metrics`: OpenTelemetry counters and histograms through
//!   `TelemetryConfig::with_metrics`.
//! - `test-util`: enables the mock backend in `keystash_backend::testing`.

pub mod builder;
pub mod cache;
mod error;
mod key;
mod telemetry;
mod ttl;

#[doc(inline)]
pub use builder::SimpleCacheBuilder;
#[doc(inline)]
pub use cache::{NAMESPACE_TAG, SimpleCache};
#[doc(inline)]
pub use error::{Error, ErrorKind, Result};
#[doc(inline)]
pub use keystash_backend::{Backend, Expiration};
#[cfg(feature = "memory")]
#[doc(inline)]
pub use keystash_memory::{MemoryBackend, MemoryBackendBuilder};
#[doc(inline)]
pub use telemetry::{CacheTelemetry, TelemetryConfig};
#[doc(inline)]
pub use ttl::Ttl;
