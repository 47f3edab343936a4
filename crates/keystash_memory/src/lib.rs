// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Tag-aware in-memory backend backed by moka.
//!
//! [`MemoryBackend`] implements the full [`Backend`](keystash_backend::Backend)
//! contract: absolute and sliding expiration evaluated against a
//! [`tick::Clock`], and group invalidation by tag. Capacity-based eviction is
//! left to moka's `TinyLFU` policy. Use [`MemoryBackendBuilder`] to configure
//! it without exposing moka types.
//!
//! # Quick Start
//!
//! ```
//! use std::time::Duration;
//!
//! use keystash_backend::{Backend, Expiration, SaveOptions, Tags};
//! use keystash_memory::MemoryBackend;
//! use tick::Clock;
//!
//! let clock = Clock::new_frozen();
//! let backend = MemoryBackend::<i32>::builder(clock.clone())
//!     .max_capacity(1000)
//!     .build();
//!
//! let at = clock.system_time() + Duration::from_secs(60);
//! let options = SaveOptions::new().with_expiration(Expiration::At(at)).with_tag("users");
//! backend.save("alice", 42, &options)?;
//! assert_eq!(backend.load("alice")?, Some(42));
//!
//! backend.invalidate_by_tags(&Tags::single("users"))?;
//! assert_eq!(backend.load("alice")?, None);
//! # Ok::<(), keystash_backend::Error>(())
//! ```

pub mod backend;
pub mod builder;

#[doc(inline)]
pub use backend::MemoryBackend;
#[doc(inline)]
pub use builder::MemoryBackendBuilder;
