// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Cache telemetry: structured `tracing` events and optional OpenTelemetry metrics.
//!
//! Backend failures on the write path are always reported as warnings, since
//! they are otherwise only visible as a `false` return value. Per-operation
//! events and metrics are opt-in through [`TelemetryConfig`].

use std::sync::Arc;

mod cache;
pub(crate) mod config;
#[cfg(any(feature = "metrics", test))]
pub(crate) mod metrics;
#[cfg(test)]
pub(crate) mod testing;

#[cfg(any(feature = "metrics", test))]
pub(crate) use cache::{ACTIVITY_KEY, NAME_KEY, OPERATION_KEY};
pub(crate) use cache::CacheTelemetryInner;
pub use config::TelemetryConfig;

/// Records cache operations as logs and metrics.
///
/// Built from a [`TelemetryConfig`] and handed to the cache builder. Cloning is
/// cheap; clones share instruments.
#[derive(Clone, Debug, Default)]
pub struct CacheTelemetry {
    inner: Arc<CacheTelemetryInner>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CacheOperation {
    Get,
    Set,
    Delete,
    Clear,
    GetMultiple,
    SetMultiple,
    DeleteMultiple,
    Has,
}

impl CacheOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "cache.get",
            Self::Set => "cache.set",
            Self::Delete => "cache.delete",
            Self::Clear => "cache.clear",
            Self::GetMultiple => "cache.get_multiple",
            Self::SetMultiple => "cache.set_multiple",
            Self::DeleteMultiple => "cache.delete_multiple",
            Self::Has => "cache.has",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CacheActivity {
    Hit,
    Miss,
    Stored,
    Deleted,
    Cleared,
    Rejected,
    Error,
}

impl CacheActivity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "cache.hit",
            Self::Miss => "cache.miss",
            Self::Stored => "cache.stored",
            Self::Deleted => "cache.deleted",
            Self::Cleared => "cache.cleared",
            Self::Rejected => "cache.rejected",
            Self::Error => "cache.error",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Self::Hit | Self::Miss => Severity::Debug,
            Self::Stored | Self::Deleted | Self::Cleared | Self::Rejected => Severity::Info,
            Self::Error => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Severity {
    Debug,
    Info,
    Error,
}
