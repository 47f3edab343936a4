// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Cache telemetry implementation and recording.

use std::time::Duration;

#[cfg(any(feature = "metrics", test))]
use crate::telemetry::metrics::Instruments;
use crate::{
    cache::CacheName,
    telemetry::{CacheActivity, CacheOperation, CacheTelemetry, Severity},
};

// Metric attribute keys. Log events use the same names as field names.
#[cfg(any(feature = "metrics", test))]
pub(crate) const NAME_KEY: &str = "cache.name";
#[cfg(any(feature = "metrics", test))]
pub(crate) const OPERATION_KEY: &str = "cache.operation";
#[cfg(any(feature = "metrics", test))]
pub(crate) const ACTIVITY_KEY: &str = "cache.activity";

#[derive(Debug, Default)]
pub(crate) struct CacheTelemetryInner {
    pub(crate) logging_enabled: bool,
    #[cfg(any(feature = "metrics", test))]
    pub(crate) instruments: Option<Instruments>,
}

impl CacheTelemetry {
    pub(crate) fn from_inner(inner: CacheTelemetryInner) -> Self {
        Self {
            inner: std::sync::Arc::new(inner),
        }
    }

    /// Returns `true` if per-operation events are logged.
    #[must_use]
    pub fn logs_enabled(&self) -> bool {
        self.inner.logging_enabled
    }

    /// Records a completed cache operation.
    #[inline]
    pub(crate) fn record(&self, cache_name: CacheName, operation: CacheOperation, activity: CacheActivity, duration: Duration) {
        #[cfg(any(feature = "metrics", test))]
        if let Some(instruments) = &self.inner.instruments {
            instruments.record(cache_name, operation, activity, duration);
        }

        if self.inner.logging_enabled {
            Self::emit(cache_name, operation, activity, duration);
        }
    }

    /// Reports a backend failure that the caller only sees as `false`.
    ///
    /// Emitted regardless of configuration.
    pub(crate) fn report_failure(cache_name: CacheName, operation: CacheOperation, error: &keystash_backend::Error) {
        tracing::warn!(
            cache.name = cache_name,
            cache.operation = operation.as_str(),
            error = %error,
            "cache backend failure"
        );
    }

    fn emit(cache_name: CacheName, operation: CacheOperation, activity: CacheActivity, duration: Duration) {
        let op = operation.as_str();
        let ac = activity.as_str();
        let duration_ns = duration.as_nanos();

        // Tracing level must be constant, so we use a macro to select the appropriate level.
        macro_rules! emit_event {
            ($level:ident) => {
                tracing::$level!(
                    cache.name = cache_name,
                    cache.operation = op,
                    cache.activity = ac,
                    cache.duration_ns = duration_ns,
                    "cache.event"
                )
            };
        }

        match activity.severity() {
            Severity::Error => emit_event!(error),
            Severity::Info => emit_event!(info),
            Severity::Debug => emit_event!(debug),
        }
    }
}
