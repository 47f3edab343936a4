// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Telemetry configuration for cache operations.

#[cfg(any(feature = "metrics", test))]
use opentelemetry::metrics::MeterProvider;

#[cfg(any(feature = "metrics", test))]
use crate::telemetry::metrics::Instruments;
use crate::telemetry::{CacheTelemetry, CacheTelemetryInner};

/// Configuration for cache telemetry.
///
/// Everything is disabled by default. Backend failures on the write path are
/// logged as warnings either way.
///
/// # Examples
///
/// ```
/// use keystash::TelemetryConfig;
///
/// let telemetry = TelemetryConfig::new().with_logs().build();
/// assert!(telemetry.logs_enabled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TelemetryConfig {
    logs_enabled: bool,
    #[cfg(any(feature = "metrics", test))]
    instruments: Option<Instruments>,
}

impl TelemetryConfig {
    /// Creates a new telemetry configuration with everything disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables a `tracing` event for every cache operation.
    ///
    /// Hits and misses are logged at `DEBUG`, writes and rejections at `INFO`,
    /// backend failures at `ERROR`.
    #[must_use]
    pub fn with_logs(self) -> Self {
        Self {
            logs_enabled: true,
            ..self
        }
    }

    /// Enables metrics collection using the provided meter provider.
    #[cfg(any(feature = "metrics", test))]
    #[must_use]
    pub fn with_metrics(mut self, provider: &dyn MeterProvider) -> Self {
        self.instruments = Some(Instruments::new(provider));
        self
    }

    /// Builds the telemetry collector from this configuration.
    #[must_use]
    pub fn build(self) -> CacheTelemetry {
        CacheTelemetry::from_inner(CacheTelemetryInner {
            logging_enabled: self.logs_enabled,
            #[cfg(any(feature = "metrics", test))]
            instruments: self.instruments,
        })
    }
}
