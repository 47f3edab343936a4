// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! OpenTelemetry instruments for cache operations.

use std::time::Duration;

use opentelemetry::{
    InstrumentationScope, KeyValue,
    metrics::{Counter, Histogram, MeterProvider},
};

use crate::{
    cache::CacheName,
    telemetry::{ACTIVITY_KEY, CacheActivity, CacheOperation, NAME_KEY, OPERATION_KEY},
};

/// Counter and histogram shared by every clone of a `CacheTelemetry`.
#[derive(Clone, Debug)]
pub(crate) struct Instruments {
    events: Counter<u64>,
    durations: Histogram<f64>,
}

impl Instruments {
    pub(crate) fn new(provider: &dyn MeterProvider) -> Self {
        let scope = InstrumentationScope::builder(env!("CARGO_PKG_NAME"))
            .with_version(env!("CARGO_PKG_VERSION"))
            .with_schema_url("https://opentelemetry.io/schemas/1.47.0")
            .build();
        let meter = provider.meter_with_scope(scope);

        Self {
            events: meter
                .u64_counter("cache.event.count")
                .with_description("Facade operations by outcome")
                .with_unit("{event}")
                .build(),
            durations: meter
                .f64_histogram("cache.operation.duration")
                .with_description("Time spent in a facade operation, backend included")
                .with_unit("s")
                .build(),
        }
    }

    pub(crate) fn record(&self, cache_name: CacheName, operation: CacheOperation, activity: CacheActivity, duration: Duration) {
        let attrs = [
            KeyValue::new(NAME_KEY, cache_name),
            KeyValue::new(OPERATION_KEY, operation.as_str()),
            KeyValue::new(ACTIVITY_KEY, activity.as_str()),
        ];

        self.events.add(1, &attrs);
        self.durations.record(duration.as_secs_f64(), &attrs);
    }
}
