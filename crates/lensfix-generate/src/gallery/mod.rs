//! Built-in example gallery.
//!
//! Most examples write a dual fixture (ES|QL and catalog-backed variants);
//! charts the query datasource cannot express write a single catalog fixture.

mod categorical;
mod gauges;
mod metrics;
mod partitions;
mod tables;
mod xy;

use lensfix_core::{BuildOptions, TimeRange};

use crate::registry::ExampleRegistry;

pub fn register(registry: &mut ExampleRegistry) {
    tables::register(registry);
    gauges::register(registry);
    metrics::register(registry);
    partitions::register(registry);
    categorical::register(registry);
    xy::register(registry);
}

/// Relative time range ending now, e.g. `last("24h")`.
fn last(window: &str) -> BuildOptions {
    BuildOptions::with_time_range(TimeRange::last(window))
}
