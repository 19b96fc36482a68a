//! Core contracts for lensfix.
//!
//! This crate defines the mock data catalog used while building chart
//! fixtures, the chart configuration model handed to builders, and the JSON
//! Schema helpers used to validate chart documents read from disk.

pub mod catalog;
pub mod chart;
pub mod error;
pub mod field_type;
pub mod schema;

pub use catalog::{
    CatalogCache, CatalogEntry, CatalogField, CatalogLookup, CatalogService, CreateEntry,
    EntrySpec, FieldCollection, FieldSpec, LookupDescriptor, MockCatalogService, create_entry,
};
pub use chart::{
    AnnotationEvent, AnnotationLayer, BucketKind, BuildOptions, ChartConfig, Dataset,
    EsqlDataset, GaugeConfig, GaugeShape, HeatmapConfig, IndexDataset, Legend, LegendPosition,
    MetricConfig, MosaicConfig, PieConfig, ReferenceLayer, SeriesLayer, SeriesType, TableConfig,
    TagcloudConfig, TimeRange, TimeRangeKind, TreemapConfig, ValueFormat, XAxis, XAxisBucket,
    XyConfig, XyLayer, YAxisValue,
};
pub use error::{Error, Result};
pub use field_type::{FieldType, FieldTypeSpec, resolve_field_type};
pub use schema::{chart_json_schema, validate_chart_json};

/// Version segment used for output directories when none is configured.
pub const DEFAULT_VERSION_TAG: &str = "v9.2.0";
