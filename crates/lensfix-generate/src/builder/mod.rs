//! Builder seam: turns a chart configuration into serialized attributes.

mod lens;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use lensfix_core::{BuildOptions, CatalogService, ChartConfig};

pub use lens::LensAttributesBuilder;

/// Errors raised by a builder while constructing attributes.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("unsupported configuration: {0}")]
    Unsupported(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trait implemented by chart config builders.
///
/// Builders resolve catalog datasets through `catalog`; the returned value is
/// persisted verbatim.
#[async_trait]
pub trait ConfigBuilder: Send + Sync {
    async fn build(
        &self,
        config: &ChartConfig,
        options: &BuildOptions,
        catalog: &dyn CatalogService,
    ) -> Result<Value, BuildError>;
}
