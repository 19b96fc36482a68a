use std::path::PathBuf;
use std::sync::Arc;

use lensfix_core::{BuildOptions, CatalogCache, CatalogService, ChartConfig, MockCatalogService};
use tracing::info;

use crate::builder::ConfigBuilder;
use crate::errors::FixtureError;
use crate::output::{OutputLayout, write_bytes_atomic};

/// Builds chart configurations and persists them as pretty JSON fixtures.
#[derive(Clone)]
pub struct FixtureWriter {
    builder: Arc<dyn ConfigBuilder>,
    catalog: MockCatalogService,
    layout: OutputLayout,
}

impl FixtureWriter {
    pub fn new(builder: Arc<dyn ConfigBuilder>, layout: OutputLayout) -> Self {
        Self::with_catalog(builder, MockCatalogService::new(CatalogCache::new()), layout)
    }

    pub fn with_catalog(
        builder: Arc<dyn ConfigBuilder>,
        catalog: MockCatalogService,
        layout: OutputLayout,
    ) -> Self {
        Self {
            builder,
            catalog,
            layout,
        }
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    pub fn catalog(&self) -> &MockCatalogService {
        &self.catalog
    }

    /// Build `config` and write it to `<root>/<version>/<filename>`.
    ///
    /// The catalog cache is cleared first so each fixture resolves datasets
    /// from a fresh state. Nothing is written when the build fails.
    pub async fn write_fixture(
        &self,
        filename: &str,
        config: &ChartConfig,
        options: &BuildOptions,
    ) -> Result<PathBuf, FixtureError> {
        let path = self.layout.fixture_path(filename)?;

        self.catalog.clear_cache();
        let attributes = self
            .builder
            .build(config, options, &self.catalog)
            .await
            .map_err(|source| FixtureError::Build {
                fixture: filename.to_string(),
                source,
            })?;

        let mut data = serde_json::to_vec_pretty(&attributes)?;
        data.push(b'\n');
        write_bytes_atomic(&path, &data).map_err(|source| FixtureError::Io {
            path: path.clone(),
            source,
        })?;

        info!(
            event = "fixture_written",
            fixture = filename,
            chart_type = config.chart_type(),
            path = %path.display(),
            "fixture written"
        );
        Ok(path)
    }
}
