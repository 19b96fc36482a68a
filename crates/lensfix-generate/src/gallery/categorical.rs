use async_trait::async_trait;
use lensfix_core::{
    ChartConfig, Dataset, HeatmapConfig, Legend, LegendPosition, TagcloudConfig,
};

use super::last;
use crate::errors::FixtureError;
use crate::registry::{ExampleGenerator, ExampleRegistry};
use crate::writer::FixtureWriter;

pub fn register(registry: &mut ExampleRegistry) {
    registry.register(Box::new(Heatmap));
    registry.register(Box::new(Tagcloud));
}

struct Heatmap;

#[async_trait]
impl ExampleGenerator for Heatmap {
    fn name(&self) -> &'static str {
        "heatmap"
    }

    fn entry_point(&self) -> &'static str {
        "generateHeatmap"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        // Rows by destination, columns by source.
        let esql = HeatmapConfig {
            title: "Traffic Heatmap by Geographic Location".to_string(),
            dataset: Dataset::esql(
                "FROM kibana_sample_data_logs | STATS bytes = SUM(bytes) BY geo.dest, geo.src",
            ),
            breakdown: Some("geo.dest".to_string()),
            x_axis: "geo.src".to_string(),
            value: "bytes".to_string(),
            legend: Some(Legend::shown(LegendPosition::Right)),
        };
        let dataview = HeatmapConfig {
            title: "Traffic Heatmap by Geographic Location (Data View)".to_string(),
            dataset: Dataset::index("kibana_sample_data_logs"),
            value: "sum(bytes)".to_string(),
            ..esql.clone()
        };

        writer
            .write_dual_fixture(
                "heatmap",
                &ChartConfig::Heatmap(esql),
                &ChartConfig::Heatmap(dataview),
                &last("7d"),
            )
            .await?;
        Ok(())
    }
}

struct Tagcloud;

#[async_trait]
impl ExampleGenerator for Tagcloud {
    fn name(&self) -> &'static str {
        "tagcloud"
    }

    fn entry_point(&self) -> &'static str {
        "generateTagcloud"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let esql = TagcloudConfig {
            title: "Top Log Levels".to_string(),
            dataset: Dataset::esql(
                "FROM logs-* | STATS count = COUNT() BY log.level | SORT count DESC | LIMIT 20",
            ),
            value: "count".to_string(),
            breakdown: "log.level".to_string(),
        };
        let dataview = TagcloudConfig {
            dataset: Dataset::index_with_time_field("logs-*", "@timestamp"),
            value: "count()".to_string(),
            ..esql.clone()
        };

        writer
            .write_dual_fixture(
                "tagcloud",
                &ChartConfig::Tagcloud(esql),
                &ChartConfig::Tagcloud(dataview),
                &last("24h"),
            )
            .await?;
        Ok(())
    }
}
