//! Part-to-whole charts: pie, donut, treemap and waffle (mosaic).

use async_trait::async_trait;
use lensfix_core::{
    ChartConfig, Dataset, Legend, LegendPosition, MosaicConfig, PieConfig, TreemapConfig,
};

use super::last;
use crate::errors::FixtureError;
use crate::registry::{ExampleGenerator, ExampleRegistry};
use crate::writer::FixtureWriter;

pub fn register(registry: &mut ExampleRegistry) {
    registry.register(Box::new(PieChart));
    registry.register(Box::new(PieChartAdvancedColors));
    registry.register(Box::new(PieChartLegendStats));
    registry.register(Box::new(PieChartDonut));
    registry.register(Box::new(Treemap));
    registry.register(Box::new(Waffle));
}

fn pie(title: &str, dataset: Dataset, value: &str, breakdown: &str) -> PieConfig {
    PieConfig {
        title: title.to_string(),
        dataset,
        value: value.to_string(),
        breakdown: vec![breakdown.to_string()],
        legend: Some(Legend::shown(LegendPosition::Right)),
    }
}

struct PieChart;

#[async_trait]
impl ExampleGenerator for PieChart {
    fn name(&self) -> &'static str {
        "pie-chart"
    }

    fn entry_point(&self) -> &'static str {
        "generatePieChart"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let esql = pie(
            "Events by Status",
            Dataset::esql(
                "FROM logs-* | STATS count = COUNT() BY log.level | SORT count DESC | LIMIT 10",
            ),
            "count",
            "log.level",
        );
        let dataview = pie(
            "Events by Status (Data View)",
            Dataset::index("logs-*"),
            "count()",
            "log.level",
        );

        writer
            .write_dual_fixture(
                "pie-chart",
                &ChartConfig::Pie(esql),
                &ChartConfig::Pie(dataview),
                &last("24h"),
            )
            .await?;
        Ok(())
    }
}

struct PieChartAdvancedColors;

#[async_trait]
impl ExampleGenerator for PieChartAdvancedColors {
    fn name(&self) -> &'static str {
        "pie-chart-advanced-colors"
    }

    fn entry_point(&self) -> &'static str {
        "generatePieChartAdvancedColors"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let legend = Some(Legend::shown(LegendPosition::Bottom));
        let esql = PieConfig {
            legend: legend.clone(),
            ..pie(
                "Request Methods Distribution",
                Dataset::esql("FROM logs-* | STATS count = COUNT() BY request.method"),
                "count",
                "request.method",
            )
        };
        let dataview = PieConfig {
            legend,
            ..pie(
                "Request Methods Distribution (Data View)",
                Dataset::index_with_time_field("logs-*", "@timestamp"),
                "count()",
                "request.method",
            )
        };

        writer
            .write_dual_fixture(
                "pie-chart-advanced-colors",
                &ChartConfig::Pie(esql),
                &ChartConfig::Pie(dataview),
                &last("24h"),
            )
            .await?;
        Ok(())
    }
}

/// Catalog-only: legend statistics need a data view dataset.
struct PieChartLegendStats;

#[async_trait]
impl ExampleGenerator for PieChartLegendStats {
    fn name(&self) -> &'static str {
        "pie-chart-legend-stats"
    }

    fn entry_point(&self) -> &'static str {
        "generatePieChartLegendStats"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let config = PieConfig {
            legend: Some(Legend {
                legend_stats: vec!["currentAndLastValue".to_string(), "average".to_string()],
                ..Legend::shown(LegendPosition::Right)
            }),
            ..pie(
                "Events by Status with Legend Stats",
                Dataset::index("logs-*"),
                "count()",
                "log.level",
            )
        };

        writer
            .write_fixture("pie-chart-legend-stats.json", &ChartConfig::Pie(config), &last("24h"))
            .await?;
        Ok(())
    }
}

struct PieChartDonut;

#[async_trait]
impl ExampleGenerator for PieChartDonut {
    fn name(&self) -> &'static str {
        "pie-chart-donut"
    }

    fn entry_point(&self) -> &'static str {
        "generatePieChartDonut"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let esql = pie(
            "Response Codes Distribution (Donut)",
            Dataset::esql("FROM logs-* | STATS count = COUNT() BY response.keyword"),
            "count",
            "response.keyword",
        );
        let dataview = pie(
            "Response Codes Distribution (Donut - Data View)",
            Dataset::index("logs-*"),
            "count()",
            "response.keyword",
        );

        writer
            .write_dual_fixture(
                "pie-chart-donut",
                &ChartConfig::Donut(esql),
                &ChartConfig::Donut(dataview),
                &last("7d"),
            )
            .await?;
        Ok(())
    }
}

struct Treemap;

#[async_trait]
impl ExampleGenerator for Treemap {
    fn name(&self) -> &'static str {
        "treemap"
    }

    fn entry_point(&self) -> &'static str {
        "generateTreemap"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let breakdown = vec!["geo.src".to_string(), "geo.dest".to_string()];
        let esql = TreemapConfig {
            title: "Traffic by Source and Destination".to_string(),
            dataset: Dataset::esql("FROM logs-* | STATS bytes = SUM(bytes) BY geo.src, geo.dest"),
            value: "bytes".to_string(),
            breakdown: breakdown.clone(),
        };
        let dataview = TreemapConfig {
            title: "Traffic by Source and Destination (Data View)".to_string(),
            dataset: Dataset::index("logs-*"),
            value: "sum(bytes)".to_string(),
            breakdown,
        };

        writer
            .write_dual_fixture(
                "treemap",
                &ChartConfig::Treemap(esql),
                &ChartConfig::Treemap(dataview),
                &last("7d"),
            )
            .await?;
        Ok(())
    }
}

struct Waffle;

#[async_trait]
impl ExampleGenerator for Waffle {
    fn name(&self) -> &'static str {
        "waffle"
    }

    fn entry_point(&self) -> &'static str {
        "generateWaffle"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let esql = MosaicConfig {
            title: "HTTP Methods Distribution".to_string(),
            dataset: Dataset::esql("FROM logs-* | STATS count = COUNT() BY request.method"),
            value: "count".to_string(),
            breakdown: vec!["request.method".to_string()],
        };
        let dataview = MosaicConfig {
            title: "HTTP Methods Distribution (Data View)".to_string(),
            dataset: Dataset::index("logs-*"),
            value: "count()".to_string(),
            ..esql.clone()
        };

        writer
            .write_dual_fixture(
                "waffle",
                &ChartConfig::Mosaic(esql),
                &ChartConfig::Mosaic(dataview),
                &last("24h"),
            )
            .await?;
        Ok(())
    }
}
