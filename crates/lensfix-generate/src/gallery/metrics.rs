use async_trait::async_trait;
use lensfix_core::{ChartConfig, Dataset, MetricConfig};

use super::last;
use crate::errors::FixtureError;
use crate::registry::{ExampleGenerator, ExampleRegistry};
use crate::writer::FixtureWriter;

pub fn register(registry: &mut ExampleRegistry) {
    registry.register(Box::new(MetricBasic));
    registry.register(Box::new(MetricWithBreakdown));
    registry.register(Box::new(MetricWithMaxValue));
    registry.register(Box::new(MetricWithSecondary));
    registry.register(Box::new(MetricWithSubtitle));
    registry.register(Box::new(MetricWithTrend));
}

fn labeled(label: &str, config: MetricConfig) -> MetricConfig {
    MetricConfig {
        label: Some(label.to_string()),
        ..config
    }
}

struct MetricBasic;

#[async_trait]
impl ExampleGenerator for MetricBasic {
    fn name(&self) -> &'static str {
        "metric-basic"
    }

    fn entry_point(&self) -> &'static str {
        "generateMetricBasic"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let esql = labeled(
            "Total Events",
            MetricConfig::new(
                "Basic Count Metric",
                Dataset::esql("FROM logs-* | STATS count = COUNT()"),
                "count",
            ),
        );
        let dataview = labeled(
            "Total Events",
            MetricConfig::new(
                "Basic Count Metric (Data View)",
                Dataset::index("logs-*"),
                "count()",
            ),
        );

        writer
            .write_dual_fixture(
                "metric-basic",
                &ChartConfig::Metric(esql),
                &ChartConfig::Metric(dataview),
                &last("24h"),
            )
            .await?;
        Ok(())
    }
}

struct MetricWithBreakdown;

#[async_trait]
impl ExampleGenerator for MetricWithBreakdown {
    fn name(&self) -> &'static str {
        "metric-with-breakdown"
    }

    fn entry_point(&self) -> &'static str {
        "generateMetricWithBreakdown"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let esql = MetricConfig {
            breakdown: Some("agent.name".to_string()),
            ..labeled(
                "Events per Agent",
                MetricConfig::new(
                    "Count by Agent",
                    Dataset::esql(
                        "FROM logs-* | STATS count = COUNT() BY agent.name | SORT count DESC | LIMIT 5",
                    ),
                    "count",
                ),
            )
        };
        let dataview = MetricConfig {
            breakdown: Some("agent.name".to_string()),
            ..labeled(
                "Events per Agent",
                MetricConfig::new(
                    "Count by Agent (Data View)",
                    Dataset::index("logs-*"),
                    "count()",
                ),
            )
        };

        writer
            .write_dual_fixture(
                "metric-with-breakdown",
                &ChartConfig::Metric(esql),
                &ChartConfig::Metric(dataview),
                &last("24h"),
            )
            .await?;
        Ok(())
    }
}

struct MetricWithMaxValue;

#[async_trait]
impl ExampleGenerator for MetricWithMaxValue {
    fn name(&self) -> &'static str {
        "metric-with-max-value"
    }

    fn entry_point(&self) -> &'static str {
        "generateMetricWithMaxValue"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let esql = MetricConfig {
            query_max_value: Some("total".to_string()),
            format: Some("bytes".to_string()),
            ..labeled(
                "Storage Used",
                MetricConfig::new(
                    "Storage Usage (Progress)",
                    Dataset::esql(
                        "FROM metrics-* | STATS used = AVG(storage.used.bytes), total = AVG(storage.total.bytes)",
                    ),
                    "used",
                ),
            )
        };
        let dataview = MetricConfig {
            query_max_value: Some("average(storage.total.bytes)".to_string()),
            format: Some("bytes".to_string()),
            ..labeled(
                "Storage Used",
                MetricConfig::new(
                    "Storage Usage (Progress, Data View)",
                    Dataset::index("metrics-*"),
                    "average(storage.used.bytes)",
                ),
            )
        };

        writer
            .write_dual_fixture(
                "metric-with-max-value",
                &ChartConfig::Metric(esql),
                &ChartConfig::Metric(dataview),
                &last("24h"),
            )
            .await?;
        Ok(())
    }
}

struct MetricWithSecondary;

#[async_trait]
impl ExampleGenerator for MetricWithSecondary {
    fn name(&self) -> &'static str {
        "metric-with-secondary"
    }

    fn entry_point(&self) -> &'static str {
        "generateMetricWithSecondary"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let esql = MetricConfig {
            query_secondary_metric: Some("max_time".to_string()),
            ..labeled(
                "Response Time",
                MetricConfig::new(
                    "Response Time with Secondary Metric",
                    Dataset::esql(
                        "FROM metrics-* | STATS avg_time = AVG(response_time), max_time = MAX(response_time)",
                    ),
                    "avg_time",
                ),
            )
        };
        let dataview = MetricConfig {
            query_secondary_metric: Some("max(response_time)".to_string()),
            ..labeled(
                "Response Time",
                MetricConfig::new(
                    "Response Time with Secondary Metric (Data View)",
                    Dataset::index("metrics-*"),
                    "average(response_time)",
                ),
            )
        };

        writer
            .write_dual_fixture(
                "metric-with-secondary",
                &ChartConfig::Metric(esql),
                &ChartConfig::Metric(dataview),
                &last("24h"),
            )
            .await?;
        Ok(())
    }
}

struct MetricWithSubtitle;

#[async_trait]
impl ExampleGenerator for MetricWithSubtitle {
    fn name(&self) -> &'static str {
        "metric-with-subtitle"
    }

    fn entry_point(&self) -> &'static str {
        "generateMetricWithSubtitle"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let subtitled = |config: MetricConfig| MetricConfig {
            subtitle: Some("Last 24 hours".to_string()),
            ..labeled("Total Events", config)
        };

        let esql = subtitled(MetricConfig::new(
            "Event Count with Subtitle",
            Dataset::esql("FROM logs-* | STATS count = COUNT()"),
            "count",
        ));
        let dataview = subtitled(MetricConfig::new(
            "Event Count with Subtitle (Data View)",
            Dataset::index("logs-*"),
            "count()",
        ));

        writer
            .write_dual_fixture(
                "metric-with-subtitle",
                &ChartConfig::Metric(esql),
                &ChartConfig::Metric(dataview),
                &last("24h"),
            )
            .await?;
        Ok(())
    }
}

/// Catalog-only: trend lines need a time-based data view.
struct MetricWithTrend;

#[async_trait]
impl ExampleGenerator for MetricWithTrend {
    fn name(&self) -> &'static str {
        "metric-with-trend"
    }

    fn entry_point(&self) -> &'static str {
        "generateMetricWithTrend"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let config = MetricConfig {
            trend_line: Some(true),
            ..labeled(
                "Total Events",
                MetricConfig::new(
                    "Event Count with Trend",
                    Dataset::index_with_time_field("logs-*", "@timestamp"),
                    "count()",
                ),
            )
        };

        writer
            .write_fixture(
                "metric-with-trend.json",
                &ChartConfig::Metric(config),
                &last("24h"),
            )
            .await?;
        Ok(())
    }
}
