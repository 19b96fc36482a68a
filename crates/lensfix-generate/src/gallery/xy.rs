use async_trait::async_trait;
use lensfix_core::{
    AnnotationEvent, AnnotationLayer, ChartConfig, Dataset, Legend, LegendPosition,
    ReferenceLayer, SeriesLayer, SeriesType, ValueFormat, XAxis, XyConfig, XyLayer, YAxisValue,
};
use serde_json::json;

use super::last;
use crate::errors::FixtureError;
use crate::registry::{ExampleGenerator, ExampleRegistry};
use crate::writer::FixtureWriter;

pub fn register(registry: &mut ExampleRegistry) {
    registry.register(Box::new(XyChart));
    registry.register(Box::new(XyChartArea));
    registry.register(Box::new(XyChartAreaStacked));
    registry.register(Box::new(XyChartBar));
    registry.register(Box::new(XyChartBarHorizontal));
    registry.register(Box::new(XyChartBarStacked));
    registry.register(Box::new(XyChartAdvancedLine));
    registry.register(Box::new(XyChartEsqlMetricAppearance));
    registry.register(Box::new(XyChartValueLabels));
    registry.register(Box::new(XyLineFittingFunctions));
    registry.register(Box::new(XyChartMultiLayer));
    registry.register(Box::new(XyChartWithReferenceLine));
    registry.register(Box::new(XyChartWithAnnotations));
}

fn with_legend(title: &str, dataset: Dataset, layers: Vec<XyLayer>) -> ChartConfig {
    ChartConfig::Xy(XyConfig {
        legend: Some(Legend::shown(LegendPosition::Right)),
        ..XyConfig::new(title, dataset, layers)
    })
}

fn series(series_type: SeriesType, x_axis: XAxis, label: &str, value: &str) -> XyLayer {
    XyLayer::Series(SeriesLayer::new(
        series_type,
        x_axis,
        vec![YAxisValue::labeled(label, value)],
    ))
}

fn fitted(title: &str, dataset: Dataset, x_axis: XAxis, value: &str, function: &str) -> XyConfig {
    XyConfig {
        fitting_function: Some(function.to_string()),
        emphasize_fitting: Some(true),
        ..XyConfig::new(
            title,
            dataset,
            vec![series(SeriesType::Line, x_axis, "Count", value)],
        )
    }
}

fn formatted(label: &str, value: &str, id: &str, pattern: &str) -> YAxisValue {
    YAxisValue {
        format: Some(ValueFormat {
            id: id.to_string(),
            params: Some(json!({ "pattern": pattern })),
        }),
        ..YAxisValue::labeled(label, value)
    }
}

fn timestamp() -> XAxis {
    XAxis::Field("@timestamp".to_string())
}

fn timestamp_histogram() -> XAxis {
    XAxis::date_histogram("@timestamp")
}

struct XyChart;

#[async_trait]
impl ExampleGenerator for XyChart {
    fn name(&self) -> &'static str {
        "xy-chart"
    }

    fn entry_point(&self) -> &'static str {
        "generateXYChart"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let esql = with_legend(
            "Events Over Time",
            Dataset::esql("FROM logs-* | STATS count = COUNT() BY @timestamp"),
            vec![series(SeriesType::Line, timestamp(), "Count", "count")],
        );
        let dataview = with_legend(
            "Events Over Time (Data View)",
            Dataset::index_with_time_field("logs-*", "@timestamp"),
            vec![series(
                SeriesType::Line,
                timestamp_histogram(),
                "Count",
                "count()",
            )],
        );

        writer
            .write_dual_fixture("xy-chart", &esql, &dataview, &last("7d"))
            .await?;
        Ok(())
    }
}

struct XyChartArea;

#[async_trait]
impl ExampleGenerator for XyChartArea {
    fn name(&self) -> &'static str {
        "xy-chart-area"
    }

    fn entry_point(&self) -> &'static str {
        "generateXYChartArea"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let esql = with_legend(
            "Events Over Time (Area)",
            Dataset::esql("FROM logs-* | STATS count = COUNT() BY @timestamp"),
            vec![series(SeriesType::Area, timestamp(), "Count", "count")],
        );
        let dataview = with_legend(
            "Events Over Time (Area, Data View)",
            Dataset::index_with_time_field("logs-*", "@timestamp"),
            vec![series(
                SeriesType::Area,
                timestamp_histogram(),
                "Count",
                "count()",
            )],
        );

        writer
            .write_dual_fixture("xy-chart-area", &esql, &dataview, &last("7d"))
            .await?;
        Ok(())
    }
}

struct XyChartAreaStacked;

#[async_trait]
impl ExampleGenerator for XyChartAreaStacked {
    fn name(&self) -> &'static str {
        "xy-chart-area-stacked"
    }

    fn entry_point(&self) -> &'static str {
        "generateXYChartAreaStacked"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let stacked = |x_axis: XAxis, value: &str| {
            XyLayer::Series(SeriesLayer {
                breakdown: Some("log.level".to_string()),
                ..SeriesLayer::new(
                    SeriesType::AreaStacked,
                    x_axis,
                    vec![YAxisValue::labeled("Count", value)],
                )
            })
        };

        let esql = with_legend(
            "Events by Status (Stacked Area)",
            Dataset::esql(
                "FROM logs-* | STATS count = COUNT() BY timestamp_bucket = BUCKET(@timestamp, 1 hour), log.level",
            ),
            vec![stacked(
                XAxis::Field("timestamp_bucket".to_string()),
                "count",
            )],
        );
        let dataview = with_legend(
            "Events by Status (Stacked Area, Data View)",
            Dataset::index_with_time_field("logs-*", "@timestamp"),
            vec![stacked(timestamp_histogram(), "count()")],
        );

        writer
            .write_dual_fixture("xy-chart-area-stacked", &esql, &dataview, &last("7d"))
            .await?;
        Ok(())
    }
}

struct XyChartBar;

#[async_trait]
impl ExampleGenerator for XyChartBar {
    fn name(&self) -> &'static str {
        "xy-chart-bar"
    }

    fn entry_point(&self) -> &'static str {
        "generateXYChartBar"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let esql = with_legend(
            "Events Over Time (Bar)",
            Dataset::esql("FROM logs-* | STATS count = COUNT() BY @timestamp"),
            vec![series(SeriesType::Bar, timestamp(), "Count", "count")],
        );
        let dataview = with_legend(
            "Events Over Time (Bar, Data View)",
            Dataset::index_with_time_field("logs-*", "@timestamp"),
            vec![series(
                SeriesType::Bar,
                timestamp_histogram(),
                "Count",
                "count()",
            )],
        );

        writer
            .write_dual_fixture("xy-chart-bar", &esql, &dataview, &last("7d"))
            .await?;
        Ok(())
    }
}

struct XyChartBarHorizontal;

#[async_trait]
impl ExampleGenerator for XyChartBarHorizontal {
    fn name(&self) -> &'static str {
        "xy-chart-bar-horizontal"
    }

    fn entry_point(&self) -> &'static str {
        "generateXYChartBarHorizontal"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let level = || XAxis::Field("log.level".to_string());
        let esql = with_legend(
            "Events by Log Level (Horizontal Bar)",
            Dataset::esql(
                "FROM logs-* | STATS count = COUNT() BY log.level | SORT count DESC | LIMIT 10",
            ),
            vec![series(SeriesType::BarHorizontal, level(), "Count", "count")],
        );
        let dataview = with_legend(
            "Events by Log Level (Horizontal Bar, Data View)",
            Dataset::index_with_time_field("logs-*", "@timestamp"),
            vec![series(SeriesType::BarHorizontal, level(), "Count", "count()")],
        );

        writer
            .write_dual_fixture("xy-chart-bar-horizontal", &esql, &dataview, &last("7d"))
            .await?;
        Ok(())
    }
}

struct XyChartBarStacked;

#[async_trait]
impl ExampleGenerator for XyChartBarStacked {
    fn name(&self) -> &'static str {
        "xy-chart-bar-stacked"
    }

    fn entry_point(&self) -> &'static str {
        "generateXYChartBarStacked"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let stacked = |x_axis: XAxis, value: &str| {
            XyLayer::Series(SeriesLayer {
                breakdown: Some("log.level".to_string()),
                ..SeriesLayer::new(
                    SeriesType::BarStacked,
                    x_axis,
                    vec![YAxisValue::labeled("Count", value)],
                )
            })
        };

        let esql = with_legend(
            "Events by Status (Stacked Bar)",
            Dataset::esql(
                "FROM logs-* | STATS count = COUNT() BY timestamp_bucket = BUCKET(@timestamp, 1 hour), log.level",
            ),
            vec![stacked(
                XAxis::Field("timestamp_bucket".to_string()),
                "count",
            )],
        );
        let dataview = with_legend(
            "Events by Status (Stacked Bar, Data View)",
            Dataset::index_with_time_field("logs-*", "@timestamp"),
            vec![stacked(timestamp_histogram(), "count()")],
        );

        writer
            .write_dual_fixture("xy-chart-bar-stacked", &esql, &dataview, &last("7d"))
            .await?;
        Ok(())
    }
}

struct XyChartMultiLayer;

#[async_trait]
impl ExampleGenerator for XyChartMultiLayer {
    fn name(&self) -> &'static str {
        "xy-chart-multi-layer"
    }

    fn entry_point(&self) -> &'static str {
        "generateXYChartMultiLayer"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let esql = with_legend(
            "Events with Success Rate Overlay",
            Dataset::esql(
                r#"FROM logs-* | STATS total = COUNT(), successes = COUNT(CASE WHEN response.keyword == "200" THEN 1 END) BY @timestamp"#,
            ),
            vec![
                series(SeriesType::Bar, timestamp(), "Total Events", "total"),
                series(SeriesType::Line, timestamp(), "Successful Events", "successes"),
            ],
        );
        let dataview = with_legend(
            "Events with Avg Bytes Overlay (Data View)",
            Dataset::index_with_time_field("logs-*", "@timestamp"),
            vec![
                series(
                    SeriesType::Bar,
                    timestamp_histogram(),
                    "Total Events",
                    "count()",
                ),
                series(
                    SeriesType::Line,
                    timestamp_histogram(),
                    "Avg Bytes",
                    "average(bytes)",
                ),
            ],
        );

        writer
            .write_dual_fixture("xy-chart-multi-layer", &esql, &dataview, &last("24h"))
            .await?;
        Ok(())
    }
}

struct XyChartAdvancedLine;

#[async_trait]
impl ExampleGenerator for XyChartAdvancedLine {
    fn name(&self) -> &'static str {
        "xy-chart-advanced-line"
    }

    fn entry_point(&self) -> &'static str {
        "generateXYChartAdvancedLine"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let legend = Some(Legend::shown(LegendPosition::Right));
        let esql = XyConfig {
            legend: legend.clone(),
            ..fitted(
                "Advanced Line Chart with Fitting Functions",
                Dataset::esql("FROM logs-* | STATS count = COUNT() BY @timestamp"),
                timestamp(),
                "count",
                "Average",
            )
        };
        let dataview = XyConfig {
            legend,
            ..fitted(
                "Advanced Line Chart (Data View)",
                Dataset::index_with_time_field("logs-*", "@timestamp"),
                timestamp_histogram(),
                "count()",
                "Average",
            )
        };

        writer
            .write_dual_fixture(
                "xy-chart-advanced-line",
                &ChartConfig::Xy(esql),
                &ChartConfig::Xy(dataview),
                &last("7d"),
            )
            .await?;
        Ok(())
    }
}

/// Value formats only apply to the data view variant; the ES|QL variant
/// carries the same series without them.
struct XyChartEsqlMetricAppearance;

#[async_trait]
impl ExampleGenerator for XyChartEsqlMetricAppearance {
    fn name(&self) -> &'static str {
        "xy-chart-esql-metric-appearance"
    }

    fn entry_point(&self) -> &'static str {
        "generateXYChartESQLMetricAppearance"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let bottom = |config: XyConfig| {
            ChartConfig::Xy(XyConfig {
                legend: Some(Legend::shown(LegendPosition::Bottom)),
                ..config
            })
        };
        let histogram_series = |series_type: SeriesType, value: YAxisValue| {
            XyLayer::Series(SeriesLayer::new(
                series_type,
                timestamp_histogram(),
                vec![value],
            ))
        };

        let esql = bottom(XyConfig::new(
            "ES|QL Multi-Metric Chart",
            Dataset::esql(
                "FROM logs-* | STATS event_count = COUNT(), total_bytes = SUM(bytes), avg_bytes = AVG(bytes) BY @timestamp",
            ),
            vec![
                series(SeriesType::Bar, timestamp(), "Event Count", "event_count"),
                series(SeriesType::Line, timestamp(), "Total Bytes", "total_bytes"),
                series(SeriesType::Line, timestamp(), "Avg Bytes", "avg_bytes"),
            ],
        ));
        let dataview = bottom(XyConfig::new(
            "Data View Multi-Metric with Formats",
            Dataset::index_with_time_field("logs-*", "@timestamp"),
            vec![
                histogram_series(
                    SeriesType::Bar,
                    formatted("Event Count", "count()", "number", "0,0"),
                ),
                histogram_series(
                    SeriesType::Line,
                    formatted("Total Bytes", "sum(bytes)", "bytes", "0,0.0 b"),
                ),
                histogram_series(
                    SeriesType::Line,
                    formatted("Avg Bytes", "average(bytes)", "bytes", "0.00 b"),
                ),
            ],
        ));

        writer
            .write_dual_fixture(
                "xy-chart-esql-metric-appearance",
                &esql,
                &dataview,
                &last("24h"),
            )
            .await?;
        Ok(())
    }
}

struct XyChartValueLabels;

#[async_trait]
impl ExampleGenerator for XyChartValueLabels {
    fn name(&self) -> &'static str {
        "xy-chart-value-labels"
    }

    fn entry_point(&self) -> &'static str {
        "generateXYChartValueLabels"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let labeled = |title: &str, dataset: Dataset, value: &str| {
            let level = XAxis::Field("log.level".to_string());
            ChartConfig::Xy(XyConfig {
                legend: Some(Legend::shown(LegendPosition::Right)),
                value_labels: Some("show".to_string()),
                ..XyConfig::new(
                    title,
                    dataset,
                    vec![series(SeriesType::Bar, level, "Count", value)],
                )
            })
        };

        let esql = labeled(
            "Events with Value Labels",
            Dataset::esql(
                "FROM logs-* | STATS count = COUNT() BY log.level | SORT count DESC | LIMIT 10",
            ),
            "count",
        );
        let dataview = labeled(
            "Events with Value Labels (Data View)",
            Dataset::index_with_time_field("logs-*", "@timestamp"),
            "count()",
        );

        writer
            .write_dual_fixture("xy-chart-value-labels", &esql, &dataview, &last("7d"))
            .await?;
        Ok(())
    }
}

/// Linear fitting on the ES|QL variant, average on the data view variant.
struct XyLineFittingFunctions;

#[async_trait]
impl ExampleGenerator for XyLineFittingFunctions {
    fn name(&self) -> &'static str {
        "xy-line-fitting-functions"
    }

    fn entry_point(&self) -> &'static str {
        "generateLineFittingFunctions"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let esql = fitted(
            "Line Chart - Linear Fitting",
            Dataset::esql("FROM logs-* | STATS count = COUNT() BY @timestamp"),
            timestamp(),
            "count",
            "Linear",
        );
        let dataview = fitted(
            "Line Chart - Average Fitting (Data View)",
            Dataset::index_with_time_field("logs-*", "@timestamp"),
            timestamp_histogram(),
            "count()",
            "Average",
        );

        writer
            .write_dual_fixture(
                "xy-line-fitting-functions",
                &ChartConfig::Xy(esql),
                &ChartConfig::Xy(dataview),
                &last("7d"),
            )
            .await?;
        Ok(())
    }
}

/// Catalog-only: reference lines need a data view dataset.
struct XyChartWithReferenceLine;

#[async_trait]
impl ExampleGenerator for XyChartWithReferenceLine {
    fn name(&self) -> &'static str {
        "xy-chart-with-reference-line"
    }

    fn entry_point(&self) -> &'static str {
        "generateXYChartWithReferenceLine"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let threshold = YAxisValue {
            color: Some("#FF0000".to_string()),
            ..YAxisValue::labeled("SLA Threshold", "500")
        };
        let config = with_legend(
            "Response Time with SLA Threshold",
            Dataset::index_with_time_field("metrics-*", "@timestamp"),
            vec![
                series(
                    SeriesType::Line,
                    timestamp_histogram(),
                    "Average Response Time",
                    "average(response_time)",
                ),
                XyLayer::Reference(ReferenceLayer {
                    y_axis: vec![threshold],
                }),
            ],
        );

        writer
            .write_fixture("xy-chart-with-reference-line.json", &config, &last("24h"))
            .await?;
        Ok(())
    }
}

/// Catalog-only: annotation layers need a data view dataset.
struct XyChartWithAnnotations;

#[async_trait]
impl ExampleGenerator for XyChartWithAnnotations {
    fn name(&self) -> &'static str {
        "xy-chart-with-annotations"
    }

    fn entry_point(&self) -> &'static str {
        "generateXYChartWithAnnotations"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let config = with_legend(
            "Response Time with Event Annotations",
            Dataset::index_with_time_field("metrics-*", "@timestamp"),
            vec![
                series(
                    SeriesType::Line,
                    timestamp_histogram(),
                    "Average Response Time",
                    "average(response_time)",
                ),
                XyLayer::Annotation(AnnotationLayer {
                    y_axis: Vec::new(),
                    events: vec![AnnotationEvent {
                        name: "Deployment".to_string(),
                        datetime: "2024-01-15T12:00:00.000Z".to_string(),
                        color: Some("#0077CC".to_string()),
                        icon: Some("tag".to_string()),
                    }],
                }),
            ],
        );

        writer
            .write_fixture("xy-chart-with-annotations.json", &config, &last("24h"))
            .await?;
        Ok(())
    }
}
