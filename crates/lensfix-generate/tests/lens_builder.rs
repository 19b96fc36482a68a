use lensfix_core::{
    BuildOptions, CatalogService, ChartConfig, Dataset, GaugeConfig, MetricConfig,
    MockCatalogService, SeriesLayer, SeriesType, TableConfig, TimeRange, ValueFormat, XAxis,
    XyConfig, XyLayer, YAxisValue,
};
use serde_json::json;
use lensfix_generate::{BuildError, ConfigBuilder, LensAttributesBuilder};

#[tokio::test]
async fn catalog_table_resolves_fields_through_catalog() {
    let catalog = MockCatalogService::default();
    let config = ChartConfig::Table(TableConfig {
        breakdown: vec!["agent.version".to_string()],
        ..TableConfig::new("Agents", Dataset::index("metrics-*"), "count(agent.name)")
    });

    let attributes = LensAttributesBuilder::new()
        .build(&config, &BuildOptions::default(), &catalog)
        .await
        .expect("build table");

    let layer = &attributes["state"]["datasourceStates"]["formBased"]["layers"]["layer_0"];
    assert_eq!(layer["indexPatternId"], "metrics-*");
    assert_eq!(
        layer["columnOrder"],
        serde_json::json!(["layer_0_dimension_0", "layer_0_metric_0"])
    );
    let metric = &layer["columns"]["layer_0_metric_0"];
    assert_eq!(metric["operationType"], "count");
    assert_eq!(metric["sourceField"], "agent.name");
    assert_eq!(metric["dataType"], "number");
    assert_eq!(
        attributes["references"][0]["name"],
        "indexpattern-datasource-layer-layer_0"
    );

    let entry = catalog.find("").await;
    assert_eq!(entry.len(), 1);
    assert!(entry[0].fields.len() >= 2, "fields are materialized lazily");
}

#[tokio::test]
async fn date_dimensions_use_histograms() {
    let catalog = MockCatalogService::default();
    let config = ChartConfig::Xy(XyConfig::new(
        "Events",
        Dataset::index_with_time_field("logs-*", "@timestamp"),
        vec![XyLayer::Series(SeriesLayer::new(
            SeriesType::Bar,
            XAxis::date_histogram("@timestamp"),
            vec![YAxisValue::labeled("Count", "count()")],
        ))],
    ));

    let attributes = LensAttributesBuilder::new()
        .build(&config, &BuildOptions::default(), &catalog)
        .await
        .expect("build xy");

    let columns = &attributes["state"]["datasourceStates"]["formBased"]["layers"]["layer_0"]["columns"];
    assert_eq!(columns["layer_0_dimension_0"]["operationType"], "date_histogram");
    assert_eq!(columns["layer_0_metric_0"]["sourceField"], "___records___");
    assert_eq!(attributes["visualizationType"], "lnsXY");
    assert_eq!(
        attributes["state"]["visualization"]["layers"][0]["seriesType"],
        "bar"
    );
}

#[tokio::test]
async fn esql_gauge_uses_text_based_layers() {
    let catalog = MockCatalogService::default();
    let config = ChartConfig::Gauge(GaugeConfig {
        query_max_value: Some("1".to_string()),
        ..GaugeConfig::new(
            "CPU",
            Dataset::esql("FROM metrics-* | STATS avg_cpu = AVG(system.cpu.total.pct)"),
            "avg_cpu",
        )
    });

    let attributes = LensAttributesBuilder::new()
        .build(&config, &BuildOptions::default(), &catalog)
        .await
        .expect("build gauge");

    let layer = &attributes["state"]["datasourceStates"]["textBased"]["layers"]["layer_0"];
    assert_eq!(layer["columns"][0]["fieldName"], "avg_cpu");
    assert_eq!(layer["columns"][1]["label"], "max");
    assert_eq!(attributes["references"], serde_json::json!([]));
    assert!(catalog.find("").await.is_empty(), "queries never touch the catalog");
}

#[tokio::test]
async fn embeddable_output_wraps_attributes() {
    let catalog = MockCatalogService::default();
    let config = ChartConfig::Metric(MetricConfig::new(
        "Count",
        Dataset::index("logs-*"),
        "count()",
    ));
    let options = BuildOptions {
        time_range: Some(TimeRange::last("15m")),
        embeddable: true,
    };

    let input = LensAttributesBuilder::new()
        .build(&config, &options, &catalog)
        .await
        .expect("build metric");

    assert_eq!(input["attributes"]["title"], "Count");
    assert_eq!(input["references"][0]["id"], "logs-*");
    assert_eq!(input["timeRange"]["from"], "now-15m");
    assert_eq!(input["timeRange"]["type"], "relative");
}

#[tokio::test]
async fn esql_trend_line_is_unsupported() {
    let catalog = MockCatalogService::default();
    let config = ChartConfig::Metric(MetricConfig {
        trend_line: Some(true),
        ..MetricConfig::new("Trend", Dataset::esql("FROM logs-* | STATS c = COUNT()"), "c")
    });

    let err = LensAttributesBuilder::new()
        .build(&config, &BuildOptions::default(), &catalog)
        .await
        .expect_err("trend line on esql");
    assert!(matches!(err, BuildError::Unsupported(_)));
}

#[tokio::test]
async fn blank_query_is_invalid() {
    let catalog = MockCatalogService::default();
    let config = ChartConfig::Metric(MetricConfig::new("Blank", Dataset::esql("  "), "c"));

    let err = LensAttributesBuilder::new()
        .build(&config, &BuildOptions::default(), &catalog)
        .await
        .expect_err("blank query");
    assert!(matches!(err, BuildError::Invalid(_)));
}

#[tokio::test]
async fn value_formats_land_in_catalog_columns() {
    let catalog = MockCatalogService::default();
    let bytes = YAxisValue {
        format: Some(ValueFormat {
            id: "bytes".to_string(),
            params: Some(json!({ "pattern": "0.00 b" })),
        }),
        ..YAxisValue::labeled("Avg Bytes", "average(bytes)")
    };
    let config = ChartConfig::Xy(XyConfig {
        fitting_function: Some("Average".to_string()),
        emphasize_fitting: Some(true),
        value_labels: Some("show".to_string()),
        ..XyConfig::new(
            "Bytes",
            Dataset::index_with_time_field("logs-*", "@timestamp"),
            vec![XyLayer::Series(SeriesLayer::new(
                SeriesType::AreaStacked,
                XAxis::date_histogram("@timestamp"),
                vec![bytes],
            ))],
        )
    });

    let attributes = LensAttributesBuilder::new()
        .build(&config, &BuildOptions::default(), &catalog)
        .await
        .expect("build xy");

    let column = &attributes["state"]["datasourceStates"]["formBased"]["layers"]["layer_0"]
        ["columns"]["layer_0_metric_0"];
    assert_eq!(column["operationType"], "average");
    assert_eq!(column["params"]["format"]["id"], "bytes");
    assert_eq!(column["params"]["format"]["params"]["pattern"], "0.00 b");

    let visualization = &attributes["state"]["visualization"];
    assert_eq!(visualization["layers"][0]["seriesType"], "area_stacked");
    assert_eq!(visualization["options"]["fittingFunction"], "Average");
    assert_eq!(visualization["options"]["emphasizeFitting"], true);
    assert_eq!(visualization["options"]["valueLabels"], "show");
}
