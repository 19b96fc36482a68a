use std::path::PathBuf;
use std::sync::Arc;

use lensfix_core::{
    BuildOptions, ChartConfig, Dataset, ReferenceLayer, SeriesLayer, SeriesType, XAxis, XyConfig,
    XyLayer, YAxisValue,
};
use lensfix_generate::{FixtureError, FixtureWriter, LensAttributesBuilder, OutputLayout};

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("lensfix_dual_{label}_{}", uuid::Uuid::new_v4()));
    dir
}

fn writer_at(root: &PathBuf) -> FixtureWriter {
    FixtureWriter::new(
        Arc::new(LensAttributesBuilder::new()),
        OutputLayout::new(root, "v-test"),
    )
}

fn with_threshold(dataset: Dataset, x_axis: XAxis, value: &str) -> ChartConfig {
    ChartConfig::Xy(XyConfig::new(
        "Latency",
        dataset,
        vec![
            XyLayer::Series(SeriesLayer::new(
                SeriesType::Line,
                x_axis,
                vec![YAxisValue::labeled("Latency", value)],
            )),
            XyLayer::Reference(ReferenceLayer {
                y_axis: vec![YAxisValue::labeled("SLA", "500")],
            }),
        ],
    ))
}

#[tokio::test]
async fn writes_both_variants() {
    let root = temp_out_dir("both");
    let writer = writer_at(&root);
    let esql = ChartConfig::Xy(XyConfig::new(
        "Events",
        Dataset::esql("FROM logs-* | STATS count = COUNT() BY @timestamp"),
        vec![XyLayer::Series(SeriesLayer::new(
            SeriesType::Line,
            XAxis::Field("@timestamp".to_string()),
            vec![YAxisValue::labeled("Count", "count")],
        ))],
    ));
    let dataview = with_threshold(
        Dataset::index_with_time_field("logs-*", "@timestamp"),
        XAxis::date_histogram("@timestamp"),
        "count()",
    );

    let fixture = writer
        .write_dual_fixture("events", &esql, &dataview, &BuildOptions::default())
        .await
        .expect("dual fixture");

    assert_eq!(fixture.esql, root.join("v-test").join("events-esql.json"));
    assert_eq!(fixture.dataview, root.join("v-test").join("events-dataview.json"));
    assert!(fixture.esql.exists());
    assert!(fixture.dataview.exists());
}

#[tokio::test]
async fn failing_esql_variant_keeps_dataview_file() {
    let root = temp_out_dir("partial");
    let writer = writer_at(&root);
    let esql = with_threshold(
        Dataset::esql("FROM metrics-* | STATS latency = AVG(response_time) BY @timestamp"),
        XAxis::Field("@timestamp".to_string()),
        "latency",
    );
    let dataview = with_threshold(
        Dataset::index_with_time_field("metrics-*", "@timestamp"),
        XAxis::date_histogram("@timestamp"),
        "average(response_time)",
    );

    let err = writer
        .write_dual_fixture("latency", &esql, &dataview, &BuildOptions::default())
        .await
        .expect_err("esql variant should fail");

    let FixtureError::DualVariant { base_name, failures } = &err else {
        panic!("expected a dual variant error, got {err}");
    };
    assert_eq!(base_name, "latency");
    assert_eq!(failures.len(), 1);
    assert!(failures[0].starts_with("ES|QL variant:"));
    assert!(err.to_string().contains("ES|QL variant"));

    assert!(!root.join("v-test").join("latency-esql.json").exists());
    let dataview_path = root.join("v-test").join("latency-dataview.json");
    let contents = std::fs::read_to_string(&dataview_path).expect("read dataview fixture");
    let value: serde_json::Value = serde_json::from_str(&contents).expect("parse fixture");
    assert_eq!(value["title"], "Latency");
    assert_eq!(value["references"][0]["id"], "metrics-*");
}

#[tokio::test]
async fn both_failures_are_reported() {
    let root = temp_out_dir("both_fail");
    let writer = writer_at(&root);
    let broken = ChartConfig::Xy(XyConfig::new("Empty", Dataset::index("logs-*"), Vec::new()));
    let esql = with_threshold(
        Dataset::esql("FROM logs-*"),
        XAxis::Field("@timestamp".to_string()),
        "count",
    );

    let err = writer
        .write_dual_fixture("broken", &esql, &broken, &BuildOptions::default())
        .await
        .expect_err("both variants fail");

    let message = err.to_string();
    assert!(message.starts_with("failed to generate broken"));
    assert!(message.contains("ES|QL variant"));
    assert!(message.contains("Data View variant"));
}
