use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use lensfix_core::{
    BuildOptions, CatalogService, ChartConfig, Dataset, TableConfig, TimeRange,
};
use lensfix_generate::{FixtureError, FixtureWriter, LensAttributesBuilder, OutputLayout};

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("lensfix_writer_{label}_{}", uuid::Uuid::new_v4()));
    dir
}

fn writer_at(root: &PathBuf) -> FixtureWriter {
    FixtureWriter::new(
        Arc::new(LensAttributesBuilder::new()),
        OutputLayout::new(root, "v9.2.0"),
    )
}

fn agent_table() -> ChartConfig {
    ChartConfig::Table(TableConfig {
        breakdown: vec!["agent.version".to_string()],
        ..TableConfig::new(
            "Agent Status Table",
            Dataset::index("metrics-*"),
            "count(agent.name)",
        )
    })
}

#[tokio::test]
async fn rejects_escaping_filenames_without_writing() {
    let root = temp_out_dir("invalid");
    let writer = writer_at(&root);

    for name in ["", "..", "../escape.json", "nested/x.json", "a\\b.json", "nul\0.json", "/abs.json"] {
        let err = writer
            .write_fixture(name, &agent_table(), &BuildOptions::default())
            .await
            .expect_err("invalid filename");
        assert!(matches!(err, FixtureError::InvalidOutputPath(_)), "{name:?}");
    }

    assert!(!root.exists(), "no directory should be created");
    assert!(writer.catalog().cache().is_empty(), "no build should run");
}

#[tokio::test]
async fn writes_catalog_table_fixture() {
    let root = temp_out_dir("table");
    let writer = writer_at(&root);
    let options = BuildOptions::with_time_range(TimeRange::last("24h"));

    let path = writer
        .write_fixture("agent-table-dataview.json", &agent_table(), &options)
        .await
        .expect("write fixture");

    assert_eq!(path, root.join("v9.2.0").join("agent-table-dataview.json"));

    let contents = fs::read_to_string(&path).expect("read fixture");
    assert!(contents.contains("\n  "), "fixture should be pretty printed");
    let value: serde_json::Value = serde_json::from_str(&contents).expect("parse fixture");
    assert_eq!(value["title"], "Agent Status Table");
    assert_eq!(value["visualizationType"], "lnsDatatable");
    assert_eq!(value["references"][0]["id"], "metrics-*");

    let entries = writer.catalog().find("").await;
    assert!(entries.iter().any(|entry| entry.id == "metrics-*"));
}

#[tokio::test]
async fn overwrites_existing_fixture_and_tolerates_existing_dir() {
    let root = temp_out_dir("overwrite");
    let version_dir = root.join("v9.2.0");
    fs::create_dir_all(&version_dir).expect("create version dir");
    fs::write(version_dir.join("table.json"), "stale").expect("seed file");

    let writer = writer_at(&root);
    writer
        .write_fixture("table.json", &agent_table(), &BuildOptions::default())
        .await
        .expect("write fixture");

    let contents = fs::read_to_string(version_dir.join("table.json")).expect("read fixture");
    assert_ne!(contents, "stale");
    assert!(contents.contains("Agent Status Table"));
}

#[tokio::test]
async fn io_failure_leaves_no_temp_file() {
    let root = temp_out_dir("io_failure");
    let version_dir = root.join("v9.2.0");
    fs::create_dir_all(version_dir.join("table.json")).expect("occupy target with a dir");

    let writer = writer_at(&root);
    let err = writer
        .write_fixture("table.json", &agent_table(), &BuildOptions::default())
        .await
        .expect_err("target is a directory");
    assert!(matches!(err, FixtureError::Io { .. }));

    let mut names: Vec<String> = fs::read_dir(&version_dir)
        .expect("read version dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["table.json".to_string()]);
}

#[tokio::test]
async fn build_failure_writes_nothing() {
    let root = temp_out_dir("build_failure");
    let writer = writer_at(&root);
    let config = ChartConfig::Table(TableConfig::new(
        "",
        Dataset::index("metrics-*"),
        "count()",
    ));

    let err = writer
        .write_fixture("untitled.json", &config, &BuildOptions::default())
        .await
        .expect_err("empty title");

    assert!(matches!(err, FixtureError::Build { .. }));
    assert!(!root.join("v9.2.0").join("untitled.json").exists());
}

#[tokio::test]
async fn each_write_starts_from_a_cleared_catalog() {
    let root = temp_out_dir("cleared");
    let writer = writer_at(&root);

    writer
        .write_fixture("metrics.json", &agent_table(), &BuildOptions::default())
        .await
        .expect("first write");
    let logs = ChartConfig::Table(TableConfig::new(
        "Log Count",
        Dataset::index("logs-*"),
        "count()",
    ));
    writer
        .write_fixture("logs.json", &logs, &BuildOptions::default())
        .await
        .expect("second write");

    let ids: Vec<String> = writer
        .catalog()
        .find("")
        .await
        .iter()
        .map(|entry| entry.id.clone())
        .collect();
    assert_eq!(ids, vec!["logs-*".to_string()]);
}
