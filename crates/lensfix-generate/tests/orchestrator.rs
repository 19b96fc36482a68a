use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use lensfix_core::{BuildOptions, ChartConfig, Dataset, MetricConfig};
use lensfix_generate::{
    BatchOrchestrator, ExampleGenerator, ExampleRegistry, FixtureError, FixtureWriter,
    LensAttributesBuilder, OutputLayout,
};

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("lensfix_batch_{label}_{}", uuid::Uuid::new_v4()));
    dir
}

fn read_fixture(path: PathBuf) -> serde_json::Value {
    let contents = std::fs::read_to_string(&path).expect("read fixture");
    serde_json::from_str(&contents).expect("parse fixture")
}

fn writer_at(root: &PathBuf) -> FixtureWriter {
    FixtureWriter::new(
        Arc::new(LensAttributesBuilder::new()),
        OutputLayout::new(root, "v9.2.0"),
    )
}

struct CountMetric {
    name: &'static str,
    entry_point: &'static str,
    title: &'static str,
}

#[async_trait]
impl ExampleGenerator for CountMetric {
    fn name(&self) -> &'static str {
        self.name
    }

    fn entry_point(&self) -> &'static str {
        self.entry_point
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let config = ChartConfig::Metric(MetricConfig::new(
            self.title,
            Dataset::index("logs-*"),
            "count()",
        ));
        writer
            .write_fixture(&format!("{}.json", self.name), &config, &BuildOptions::default())
            .await?;
        Ok(())
    }
}

fn example(name: &'static str, entry_point: &'static str, title: &'static str) -> Box<CountMetric> {
    Box::new(CountMetric {
        name,
        entry_point,
        title,
    })
}

fn registry_with_one_broken() -> ExampleRegistry {
    let mut registry = ExampleRegistry::new();
    registry.register(example("metric-a", "generateMetricA", "Metric A"));
    registry.register(example("metric-b", "generateMetricB", "Metric B"));
    // Empty titles are rejected by the builder.
    registry.register(example("metric-broken", "generateMetricBroken", ""));
    registry.register(example("metric-c", "generateMetricC", "Metric C"));
    registry
}

#[tokio::test]
async fn broken_example_does_not_abort_batch() {
    let root = temp_out_dir("one_broken");
    let orchestrator = BatchOrchestrator::new(registry_with_one_broken(), writer_at(&root));

    let summary = orchestrator.run_all().await;

    assert_eq!(summary.total, 4);
    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].name, "metric-broken");
    assert!(summary.failed[0].reason.contains("metric-broken.json"));
    assert!(summary.is_success());
    assert_eq!(
        summary.generated,
        vec!["Metric (A)", "Metric (B)", "Metric (C)"]
    );

    for name in ["metric-a", "metric-b", "metric-c"] {
        assert!(root.join("v9.2.0").join(format!("{name}.json")).exists(), "{name}");
    }
    assert!(!root.join("v9.2.0").join("metric-broken.json").exists());
}

#[tokio::test]
async fn entry_point_without_prefix_is_a_discovery_failure() {
    let root = temp_out_dir("discovery");
    let mut registry = ExampleRegistry::new();
    registry.register(example("metric-a", "generateMetricA", "Metric A"));
    registry.register(example("metric-odd", "buildMetricOdd", "Metric Odd"));
    let orchestrator = BatchOrchestrator::new(registry, writer_at(&root));

    let summary = orchestrator.run_all().await;

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed.len(), 1);
    assert!(summary.failed[0].reason.starts_with("no generator found for metric-odd"));
    assert!(!root.join("v9.2.0").join("metric-odd.json").exists());
}

#[tokio::test]
async fn selected_run_reports_unknown_names() {
    let root = temp_out_dir("selected");
    let orchestrator = BatchOrchestrator::new(registry_with_one_broken(), writer_at(&root));

    let summary = orchestrator
        .run_selected(&["metric-c", "missing", "metric-a", "metric-c"])
        .await;

    assert_eq!(summary.total, 3);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.generated, vec!["Metric (A)", "Metric (C)"]);
    assert_eq!(summary.failed[0].name, "missing");
    assert!(!root.join("v9.2.0").join("metric-b.json").exists());
}

#[tokio::test]
async fn all_failures_or_empty_batch_is_not_success() {
    let root = temp_out_dir("all_fail");
    let mut registry = ExampleRegistry::new();
    registry.register(example("broken", "generateBroken", ""));
    let orchestrator = BatchOrchestrator::new(registry, writer_at(&root));
    assert!(!orchestrator.run_all().await.is_success());

    let empty = BatchOrchestrator::new(ExampleRegistry::new(), writer_at(&root));
    let summary = empty.run_all().await;
    assert_eq!(summary.total, 0);
    assert!(!summary.is_success());
}

#[test]
fn builtin_registry_is_sorted_and_well_named() {
    let registry = ExampleRegistry::builtin();
    let names = registry.names();

    assert!(!registry.is_empty());
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert_eq!(registry.len(), 34);
    assert!(names.contains(&"datatable-user-test"));
    assert!(names.contains(&"xy-line-fitting-functions"));
    assert!(names.contains(&"xy-chart-with-reference-line"));

    for name in names {
        assert!(registry.resolve(name).is_ok(), "{name}");
    }
}

#[tokio::test]
async fn builtin_gallery_generates_every_example() {
    let root = temp_out_dir("gallery");
    let orchestrator = BatchOrchestrator::new(ExampleRegistry::builtin(), writer_at(&root));

    let summary = orchestrator.run_all().await;

    assert!(summary.failed.is_empty(), "{:?}", summary.failed);
    assert_eq!(summary.succeeded, orchestrator.registry().len());
    let version_dir = root.join("v9.2.0");
    assert!(version_dir.join("datatable-user-test.json").exists());
    assert!(version_dir.join("gauge-esql.json").exists());
    assert!(version_dir.join("gauge-dataview.json").exists());
    assert!(version_dir.join("xy-chart-with-annotations.json").exists());

    let bullet = read_fixture(version_dir.join("gauge-vertical-bullet-dataview.json"));
    assert_eq!(bullet["state"]["visualization"]["options"]["shape"], "verticalBullet");

    let stats = read_fixture(version_dir.join("pie-chart-legend-stats.json"));
    assert_eq!(
        stats["state"]["visualization"]["options"]["legend"]["legendStats"][1],
        "average"
    );
    assert!(!version_dir.join("pie-chart-legend-stats-esql.json").exists());

    let horizontal = read_fixture(version_dir.join("xy-chart-bar-horizontal-esql.json"));
    assert_eq!(
        horizontal["state"]["visualization"]["layers"][0]["seriesType"],
        "bar_horizontal"
    );

    let fitted = read_fixture(version_dir.join("xy-line-fitting-functions-esql.json"));
    assert_eq!(fitted["state"]["visualization"]["options"]["fittingFunction"], "Linear");

    let formatted = read_fixture(version_dir.join("xy-chart-esql-metric-appearance-dataview.json"));
    let columns = &formatted["state"]["datasourceStates"]["formBased"]["layers"]["layer_1"]["columns"];
    assert_eq!(columns["layer_1_metric_0"]["params"]["format"]["id"], "bytes");
}
