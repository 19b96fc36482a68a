//! Fault-tolerant batch execution over the example registry.

use regex::Regex;
use tracing::{error, info};

use crate::registry::{ENTRY_POINT_PREFIX, ExampleRegistry};
use crate::writer::FixtureWriter;

/// One example that did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleFailure {
    pub name: String,
    pub reason: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    /// Display names of the examples that completed, in run order.
    pub generated: Vec<String>,
    pub failed: Vec<ExampleFailure>,
}

impl BatchSummary {
    /// A batch succeeds when at least one example completed.
    pub fn is_success(&self) -> bool {
        self.succeeded > 0
    }
}

/// Runs registered examples sequentially, recording failures without aborting.
pub struct BatchOrchestrator {
    registry: ExampleRegistry,
    writer: FixtureWriter,
}

impl BatchOrchestrator {
    pub fn new(registry: ExampleRegistry, writer: FixtureWriter) -> Self {
        Self { registry, writer }
    }

    pub fn registry(&self) -> &ExampleRegistry {
        &self.registry
    }

    pub fn writer(&self) -> &FixtureWriter {
        &self.writer
    }

    pub async fn run_all(&self) -> BatchSummary {
        let names: Vec<String> = self
            .registry
            .names()
            .into_iter()
            .map(str::to_string)
            .collect();
        self.run_names(names).await
    }

    /// Run the named examples in sorted order; unknown names are recorded as
    /// discovery failures.
    pub async fn run_selected<S: AsRef<str>>(&self, names: &[S]) -> BatchSummary {
        let mut names: Vec<String> = names.iter().map(|name| name.as_ref().to_string()).collect();
        names.sort();
        names.dedup();
        self.run_names(names).await
    }

    async fn run_names(&self, names: Vec<String>) -> BatchSummary {
        let mut summary = BatchSummary {
            total: names.len(),
            ..BatchSummary::default()
        };

        for name in names {
            let result = match self.registry.resolve(&name) {
                Ok(example) => example
                    .generate(&self.writer)
                    .await
                    .map(|()| format_display_name(example.entry_point())),
                Err(err) => Err(err),
            };

            match result {
                Ok(display_name) => {
                    info!(
                        event = "example_generated",
                        example = %name,
                        display_name = %display_name,
                        "example generated"
                    );
                    summary.succeeded += 1;
                    summary.generated.push(display_name);
                }
                Err(err) => {
                    error!(
                        event = "example_failed",
                        example = %name,
                        error = %err,
                        "example failed"
                    );
                    summary.failed.push(ExampleFailure {
                        name,
                        reason: err.to_string(),
                    });
                }
            }
        }

        summary
    }
}

/// Human-readable name for an entry point.
///
/// `generateMetricBasic` becomes `Metric (Basic)`. Only a lowercase letter
/// followed by a capital starts a new word, so `generateXYChartBar` becomes
/// `XYChart (Bar)`.
pub fn format_display_name(entry_point: &str) -> String {
    let trimmed = entry_point
        .strip_prefix(ENTRY_POINT_PREFIX)
        .unwrap_or(entry_point);
    let spaced = split_humps(trimmed);
    let spaced = spaced.trim();

    match spaced.split_once(char::is_whitespace) {
        Some((first, rest)) if !rest.trim().is_empty() => {
            format!("{first} ({})", rest.trim())
        }
        _ => spaced.to_string(),
    }
}

fn split_humps(value: &str) -> String {
    match Regex::new(r"([a-z])([A-Z])") {
        Ok(re) => re.replace_all(value, "$1 $2").into_owned(),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_display_names() {
        assert_eq!(format_display_name("generateMetricBasic"), "Metric (Basic)");
        assert_eq!(format_display_name("generateGauge"), "Gauge");
        assert_eq!(
            format_display_name("generatePieChartNestedLegend"),
            "Pie (Chart Nested Legend)"
        );
        assert_eq!(
            format_display_name("generateXYChartWithReferenceLine"),
            "XYChart (With Reference Line)"
        );
    }

    #[test]
    fn display_name_without_prefix_is_kept() {
        assert_eq!(format_display_name("buildThing"), "build (Thing)");
        assert_eq!(format_display_name(""), "");
    }

    #[test]
    fn empty_summary_is_failure() {
        assert!(!BatchSummary::default().is_success());
    }
}
