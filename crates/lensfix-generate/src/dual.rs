//! Paired ES|QL and catalog-backed fixtures from one base name.

use std::path::PathBuf;

use lensfix_core::{BuildOptions, ChartConfig};
use tracing::warn;

use crate::errors::FixtureError;
use crate::writer::FixtureWriter;

/// Paths of both variants of a dual fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualFixture {
    pub esql: PathBuf,
    pub dataview: PathBuf,
}

impl FixtureWriter {
    /// Write `<base>-esql.json` then `<base>-dataview.json`.
    ///
    /// Both variants are always attempted; a failure in one does not undo the
    /// other, and the combined error names every failed variant.
    pub async fn write_dual_fixture(
        &self,
        base_name: &str,
        esql: &ChartConfig,
        dataview: &ChartConfig,
        options: &BuildOptions,
    ) -> Result<DualFixture, FixtureError> {
        let esql_result = self
            .write_fixture(&format!("{base_name}-esql.json"), esql, options)
            .await;
        let dataview_result = self
            .write_fixture(&format!("{base_name}-dataview.json"), dataview, options)
            .await;

        match (esql_result, dataview_result) {
            (Ok(esql), Ok(dataview)) => Ok(DualFixture { esql, dataview }),
            (esql_result, dataview_result) => {
                let mut failures = Vec::new();
                if let Err(err) = esql_result {
                    failures.push(format!("ES|QL variant: {err}"));
                }
                if let Err(err) = dataview_result {
                    failures.push(format!("Data View variant: {err}"));
                }
                warn!(
                    event = "dual_fixture_failed",
                    fixture = base_name,
                    failures = failures.len(),
                    "dual fixture incomplete"
                );
                Err(FixtureError::DualVariant {
                    base_name: base_name.to_string(),
                    failures,
                })
            }
        }
    }
}
