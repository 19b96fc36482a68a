use async_trait::async_trait;
use lensfix_core::{ChartConfig, Dataset, TableConfig};

use super::last;
use crate::errors::FixtureError;
use crate::registry::{ExampleGenerator, ExampleRegistry};
use crate::writer::FixtureWriter;

pub fn register(registry: &mut ExampleRegistry) {
    registry.register(Box::new(DatatableUserTest));
    registry.register(Box::new(DatatableWithSplit));
    registry.register(Box::new(DatatableMultiColumn));
}

struct DatatableUserTest;

#[async_trait]
impl ExampleGenerator for DatatableUserTest {
    fn name(&self) -> &'static str {
        "datatable-user-test"
    }

    fn entry_point(&self) -> &'static str {
        "generateDatatableUserTest"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let config = ChartConfig::Table(TableConfig {
            breakdown: vec!["agent.version".to_string()],
            ..TableConfig::new(
                "Agent Status Table",
                Dataset::index("metrics-*"),
                "count(agent.name)",
            )
        });

        writer
            .write_fixture("datatable-user-test.json", &config, &last("24h"))
            .await?;
        Ok(())
    }
}

struct DatatableWithSplit;

#[async_trait]
impl ExampleGenerator for DatatableWithSplit {
    fn name(&self) -> &'static str {
        "datatable-with-split"
    }

    fn entry_point(&self) -> &'static str {
        "generateDatatableWithSplit"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let split = |config: TableConfig| {
            ChartConfig::Table(TableConfig {
                split_by: vec!["agent.version".to_string()],
                breakdown: vec!["agent.name".to_string()],
                ..config
            })
        };

        let esql = split(TableConfig::new(
            "Agent Performance by Version",
            Dataset::esql(
                "FROM metrics-* | STATS count = COUNT() BY agent.version, agent.name | SORT count DESC",
            ),
            "count",
        ));
        let dataview = split(TableConfig::new(
            "Agent Performance by Version (Data View)",
            Dataset::index_with_time_field("metrics-*", "@timestamp"),
            "count()",
        ));

        writer
            .write_dual_fixture("datatable-with-split", &esql, &dataview, &last("24h"))
            .await?;
        Ok(())
    }
}

struct DatatableMultiColumn;

#[async_trait]
impl ExampleGenerator for DatatableMultiColumn {
    fn name(&self) -> &'static str {
        "datatable-multi-column"
    }

    fn entry_point(&self) -> &'static str {
        "generateDatatableMultiColumn"
    }

    async fn generate(&self, writer: &FixtureWriter) -> Result<(), FixtureError> {
        let breakdown = vec!["log.level".to_string(), "source.ip".to_string()];

        let esql = ChartConfig::Table(TableConfig {
            breakdown: breakdown.clone(),
            ..TableConfig::new(
                "Log Events by Source and Level",
                Dataset::esql(
                    "FROM logs-* | STATS count = COUNT() BY log.level, source.ip | SORT count DESC | LIMIT 100",
                ),
                "count",
            )
        });
        let dataview = ChartConfig::Table(TableConfig {
            breakdown,
            ..TableConfig::new(
                "Log Events by Source and Level (Data View)",
                Dataset::index_with_time_field("logs-*", "@timestamp"),
                "count()",
            )
        });

        writer
            .write_dual_fixture("datatable-multi-column", &esql, &dataview, &last("24h"))
            .await?;
        Ok(())
    }
}
