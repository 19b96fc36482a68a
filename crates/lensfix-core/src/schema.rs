use jsonschema::JSONSchema;
use schemars::schema::RootSchema;
use schemars::schema_for;
use serde_json::Value;

use crate::chart::ChartConfig;
use crate::error::{Error, Result};

/// Emit the JSON Schema for chart configuration documents.
pub fn chart_json_schema() -> RootSchema {
    schema_for!(ChartConfig)
}

/// Validate a chart document against the chart JSON Schema and parse it.
///
/// Every schema violation is reported as `<json pointer>: <message>`.
pub fn validate_chart_json(document: &Value) -> Result<ChartConfig> {
    let schema = serde_json::to_value(chart_json_schema())?;
    let compiled = JSONSchema::compile(&schema).map_err(|err| Error::Schema(err.to_string()))?;

    if let Err(errors) = compiled.validate(document) {
        let issues: Vec<String> = errors
            .map(|error| {
                let path = error.instance_path.to_string();
                let path = if path.is_empty() { "/".to_string() } else { path };
                format!("{path}: {error}")
            })
            .collect();
        return Err(Error::InvalidChart(issues.join("; ")));
    }

    serde_json::from_value(document.clone()).map_err(|err| Error::InvalidChart(err.to_string()))
}
