use async_trait::async_trait;
use regex::Regex;
use serde_json::{Map, Value, json};

use lensfix_core::{
    BuildOptions, CatalogEntry, CatalogLookup, CatalogService, ChartConfig, Dataset, FieldType,
    SeriesType, ValueFormat, XyLayer, YAxisValue,
};

use super::{BuildError, ConfigBuilder};

/// Source field used by document-count metrics.
const RECORDS_FIELD: &str = "___records___";

/// Reference builder producing Lens-style saved-object attributes.
///
/// Output is deterministic: layer and column ids derive from positions, and
/// catalog datasets resolve through the supplied catalog service.
#[derive(Debug, Clone, Copy, Default)]
pub struct LensAttributesBuilder;

impl LensAttributesBuilder {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug)]
struct MetricRef {
    label: Option<String>,
    expression: String,
    format: Option<ValueFormat>,
}

impl MetricRef {
    fn new(label: Option<&str>, expression: &str) -> Self {
        Self {
            label: label.map(str::to_string),
            expression: expression.to_string(),
            format: None,
        }
    }
}

/// Datasource layer derived from a chart configuration.
#[derive(Debug)]
struct LayerPlan {
    id: String,
    layer_type: &'static str,
    series_type: Option<SeriesType>,
    dimensions: Vec<String>,
    metrics: Vec<MetricRef>,
}

impl LayerPlan {
    fn data(position: usize, dimensions: Vec<String>, metrics: Vec<MetricRef>) -> Self {
        Self {
            id: layer_id(position),
            layer_type: "data",
            series_type: None,
            dimensions,
            metrics,
        }
    }
}

#[derive(Debug, Default)]
struct LayerColumns {
    dimensions: Vec<String>,
    metrics: Vec<String>,
}

#[async_trait]
impl ConfigBuilder for LensAttributesBuilder {
    async fn build(
        &self,
        config: &ChartConfig,
        options: &BuildOptions,
        catalog: &dyn CatalogService,
    ) -> Result<Value, BuildError> {
        check_supported(config)?;

        let plans = plan_layers(config);
        let mut references = Vec::new();
        let mut layer_columns = Vec::with_capacity(plans.len());
        let mut layers = Map::new();

        let (datasource_states, query) = match config.dataset() {
            Dataset::Esql(dataset) => {
                for plan in &plans {
                    let (layer, columns) = text_based_layer(&dataset.esql, plan);
                    layers.insert(plan.id.clone(), layer);
                    layer_columns.push(columns);
                }
                (
                    json!({ "textBased": { "layers": Value::Object(layers) } }),
                    json!({ "esql": dataset.esql }),
                )
            }
            Dataset::Index(dataset) => {
                let lookup =
                    CatalogLookup::index(dataset.index.clone(), dataset.time_field_name.clone());
                let entry = catalog.get(&lookup).await;
                for plan in &plans {
                    let (layer, columns) = form_based_layer(&entry, plan);
                    layers.insert(plan.id.clone(), layer);
                    references.push(json!({
                        "type": "index-pattern",
                        "id": entry.id,
                        "name": format!("indexpattern-datasource-layer-{}", plan.id),
                    }));
                    layer_columns.push(columns);
                }
                (
                    json!({ "formBased": { "layers": Value::Object(layers) } }),
                    json!({ "language": "kuery", "query": "" }),
                )
            }
        };

        let visualization = visualization_state(config, &plans, &layer_columns)?;
        let attributes = json!({
            "title": config.title(),
            "visualizationType": visualization_type(config),
            "references": references,
            "state": {
                "datasourceStates": datasource_states,
                "filters": [],
                "query": query,
                "visualization": visualization,
            },
        });

        if !options.embeddable {
            return Ok(attributes);
        }

        let mut input = Map::new();
        input.insert("attributes".to_string(), attributes);
        input.insert("references".to_string(), Value::Array(references));
        if let Some(time_range) = &options.time_range {
            input.insert("timeRange".to_string(), serde_json::to_value(time_range)?);
        }
        Ok(Value::Object(input))
    }
}

fn check_supported(config: &ChartConfig) -> Result<(), BuildError> {
    if config.title().trim().is_empty() {
        return Err(BuildError::Invalid(
            "chart title must not be empty".to_string(),
        ));
    }

    match config.dataset() {
        Dataset::Esql(dataset) if dataset.esql.trim().is_empty() => {
            return Err(BuildError::Invalid(
                "ES|QL query must not be empty".to_string(),
            ));
        }
        Dataset::Index(dataset) if dataset.index.trim().is_empty() => {
            return Err(BuildError::Invalid(
                "index pattern must not be empty".to_string(),
            ));
        }
        _ => {}
    }

    let esql = config.dataset().is_esql();
    match config {
        ChartConfig::Xy(xy) => {
            if xy.layers.is_empty() {
                return Err(BuildError::Invalid(
                    "xy charts need at least one layer".to_string(),
                ));
            }
            if esql {
                for layer in &xy.layers {
                    match layer {
                        XyLayer::Reference(_) => {
                            return Err(BuildError::Unsupported(
                                "reference lines are not supported with ES|QL datasets"
                                    .to_string(),
                            ));
                        }
                        XyLayer::Annotation(_) => {
                            return Err(BuildError::Unsupported(
                                "annotation layers are not supported with ES|QL datasets"
                                    .to_string(),
                            ));
                        }
                        XyLayer::Series(_) => {}
                    }
                }
            }
        }
        ChartConfig::Metric(metric) if esql && metric.trend_line == Some(true) => {
            return Err(BuildError::Unsupported(
                "trend lines are not supported with ES|QL datasets".to_string(),
            ));
        }
        _ => {}
    }

    Ok(())
}

fn plan_layers(config: &ChartConfig) -> Vec<LayerPlan> {
    match config {
        ChartConfig::Table(table) => {
            let dimensions = table
                .split_by
                .iter()
                .chain(&table.breakdown)
                .cloned()
                .collect();
            vec![LayerPlan::data(
                0,
                dimensions,
                vec![MetricRef::new(None, &table.value)],
            )]
        }
        ChartConfig::Gauge(gauge) => {
            let mut metrics = vec![MetricRef::new(None, &gauge.value)];
            for (label, value) in [
                ("min", &gauge.query_min_value),
                ("max", &gauge.query_max_value),
                ("goal", &gauge.query_goal_value),
            ] {
                if let Some(value) = value {
                    metrics.push(MetricRef::new(Some(label), value));
                }
            }
            vec![LayerPlan::data(0, Vec::new(), metrics)]
        }
        ChartConfig::Heatmap(heatmap) => {
            let mut dimensions = vec![heatmap.x_axis.clone()];
            dimensions.extend(heatmap.breakdown.clone());
            vec![LayerPlan::data(
                0,
                dimensions,
                vec![MetricRef::new(None, &heatmap.value)],
            )]
        }
        ChartConfig::Metric(metric) => {
            let mut metrics = vec![MetricRef::new(metric.label.as_deref(), &metric.value)];
            if let Some(secondary) = &metric.query_secondary_metric {
                metrics.push(MetricRef::new(Some("secondary"), secondary));
            }
            if let Some(max) = &metric.query_max_value {
                metrics.push(MetricRef::new(Some("max"), max));
            }
            let dimensions = metric.breakdown.iter().cloned().collect();
            vec![LayerPlan::data(0, dimensions, metrics)]
        }
        ChartConfig::Pie(pie) | ChartConfig::Donut(pie) => vec![LayerPlan::data(
            0,
            pie.breakdown.clone(),
            vec![MetricRef::new(None, &pie.value)],
        )],
        ChartConfig::Tagcloud(tagcloud) => vec![LayerPlan::data(
            0,
            vec![tagcloud.breakdown.clone()],
            vec![MetricRef::new(None, &tagcloud.value)],
        )],
        ChartConfig::Treemap(treemap) => vec![LayerPlan::data(
            0,
            treemap.breakdown.clone(),
            vec![MetricRef::new(None, &treemap.value)],
        )],
        ChartConfig::Mosaic(mosaic) => vec![LayerPlan::data(
            0,
            mosaic.breakdown.clone(),
            vec![MetricRef::new(None, &mosaic.value)],
        )],
        ChartConfig::Xy(xy) => xy
            .layers
            .iter()
            .enumerate()
            .filter_map(|(position, layer)| match layer {
                XyLayer::Series(series) => {
                    let mut dimensions = vec![series.x_axis.field().to_string()];
                    dimensions.extend(series.breakdown.clone());
                    Some(LayerPlan {
                        series_type: Some(series.series_type),
                        ..LayerPlan::data(position, dimensions, y_metrics(&series.y_axis))
                    })
                }
                XyLayer::Reference(reference) => Some(LayerPlan {
                    layer_type: "referenceLine",
                    ..LayerPlan::data(position, Vec::new(), y_metrics(&reference.y_axis))
                }),
                XyLayer::Annotation(_) => None,
            })
            .collect(),
    }
}

fn y_metrics(values: &[YAxisValue]) -> Vec<MetricRef> {
    values
        .iter()
        .map(|value| MetricRef {
            format: value.format.clone(),
            ..MetricRef::new(value.label.as_deref(), &value.value)
        })
        .collect()
}

fn text_based_layer(query: &str, plan: &LayerPlan) -> (Value, LayerColumns) {
    let mut columns = Vec::new();
    let mut ids = LayerColumns::default();

    for (position, name) in plan.dimensions.iter().enumerate() {
        let id = format!("{}_dimension_{position}", plan.id);
        columns.push(json!({ "columnId": id, "fieldName": name }));
        ids.dimensions.push(id);
    }
    for (position, metric) in plan.metrics.iter().enumerate() {
        let id = format!("{}_metric_{position}", plan.id);
        let mut column = json!({ "columnId": id, "fieldName": metric.expression });
        if let (Some(label), Value::Object(map)) = (&metric.label, &mut column) {
            map.insert("label".to_string(), Value::String(label.clone()));
        }
        columns.push(column);
        ids.metrics.push(id);
    }

    let layer = json!({
        "query": { "esql": query },
        "columns": columns,
    });
    (layer, ids)
}

fn form_based_layer(entry: &CatalogEntry, plan: &LayerPlan) -> (Value, LayerColumns) {
    let mut columns = Map::new();
    let mut order = Vec::new();
    let mut ids = LayerColumns::default();

    for (position, name) in plan.dimensions.iter().enumerate() {
        let id = format!("{}_dimension_{position}", plan.id);
        let field = entry.field_by_name(name);
        let operation = if field.field_type == FieldType::Datetime {
            "date_histogram"
        } else {
            "terms"
        };
        columns.insert(
            id.clone(),
            json!({
                "label": name,
                "dataType": field.kind,
                "operationType": operation,
                "sourceField": name,
                "isBucketed": true,
            }),
        );
        order.push(id.clone());
        ids.dimensions.push(id);
    }

    for (position, metric) in plan.metrics.iter().enumerate() {
        let id = format!("{}_metric_{position}", plan.id);
        columns.insert(id.clone(), metric_column(entry, metric));
        order.push(id.clone());
        ids.metrics.push(id);
    }

    let layer = json!({
        "indexPatternId": entry.id,
        "columnOrder": order,
        "columns": Value::Object(columns),
    });
    (layer, ids)
}

fn metric_column(entry: &CatalogEntry, metric: &MetricRef) -> Value {
    let mut column = metric_operation(entry, metric);
    if let (Some(format), Value::Object(map)) = (&metric.format, &mut column) {
        let params = map
            .entry("params")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(params) = params {
            params.insert("format".to_string(), json!(format));
        }
    }
    column
}

fn metric_operation(entry: &CatalogEntry, metric: &MetricRef) -> Value {
    let label = metric
        .label
        .clone()
        .unwrap_or_else(|| metric.expression.clone());

    if let Some((operation, field)) = parse_metric_call(&metric.expression) {
        let counts = matches!(operation.as_str(), "count" | "unique_count");
        let (source_field, data_type) = if field.is_empty() {
            (RECORDS_FIELD.to_string(), "number")
        } else {
            let resolved = entry.field_by_name(&field);
            (field, if counts { "number" } else { resolved.kind })
        };
        return json!({
            "label": label,
            "dataType": data_type,
            "operationType": operation,
            "sourceField": source_field,
            "isBucketed": false,
        });
    }

    if metric.expression.trim().parse::<f64>().is_ok() {
        return json!({
            "label": label,
            "dataType": "number",
            "operationType": "static_value",
            "isBucketed": false,
            "params": { "value": metric.expression.trim() },
        });
    }

    json!({
        "label": label,
        "dataType": "number",
        "operationType": "formula",
        "isBucketed": false,
        "params": { "formula": metric.expression },
    })
}

/// Split `op(field)` into its operation and (possibly empty) field.
fn parse_metric_call(expression: &str) -> Option<(String, String)> {
    let re = Regex::new(r"^\s*([a-z_]+)\(\s*([^()]*?)\s*\)\s*$").ok()?;
    let captures = re.captures(expression)?;
    let operation = captures.get(1)?.as_str().to_string();
    let field = captures
        .get(2)
        .map(|value| value.as_str().to_string())
        .unwrap_or_default();
    Some((operation, field))
}

fn visualization_state(
    config: &ChartConfig,
    plans: &[LayerPlan],
    layer_columns: &[LayerColumns],
) -> Result<Value, BuildError> {
    let mut options = serde_json::to_value(config)?;
    if let Value::Object(map) = &mut options {
        for key in ["chartType", "title", "dataset", "layers"] {
            map.remove(key);
        }
    }

    let mut layers = Vec::with_capacity(plans.len());
    for (plan, columns) in plans.iter().zip(layer_columns) {
        let mut layer = Map::new();
        layer.insert("layerId".to_string(), Value::String(plan.id.clone()));
        layer.insert(
            "layerType".to_string(),
            Value::String(plan.layer_type.to_string()),
        );
        if let Some(series_type) = plan.series_type {
            layer.insert("seriesType".to_string(), serde_json::to_value(series_type)?);
        }
        layer.insert("accessors".to_string(), json!(columns.metrics));
        layer.insert("splitAccessors".to_string(), json!(columns.dimensions));
        layers.push(Value::Object(layer));
    }

    if let ChartConfig::Xy(xy) = config {
        for (position, layer) in xy.layers.iter().enumerate() {
            if let XyLayer::Annotation(annotation) = layer {
                layers.push(json!({
                    "layerId": layer_id(position),
                    "layerType": "annotations",
                    "annotations": serde_json::to_value(&annotation.events)?,
                }));
            }
        }
    }

    let mut state = Map::new();
    state.insert("layers".to_string(), Value::Array(layers));
    state.insert("options".to_string(), options);
    if matches!(
        config,
        ChartConfig::Pie(_) | ChartConfig::Donut(_) | ChartConfig::Treemap(_) | ChartConfig::Mosaic(_)
    ) {
        state.insert(
            "shape".to_string(),
            Value::String(config.chart_type().to_string()),
        );
    }
    Ok(Value::Object(state))
}

fn visualization_type(config: &ChartConfig) -> &'static str {
    match config {
        ChartConfig::Table(_) => "lnsDatatable",
        ChartConfig::Gauge(_) => "lnsGauge",
        ChartConfig::Heatmap(_) => "lnsHeatmap",
        ChartConfig::Metric(_) => "lnsMetric",
        ChartConfig::Pie(_)
        | ChartConfig::Donut(_)
        | ChartConfig::Treemap(_)
        | ChartConfig::Mosaic(_) => "lnsPie",
        ChartConfig::Tagcloud(_) => "lnsTagcloud",
        ChartConfig::Xy(_) => "lnsXY",
    }
}

fn layer_id(position: usize) -> String {
    format!("layer_{position}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_metric_calls() {
        assert_eq!(
            parse_metric_call("count(agent.name)"),
            Some(("count".to_string(), "agent.name".to_string()))
        );
        assert_eq!(
            parse_metric_call("count()"),
            Some(("count".to_string(), String::new()))
        );
        assert_eq!(
            parse_metric_call(" average( bytes ) "),
            Some(("average".to_string(), "bytes".to_string()))
        );
        assert_eq!(parse_metric_call("count"), None);
        assert_eq!(parse_metric_call("sum(bytes) / count()"), None);
    }
}
