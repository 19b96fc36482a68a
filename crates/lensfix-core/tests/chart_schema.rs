use lensfix_core::{ChartConfig, Dataset, Error, chart_json_schema, validate_chart_json};
use serde_json::json;

#[test]
fn valid_table_document_parses() {
    let document = json!({
        "chartType": "table",
        "title": "Agent Status Table",
        "dataset": { "index": "metrics-*" },
        "breakdown": ["agent.version"],
        "value": "count(agent.name)"
    });

    let config = validate_chart_json(&document).expect("valid chart");
    let ChartConfig::Table(table) = config else {
        panic!("expected a table config");
    };
    assert_eq!(table.breakdown, vec!["agent.version"]);
    assert_eq!(table.dataset, Dataset::index("metrics-*"));
}

#[test]
fn xy_document_round_trips_layer_tags() {
    let document = json!({
        "chartType": "xy",
        "title": "Events Over Time",
        "dataset": { "esql": "FROM logs-* | STATS count = COUNT() BY @timestamp" },
        "layers": [{
            "type": "series",
            "seriesType": "line",
            "xAxis": "@timestamp",
            "yAxis": [{ "label": "Count", "value": "count" }]
        }]
    });

    let config = validate_chart_json(&document).expect("valid chart");
    assert_eq!(config.chart_type(), "xy");
    assert!(config.dataset().is_esql());
    assert_eq!(serde_json::to_value(&config).expect("serialize"), document);
}

#[test]
fn unknown_chart_type_is_rejected() {
    let document = json!({
        "chartType": "radar",
        "title": "Nope",
        "dataset": { "index": "logs-*" },
        "value": "count()"
    });

    let err = validate_chart_json(&document).expect_err("invalid chart");
    assert!(matches!(err, Error::InvalidChart(_)));
}

#[test]
fn missing_value_is_rejected() {
    let document = json!({
        "chartType": "metric",
        "title": "No value",
        "dataset": { "index": "logs-*" }
    });

    assert!(validate_chart_json(&document).is_err());
}

#[test]
fn schema_lists_chart_variants() {
    let schema = serde_json::to_string(&chart_json_schema()).expect("serialize schema");
    for chart_type in ["table", "gauge", "heatmap", "metric", "pie", "donut", "xy"] {
        assert!(schema.contains(&format!("\"{chart_type}\"")), "{chart_type}");
    }
}
