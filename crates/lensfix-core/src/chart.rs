//! Chart configuration model handed to builders.
//!
//! Each chart kind carries its own option struct; the shape mirrors the JSON
//! documents accepted by the config builder (`chartType` tag, camelCase keys).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Declarative chart configuration, tagged by `chartType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "chartType", rename_all = "lowercase")]
pub enum ChartConfig {
    Table(TableConfig),
    Gauge(GaugeConfig),
    Heatmap(HeatmapConfig),
    Metric(MetricConfig),
    Pie(PieConfig),
    Donut(PieConfig),
    Tagcloud(TagcloudConfig),
    Treemap(TreemapConfig),
    Mosaic(MosaicConfig),
    Xy(XyConfig),
}

impl ChartConfig {
    pub fn chart_type(&self) -> &'static str {
        match self {
            ChartConfig::Table(_) => "table",
            ChartConfig::Gauge(_) => "gauge",
            ChartConfig::Heatmap(_) => "heatmap",
            ChartConfig::Metric(_) => "metric",
            ChartConfig::Pie(_) => "pie",
            ChartConfig::Donut(_) => "donut",
            ChartConfig::Tagcloud(_) => "tagcloud",
            ChartConfig::Treemap(_) => "treemap",
            ChartConfig::Mosaic(_) => "mosaic",
            ChartConfig::Xy(_) => "xy",
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ChartConfig::Table(config) => &config.title,
            ChartConfig::Gauge(config) => &config.title,
            ChartConfig::Heatmap(config) => &config.title,
            ChartConfig::Metric(config) => &config.title,
            ChartConfig::Pie(config) | ChartConfig::Donut(config) => &config.title,
            ChartConfig::Tagcloud(config) => &config.title,
            ChartConfig::Treemap(config) => &config.title,
            ChartConfig::Mosaic(config) => &config.title,
            ChartConfig::Xy(config) => &config.title,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        match self {
            ChartConfig::Table(config) => &config.dataset,
            ChartConfig::Gauge(config) => &config.dataset,
            ChartConfig::Heatmap(config) => &config.dataset,
            ChartConfig::Metric(config) => &config.dataset,
            ChartConfig::Pie(config) | ChartConfig::Donut(config) => &config.dataset,
            ChartConfig::Tagcloud(config) => &config.dataset,
            ChartConfig::Treemap(config) => &config.dataset,
            ChartConfig::Mosaic(config) => &config.dataset,
            ChartConfig::Xy(config) => &config.dataset,
        }
    }
}

/// Chart datasource: an inline ES|QL query or a catalog (index) reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Dataset {
    Esql(EsqlDataset),
    Index(IndexDataset),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EsqlDataset {
    pub esql: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexDataset {
    pub index: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_field_name: Option<String>,
}

impl Dataset {
    pub fn esql(query: impl Into<String>) -> Self {
        Dataset::Esql(EsqlDataset {
            esql: query.into(),
        })
    }

    pub fn index(index: impl Into<String>) -> Self {
        Dataset::Index(IndexDataset {
            index: index.into(),
            time_field_name: None,
        })
    }

    pub fn index_with_time_field(index: impl Into<String>, time_field: impl Into<String>) -> Self {
        Dataset::Index(IndexDataset {
            index: index.into(),
            time_field_name: Some(time_field.into()),
        })
    }

    pub fn is_esql(&self) -> bool {
        matches!(self, Dataset::Esql(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    pub show: bool,
    pub position: LegendPosition,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub legend_stats: Vec<String>,
}

impl Legend {
    pub fn shown(position: LegendPosition) -> Self {
        Self {
            show: true,
            position,
            legend_stats: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    pub title: String,
    pub dataset: Dataset,
    #[serde(default)]
    pub breakdown: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub split_by: Vec<String>,
    pub value: String,
}

impl TableConfig {
    pub fn new(title: impl Into<String>, dataset: Dataset, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            dataset,
            breakdown: Vec::new(),
            split_by: Vec::new(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum GaugeShape {
    Arc,
    Circle,
    HorizontalBullet,
    VerticalBullet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GaugeConfig {
    pub title: String,
    pub dataset: Dataset,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_min_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_max_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_goal_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<GaugeShape>,
}

impl GaugeConfig {
    pub fn new(title: impl Into<String>, dataset: Dataset, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            dataset,
            value: value.into(),
            query_min_value: None,
            query_max_value: None,
            query_goal_value: None,
            shape: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapConfig {
    pub title: String,
    pub dataset: Dataset,
    /// Y axis field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<String>,
    pub x_axis: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricConfig {
    pub title: String,
    pub dataset: Dataset,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_secondary_metric: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_max_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_line: Option<bool>,
}

impl MetricConfig {
    pub fn new(title: impl Into<String>, dataset: Dataset, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            dataset,
            value: value.into(),
            label: None,
            subtitle: None,
            query_secondary_metric: None,
            query_max_value: None,
            breakdown: None,
            format: None,
            trend_line: None,
        }
    }
}

/// Options shared by pie and donut charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PieConfig {
    pub title: String,
    pub dataset: Dataset,
    pub value: String,
    #[serde(default)]
    pub breakdown: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagcloudConfig {
    pub title: String,
    pub dataset: Dataset,
    pub value: String,
    pub breakdown: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TreemapConfig {
    pub title: String,
    pub dataset: Dataset,
    pub value: String,
    #[serde(default)]
    pub breakdown: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MosaicConfig {
    pub title: String,
    pub dataset: Dataset,
    pub value: String,
    #[serde(default)]
    pub breakdown: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct XyConfig {
    pub title: String,
    pub dataset: Dataset,
    pub layers: Vec<XyLayer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitting_function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emphasize_fitting: Option<bool>,
    /// `show` or `hide`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_labels: Option<String>,
}

impl XyConfig {
    pub fn new(title: impl Into<String>, dataset: Dataset, layers: Vec<XyLayer>) -> Self {
        Self {
            title: title.into(),
            dataset,
            layers,
            legend: None,
            fitting_function: None,
            emphasize_fitting: None,
            value_labels: None,
        }
    }
}

/// XY chart layer, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum XyLayer {
    Series(SeriesLayer),
    Reference(ReferenceLayer),
    Annotation(AnnotationLayer),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SeriesType {
    Bar,
    Line,
    Area,
    BarStacked,
    AreaStacked,
    BarHorizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeriesLayer {
    pub series_type: SeriesType,
    pub x_axis: XAxis,
    pub y_axis: Vec<YAxisValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<String>,
}

impl SeriesLayer {
    pub fn new(series_type: SeriesType, x_axis: XAxis, y_axis: Vec<YAxisValue>) -> Self {
        Self {
            series_type,
            x_axis,
            y_axis,
            breakdown: None,
        }
    }
}

/// X axis: a bare column name (ES|QL) or a bucketing spec (catalog datasets).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum XAxis {
    Field(String),
    Bucket(XAxisBucket),
}

impl XAxis {
    pub fn date_histogram(field: impl Into<String>) -> Self {
        XAxis::Bucket(XAxisBucket {
            kind: BucketKind::DateHistogram,
            field: field.into(),
        })
    }

    pub fn field(&self) -> &str {
        match self {
            XAxis::Field(field) => field,
            XAxis::Bucket(bucket) => &bucket.field,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum BucketKind {
    DateHistogram,
    Terms,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct XAxisBucket {
    #[serde(rename = "type")]
    pub kind: BucketKind,
    pub field: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct YAxisValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ValueFormat>,
}

impl YAxisValue {
    pub fn labeled(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            value: value.into(),
            color: None,
            format: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValueFormat {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceLayer {
    pub y_axis: Vec<YAxisValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationLayer {
    #[serde(default)]
    pub y_axis: Vec<YAxisValue>,
    pub events: Vec<AnnotationEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnnotationEvent {
    pub name: String,
    /// RFC 3339 timestamp of the event.
    pub datetime: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TimeRangeKind {
    Relative,
    Absolute,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TimeRange {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: TimeRangeKind,
}

impl TimeRange {
    pub fn relative(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind: TimeRangeKind::Relative,
        }
    }

    /// `now-<window>` to `now`.
    pub fn last(window: &str) -> Self {
        Self::relative(format!("now-{window}"), "now")
    }
}

/// Options passed to the builder alongside a configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    /// Wrap the attributes in an embeddable input document.
    #[serde(default)]
    pub embeddable: bool,
}

impl BuildOptions {
    pub fn with_time_range(time_range: TimeRange) -> Self {
        Self {
            time_range: Some(time_range),
            embeddable: false,
        }
    }
}
