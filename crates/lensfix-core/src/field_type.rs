use serde::{Deserialize, Serialize};

/// Semantic type assigned to a catalog field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Datetime,
    String,
    Text,
    Number,
    Boolean,
    Ip,
    GeoPoint,
}

/// Static metadata carried by every field of a given type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTypeSpec {
    /// Coarse kind label exposed as the field `type`.
    pub kind: &'static str,
    /// Storage types backing the field.
    pub es_types: &'static [&'static str],
    pub searchable: bool,
    pub aggregatable: bool,
    pub filterable: bool,
    pub sortable: bool,
}

const DATETIME: FieldTypeSpec = FieldTypeSpec {
    kind: "date",
    es_types: &["date"],
    searchable: true,
    aggregatable: true,
    filterable: true,
    sortable: true,
};

const STRING: FieldTypeSpec = FieldTypeSpec {
    kind: "string",
    es_types: &["keyword"],
    searchable: true,
    aggregatable: true,
    filterable: true,
    sortable: true,
};

const TEXT: FieldTypeSpec = FieldTypeSpec {
    kind: "string",
    es_types: &["text"],
    searchable: true,
    aggregatable: false,
    filterable: true,
    sortable: false,
};

const NUMBER: FieldTypeSpec = FieldTypeSpec {
    kind: "number",
    es_types: &["long", "integer", "double", "float"],
    searchable: true,
    aggregatable: true,
    filterable: true,
    sortable: true,
};

const BOOLEAN: FieldTypeSpec = FieldTypeSpec {
    kind: "boolean",
    es_types: &["boolean"],
    searchable: true,
    aggregatable: true,
    filterable: true,
    sortable: true,
};

const IP: FieldTypeSpec = FieldTypeSpec {
    kind: "ip",
    es_types: &["ip"],
    searchable: true,
    aggregatable: true,
    filterable: true,
    sortable: true,
};

const GEO_POINT: FieldTypeSpec = FieldTypeSpec {
    kind: "geo_point",
    es_types: &["geo_point"],
    searchable: true,
    aggregatable: true,
    filterable: true,
    sortable: false,
};

impl FieldType {
    pub fn spec(self) -> &'static FieldTypeSpec {
        match self {
            FieldType::Datetime => &DATETIME,
            FieldType::String => &STRING,
            FieldType::Text => &TEXT,
            FieldType::Number => &NUMBER,
            FieldType::Boolean => &BOOLEAN,
            FieldType::Ip => &IP,
            FieldType::GeoPoint => &GEO_POINT,
        }
    }

    pub fn kind(self) -> &'static str {
        self.spec().kind
    }
}

const NUMERIC_MARKERS: &[&str] = &[
    "count", "bytes", "size", "duration", "time", "latency", "rate", "percent", "avg", "sum",
    "min", "max",
];

const GEO_MARKERS: &[&str] = &["geo", "location", "coordinates"];

const BOOLEAN_MARKERS: &[&str] = &["enabled", "active", "success", "failed", "is_"];

/// Resolve the semantic type of a field from its name.
///
/// Well-known field names are looked up first. Anything else goes through
/// ordered substring heuristics where the first match wins:
/// - `timestamp`/`date` or an `@` prefix: datetime
/// - numeric markers (`count`, `bytes`, `time`, ...): number
/// - `.ip` or exactly `ip`: ip
/// - `geo`/`location`/`coordinates`: geo_point
/// - `enabled`/`active`/`success`/`failed`/`is_`: boolean
///
/// Names matching nothing resolve to string.
pub fn resolve_field_type(name: &str) -> FieldType {
    if let Some(field_type) = known_field(name) {
        return field_type;
    }

    if name.contains("timestamp") || name.contains("date") || name.starts_with('@') {
        return FieldType::Datetime;
    }
    if contains_any(name, NUMERIC_MARKERS) {
        return FieldType::Number;
    }
    if name.contains(".ip") || name == "ip" {
        return FieldType::Ip;
    }
    if contains_any(name, GEO_MARKERS) {
        return FieldType::GeoPoint;
    }
    if contains_any(name, BOOLEAN_MARKERS) {
        return FieldType::Boolean;
    }

    FieldType::String
}

fn known_field(name: &str) -> Option<FieldType> {
    let field_type = match name {
        "@timestamp" | "timestamp" => FieldType::Datetime,
        "category" | "agent.name" | "host.name" | "log.level" | "geo.src" | "geo.dest"
        | "source" | "destination" | "status" | "method" | "url" | "user.name"
        | "service.name" => FieldType::String,
        "response_time" | "price" | "bytes" | "count" | "value" | "duration" | "memory"
        | "cpu" | "temperature" | "errors" | "requests" => FieldType::Number,
        "success" | "enabled" => FieldType::Boolean,
        "client.ip" | "server.ip" => FieldType::Ip,
        "location" => FieldType::GeoPoint,
        _ => return None,
    };
    Some(field_type)
}

fn contains_any(name: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| name.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_win_over_heuristics() {
        // `geo.src` alone would resolve to geo_point.
        assert_eq!(resolve_field_type("geo.src"), FieldType::String);
        assert_eq!(resolve_field_type("geo.dest"), FieldType::String);
        assert_eq!(resolve_field_type("response_time"), FieldType::Number);
        assert_eq!(resolve_field_type("count"), FieldType::Number);
        assert_eq!(resolve_field_type("success"), FieldType::Boolean);
        assert_eq!(resolve_field_type("location"), FieldType::GeoPoint);
        assert_eq!(resolve_field_type("client.ip"), FieldType::Ip);
        assert_eq!(resolve_field_type("@timestamp"), FieldType::Datetime);
    }

    #[test]
    fn datetime_heuristic_runs_before_numeric() {
        assert_eq!(
            resolve_field_type("event.timestamp_count"),
            FieldType::Datetime
        );
        assert_eq!(resolve_field_type("order_date"), FieldType::Datetime);
        assert_eq!(resolve_field_type("@version"), FieldType::Datetime);
        assert_eq!(resolve_field_type("host.uptime"), FieldType::Number);
    }

    #[test]
    fn heuristics_cover_remaining_types() {
        assert_eq!(resolve_field_type("http.latency_ms"), FieldType::Number);
        assert_eq!(resolve_field_type("storage.used.bytes"), FieldType::Number);
        assert_eq!(resolve_field_type("source.ip"), FieldType::Ip);
        assert_eq!(resolve_field_type("ip"), FieldType::Ip);
        assert_eq!(resolve_field_type("geo.coordinates"), FieldType::GeoPoint);
        assert_eq!(resolve_field_type("feature.enabled"), FieldType::Boolean);
        assert_eq!(resolve_field_type("job.failed"), FieldType::Boolean);
        assert_eq!(resolve_field_type("agent.version"), FieldType::String);
        assert_eq!(resolve_field_type("message"), FieldType::String);
    }

    #[test]
    fn specs_expose_capabilities() {
        let text = FieldType::Text.spec();
        assert_eq!(text.kind, "string");
        assert!(!text.aggregatable);
        assert!(!text.sortable);
        assert!(!FieldType::GeoPoint.spec().sortable);
        assert_eq!(FieldType::Number.spec().es_types.len(), 4);
        assert_eq!(FieldType::Datetime.kind(), "date");
    }
}
