use std::sync::Arc;

use serde::Serialize;

use super::field::{CatalogField, FieldCollection};

/// Meta fields every entry reports, in this order.
pub const META_FIELDS: [&str; 5] = ["_source", "_id", "_type", "_index", "_score"];

/// A named, schema-bearing reference to a queryable data source ("data view").
#[derive(Debug)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    pub time_field_name: Option<String>,
    pub meta_fields: Vec<String>,
    pub fields: FieldCollection,
}

/// Serialized identity of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySpec {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_field_name: Option<String>,
}

/// Build an entry, materializing the time field when one is given.
pub fn create_entry(
    id: impl Into<String>,
    title: impl Into<String>,
    time_field_name: Option<String>,
) -> CatalogEntry {
    let fields = FieldCollection::new();
    if let Some(time_field) = time_field_name.as_deref() {
        fields.get_by_name(time_field);
    }

    CatalogEntry {
        id: id.into(),
        title: title.into(),
        time_field_name,
        meta_fields: META_FIELDS.iter().map(|field| field.to_string()).collect(),
        fields,
    }
}

impl CatalogEntry {
    /// Display name; entries are always named after their title.
    pub fn name(&self) -> &str {
        &self.title
    }

    pub fn is_persisted(&self) -> bool {
        true
    }

    pub fn is_time_based(&self) -> bool {
        self.time_field_name.is_some()
    }

    pub fn time_field(&self) -> Option<Arc<CatalogField>> {
        self.time_field_name
            .as_deref()
            .map(|name| self.fields.get_by_name(name))
    }

    pub fn field_by_name(&self, name: &str) -> Arc<CatalogField> {
        self.fields.get_by_name(name)
    }

    pub fn index_pattern(&self) -> &str {
        &self.title
    }

    pub fn to_spec(&self) -> EntrySpec {
        EntrySpec {
            id: self.id.clone(),
            title: self.title.clone(),
            time_field_name: self.time_field_name.clone(),
        }
    }

    pub fn to_minimal_spec(&self) -> EntrySpec {
        self.to_spec()
    }
}
