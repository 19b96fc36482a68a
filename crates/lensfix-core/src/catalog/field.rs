use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use crate::field_type::{FieldType, resolve_field_type};

/// One typed attribute of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogField {
    pub name: String,
    pub display_name: String,
    #[serde(skip)]
    pub field_type: FieldType,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub es_types: &'static [&'static str],
    pub searchable: bool,
    pub aggregatable: bool,
    pub filterable: bool,
    pub sortable: bool,
    pub read_from_doc_values: bool,
    pub scripted: bool,
    pub is_mapped: bool,
    pub count: u64,
}

/// Minimal serialized form of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub es_types: &'static [&'static str],
    pub searchable: bool,
    pub aggregatable: bool,
}

impl CatalogField {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        let spec = field_type.spec();
        Self {
            display_name: name.clone(),
            name,
            field_type,
            kind: spec.kind,
            es_types: spec.es_types,
            searchable: spec.searchable,
            aggregatable: spec.aggregatable,
            filterable: spec.filterable,
            sortable: spec.sortable,
            read_from_doc_values: true,
            scripted: false,
            is_mapped: true,
            count: 0,
        }
    }

    pub fn to_spec(&self) -> FieldSpec {
        FieldSpec {
            name: self.name.clone(),
            kind: self.kind,
            es_types: self.es_types,
            searchable: self.searchable,
            aggregatable: self.aggregatable,
        }
    }
}

/// Insertion-ordered, lazily populated set of fields.
///
/// Lookups by name create the field on first access and return the cached
/// instance afterwards, so every caller observes the same `Arc`. Query helpers
/// work on a snapshot and never hold the lock while calling back.
#[derive(Debug, Default)]
pub struct FieldCollection {
    fields: Mutex<Vec<Arc<CatalogField>>>,
}

impl FieldCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_by_name(&self, name: &str) -> Arc<CatalogField> {
        let mut fields = self.lock();
        if let Some(existing) = fields.iter().find(|field| field.name == name) {
            return Arc::clone(existing);
        }

        let field = Arc::new(CatalogField::new(name, resolve_field_type(name)));
        fields.push(Arc::clone(&field));
        field
    }

    /// Fields whose coarse kind equals `kind` (e.g. `number`).
    pub fn get_by_type(&self, kind: &str) -> Vec<Arc<CatalogField>> {
        self.filter(|field| field.kind == kind)
    }

    pub fn get_all(&self) -> Vec<Arc<CatalogField>> {
        self.lock().clone()
    }

    pub fn filter<P>(&self, predicate: P) -> Vec<Arc<CatalogField>>
    where
        P: Fn(&CatalogField) -> bool,
    {
        self.get_all()
            .into_iter()
            .filter(|field| predicate(&**field))
            .collect()
    }

    pub fn find<P>(&self, predicate: P) -> Option<Arc<CatalogField>>
    where
        P: Fn(&CatalogField) -> bool,
    {
        self.get_all().into_iter().find(|field| predicate(&**field))
    }

    pub fn map<T, F>(&self, f: F) -> Vec<T>
    where
        F: Fn(&CatalogField) -> T,
    {
        self.get_all().iter().map(|field| f(&**field)).collect()
    }

    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&CatalogField),
    {
        for field in self.get_all() {
            f(&*field);
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<CatalogField>>> {
        self.fields
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<'a> IntoIterator for &'a FieldCollection {
    type Item = Arc<CatalogField>;
    type IntoIter = std::vec::IntoIter<Arc<CatalogField>>;

    fn into_iter(self) -> Self::IntoIter {
        self.get_all().into_iter()
    }
}
