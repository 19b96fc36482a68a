use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entry::{CatalogEntry, create_entry};

pub const DEFAULT_TITLE: &str = "logs-*";
pub const DEFAULT_TIME_FIELD: &str = "@timestamp";
pub const CREATED_ENTRY_ID: &str = "created-dataview";
pub const DEFAULT_ENTRY_ID: &str = "default";

/// Structured lookup request, the serialized form builders use for ad-hoc
/// index references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_field_name: Option<String>,
}

/// Input accepted by [`CatalogService::get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLookup {
    Descriptor(LookupDescriptor),
    Plain(String),
}

impl CatalogLookup {
    pub fn plain(id: impl Into<String>) -> Self {
        CatalogLookup::Plain(id.into())
    }

    pub fn index(index: impl Into<String>, time_field_name: Option<String>) -> Self {
        CatalogLookup::Descriptor(LookupDescriptor {
            index: Some(index.into()),
            time_field_name,
        })
    }

    /// Resolve a raw identifier once: JSON objects become descriptors,
    /// everything else (including malformed JSON) is a plain identifier.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value @ Value::Object(_)) => match serde_json::from_value(value) {
                Ok(descriptor) => CatalogLookup::Descriptor(descriptor),
                Err(_) => CatalogLookup::Plain(raw.to_string()),
            },
            _ => CatalogLookup::Plain(raw.to_string()),
        }
    }

    /// Cache key: the identifier itself, or the descriptor serialized with
    /// sorted keys.
    pub fn cache_key(&self) -> String {
        match self {
            CatalogLookup::Plain(id) => id.clone(),
            CatalogLookup::Descriptor(descriptor) => {
                let mut object = Map::new();
                if let Some(index) = &descriptor.index {
                    object.insert("index".to_string(), Value::String(index.clone()));
                }
                if let Some(time_field) = &descriptor.time_field_name {
                    object.insert(
                        "timeFieldName".to_string(),
                        Value::String(time_field.clone()),
                    );
                }
                Value::Object(object).to_string()
            }
        }
    }
}

/// Parameters for [`CatalogService::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEntry {
    pub id: Option<String>,
    pub title: Option<String>,
    /// `None` creates an entry without a time field.
    pub time_field_name: Option<String>,
}

impl Default for CreateEntry {
    fn default() -> Self {
        Self {
            id: None,
            title: None,
            time_field_name: Some(DEFAULT_TIME_FIELD.to_string()),
        }
    }
}

/// Shared cache of catalog entries keyed by lookup key.
///
/// Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct CatalogCache {
    entries: Arc<Mutex<BTreeMap<String, Arc<CatalogEntry>>>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Arc<CatalogEntry>> {
        self.lock().get(key).cloned()
    }

    pub fn insert(&self, key: String, entry: Arc<CatalogEntry>) {
        self.lock().insert(key, entry);
    }

    pub fn keys(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    pub fn entries(&self) -> Vec<Arc<CatalogEntry>> {
        self.lock().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Arc<CatalogEntry>>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Lookup contract a chart builder needs from a data catalog backend.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Return the entry for `lookup`, building and caching it on first use.
    async fn get(&self, lookup: &CatalogLookup) -> Arc<CatalogEntry>;

    /// Build a new entry; cached only when an id is supplied.
    async fn create(&self, request: CreateEntry) -> Arc<CatalogEntry>;

    async fn default_entry(&self) -> Arc<CatalogEntry>;

    /// All cached entries. The search term is accepted but does not filter.
    async fn find(&self, search: &str) -> Vec<Arc<CatalogEntry>>;

    async fn ids(&self) -> Vec<String>;

    fn clear_cache(&self);
}

/// In-memory catalog standing in for a real backend during fixture builds.
#[derive(Debug, Clone, Default)]
pub struct MockCatalogService {
    cache: CatalogCache,
}

impl MockCatalogService {
    pub fn new(cache: CatalogCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    fn build_entry(lookup: &CatalogLookup, key: &str) -> CatalogEntry {
        match lookup {
            CatalogLookup::Plain(id) => {
                create_entry(id.as_str(), id.as_str(), Some(DEFAULT_TIME_FIELD.to_string()))
            }
            CatalogLookup::Descriptor(descriptor) => {
                // Empty strings count as absent.
                let index = descriptor.index.as_deref().filter(|index| !index.is_empty());
                let (id, title) = match index {
                    Some(index) => (index.to_string(), index.to_string()),
                    None => (key.to_string(), DEFAULT_TITLE.to_string()),
                };
                let time_field = descriptor
                    .time_field_name
                    .as_deref()
                    .filter(|field| !field.is_empty())
                    .unwrap_or(DEFAULT_TIME_FIELD);
                create_entry(id, title, Some(time_field.to_string()))
            }
        }
    }
}

#[async_trait]
impl CatalogService for MockCatalogService {
    async fn get(&self, lookup: &CatalogLookup) -> Arc<CatalogEntry> {
        let key = lookup.cache_key();
        if let Some(entry) = self.cache.get(&key) {
            return entry;
        }

        let entry = Arc::new(Self::build_entry(lookup, &key));
        self.cache.insert(key, Arc::clone(&entry));
        entry
    }

    async fn create(&self, request: CreateEntry) -> Arc<CatalogEntry> {
        let CreateEntry {
            id,
            title,
            time_field_name,
        } = request;

        let entry = Arc::new(create_entry(
            id.clone().unwrap_or_else(|| CREATED_ENTRY_ID.to_string()),
            title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            time_field_name,
        ));
        if let Some(id) = id {
            self.cache.insert(id, Arc::clone(&entry));
        }
        entry
    }

    async fn default_entry(&self) -> Arc<CatalogEntry> {
        Arc::new(create_entry(
            DEFAULT_ENTRY_ID,
            DEFAULT_TITLE,
            Some(DEFAULT_TIME_FIELD.to_string()),
        ))
    }

    async fn find(&self, _search: &str) -> Vec<Arc<CatalogEntry>> {
        self.cache.entries()
    }

    async fn ids(&self) -> Vec<String> {
        self.cache.keys()
    }

    fn clear_cache(&self) {
        self.cache.clear();
    }
}
