//! Mock data catalog used while building fixtures.

mod entry;
mod field;
mod service;

pub use entry::{CatalogEntry, EntrySpec, META_FIELDS, create_entry};
pub use field::{CatalogField, FieldCollection, FieldSpec};
pub use service::{
    CREATED_ENTRY_ID, CatalogCache, CatalogLookup, CatalogService, CreateEntry,
    DEFAULT_ENTRY_ID, DEFAULT_TIME_FIELD, DEFAULT_TITLE, LookupDescriptor, MockCatalogService,
};
