//! Document storage: the `DocumentStore` handle shared by all handlers, and its implementations.

mod memory;
mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::{ensure_collections, ensure_database_exists, PgDocumentStore};

use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

/// A stored document: store-assigned id plus its fields.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredDocument {
    pub id: Uuid,
    pub fields: Map<String, Value>,
}

impl StoredDocument {
    /// Fields with the id folded in under `_id`, ready to decode into a record type.
    pub fn into_value(self) -> Value {
        let mut fields = self.fields;
        fields.insert("_id".into(), Value::String(self.id.to_string()));
        Value::Object(fields)
    }
}

/// Single-operation document store. Each call touches one collection and at most one document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document in `collection`, in natural storage order.
    async fn find_all(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError>;

    async fn find_one(&self, collection: &str, id: Uuid) -> Result<Option<StoredDocument>, StoreError>;

    /// Insert under a freshly assigned id.
    async fn insert_one(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<StoredDocument, StoreError>;

    /// Merge `set` into the document's fields; fields not named in `set` are kept.
    /// Returns the document after the update, or None when `id` does not exist.
    async fn update_one(
        &self,
        collection: &str,
        id: Uuid,
        set: Map<String, Value>,
    ) -> Result<Option<StoredDocument>, StoreError>;

    /// Remove and return the document as it was before removal.
    async fn delete_one(&self, collection: &str, id: Uuid) -> Result<Option<StoredDocument>, StoreError>;

    /// Round-trip check used by the readiness check.
    async fn ping(&self) -> Result<(), StoreError>;
}
