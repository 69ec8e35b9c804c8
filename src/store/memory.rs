//! In-process document store. Insertion ordered; state lives as long as the handle.

use super::{DocumentStore, StoredDocument};
use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<StoredDocument>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently in `collection`.
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .map(|c| c.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("memory store lock poisoned".into())
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_all(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let collections = self.collections.read().map_err(poisoned)?;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn find_one(&self, collection: &str, id: Uuid) -> Result<Option<StoredDocument>, StoreError> {
        let collections = self.collections.read().map_err(poisoned)?;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn insert_one(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<StoredDocument, StoreError> {
        let doc = StoredDocument {
            id: Uuid::new_v4(),
            fields,
        };
        let mut collections = self.collections.write().map_err(poisoned)?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    async fn update_one(
        &self,
        collection: &str,
        id: Uuid,
        set: Map<String, Value>,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let mut collections = self.collections.write().map_err(poisoned)?;
        let Some(doc) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
        else {
            return Ok(None);
        };
        doc.fields.extend(set);
        Ok(Some(doc.clone()))
    }

    async fn delete_one(&self, collection: &str, id: Uuid) -> Result<Option<StoredDocument>, StoreError> {
        let mut collections = self.collections.write().map_err(poisoned)?;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(None);
        };
        Ok(docs
            .iter()
            .position(|d| d.id == id)
            .map(|idx| docs.remove(idx)))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.collections.read().map(|_| ()).map_err(poisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_distinct_ids_and_keeps_order() {
        let store = MemoryDocumentStore::new();
        let a = store.insert_one("users", fields(json!({ "name": "A" }))).await.unwrap();
        let b = store.insert_one("users", fields(json!({ "name": "B" }))).await.unwrap();
        assert_ne!(a.id, b.id);

        let all = store.find_all("users").await.unwrap();
        assert_eq!(all, vec![a, b]);
        assert!(store.find_all("orgs").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let store = MemoryDocumentStore::new();
        let doc = store
            .insert_one("users", fields(json!({ "name": "A", "email": "a@x.com" })))
            .await
            .unwrap();
        let updated = store
            .update_one("users", doc.id, fields(json!({ "email": "new@x.com" })))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.fields, fields(json!({ "name": "A", "email": "new@x.com" })));
        assert!(store
            .update_one("users", Uuid::new_v4(), Map::new())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn delete_returns_prior_state_once() {
        let store = MemoryDocumentStore::new();
        let doc = store.insert_one("orgs", fields(json!({ "name": "O" }))).await.unwrap();
        assert_eq!(store.delete_one("orgs", doc.id).await.unwrap(), Some(doc.clone()));
        assert_eq!(store.delete_one("orgs", doc.id).await.unwrap(), None);
        assert_eq!(store.count("orgs"), 0);
    }

    #[test]
    fn into_value_adds_id() {
        let id = Uuid::new_v4();
        let doc = StoredDocument {
            id,
            fields: fields(json!({ "name": "A" })),
        };
        assert_eq!(doc.into_value(), json!({ "name": "A", "_id": id.to_string() }));
    }
}
