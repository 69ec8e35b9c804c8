//! Generic CRUD over a `DocumentStore`: one store call per operation.

use crate::error::{AppError, StoreError};
use crate::resource::Resource;
use crate::store::{DocumentStore, StoredDocument};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

pub struct CrudService;

fn decode<R: Resource>(doc: StoredDocument) -> Result<R::Record, StoreError> {
    Ok(serde_json::from_value(doc.into_value())?)
}

fn encode<T: Serialize>(value: &T) -> Result<Map<String, Value>, StoreError> {
    Ok(serde_json::from_value(serde_json::to_value(value)?)?)
}

impl CrudService {
    /// All documents of the collection, in storage order.
    pub async fn list<R: Resource>(store: &dyn DocumentStore) -> Result<Vec<R::Record>, AppError> {
        let failed = |e: StoreError| AppError::storage(format!("Error retrieving {}", R::COLLECTION), e);
        let docs = store.find_all(R::COLLECTION).await.map_err(failed)?;
        let records = docs
            .into_iter()
            .map(decode::<R>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(failed)?;
        tracing::debug!(collection = R::COLLECTION, count = records.len(), "listed documents");
        Ok(records)
    }

    /// One document by id, or None.
    pub async fn read<R: Resource>(store: &dyn DocumentStore, id: Uuid) -> Result<Option<R::Record>, AppError> {
        let failed = |e: StoreError| AppError::storage(format!("Error retrieving {}", R::NAME), e);
        let doc = store.find_one(R::COLLECTION, id).await.map_err(failed)?;
        doc.map(decode::<R>).transpose().map_err(failed)
    }

    /// Insert a new document. Returns it with its assigned id.
    pub async fn create<R: Resource>(store: &dyn DocumentStore, new: &R::New) -> Result<R::Record, AppError> {
        let failed = |e: StoreError| AppError::storage(format!("Error creating {}", R::NAME), e);
        let fields = encode(new).map_err(failed)?;
        let doc = store.insert_one(R::COLLECTION, fields).await.map_err(failed)?;
        let id = doc.id;
        let record = decode::<R>(doc).map_err(failed)?;
        tracing::info!(collection = R::COLLECTION, %id, "created {}", R::NAME);
        Ok(record)
    }

    /// Merge the set fields of `changes` into the document. Returns the updated document, or None.
    pub async fn update<R: Resource>(
        store: &dyn DocumentStore,
        id: Uuid,
        changes: &R::Changes,
    ) -> Result<Option<R::Record>, AppError> {
        let failed = |e: StoreError| AppError::storage(format!("Error updating {}", R::NAME), e);
        let set = encode(changes).map_err(failed)?;
        if set.is_empty() {
            return Err(AppError::BadRequest(format!(
                "request body must set at least one {} field",
                R::NAME
            )));
        }
        let fields: Vec<String> = set.keys().cloned().collect();
        let doc = store.update_one(R::COLLECTION, id, set).await.map_err(failed)?;
        match doc {
            Some(doc) => {
                tracing::info!(collection = R::COLLECTION, %id, ?fields, "updated {}", R::NAME);
                Ok(Some(decode::<R>(doc).map_err(failed)?))
            }
            None => Ok(None),
        }
    }

    /// Remove a document. Returns its state before removal, or None.
    pub async fn delete<R: Resource>(
        store: &dyn DocumentStore,
        id: Uuid,
        actor: Option<&str>,
    ) -> Result<Option<R::Record>, AppError> {
        let failed = |e: StoreError| AppError::storage(format!("Error deleting {}", R::NAME), e);
        let doc = store.delete_one(R::COLLECTION, id).await.map_err(failed)?;
        match doc {
            Some(doc) => {
                tracing::info!(collection = R::COLLECTION, %id, actor = actor.unwrap_or("-"), "deleted {}", R::NAME);
                Ok(Some(decode::<R>(doc).map_err(failed)?))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{NewUser, UserChanges, Users};
    use crate::store::MemoryDocumentStore;
    use async_trait::async_trait;

    struct BrokenStore;

    #[async_trait]
    impl DocumentStore for BrokenStore {
        async fn find_all(&self, _: &str) -> Result<Vec<StoredDocument>, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        async fn find_one(&self, _: &str, _: Uuid) -> Result<Option<StoredDocument>, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        async fn insert_one(&self, _: &str, _: Map<String, Value>) -> Result<StoredDocument, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        async fn update_one(
            &self,
            _: &str,
            _: Uuid,
            _: Map<String, Value>,
        ) -> Result<Option<StoredDocument>, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        async fn delete_one(&self, _: &str, _: Uuid) -> Result<Option<StoredDocument>, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        async fn ping(&self) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
    }

    fn new_user() -> NewUser {
        NewUser {
            name: "A".into(),
            email: "a@x.com".into(),
        }
    }

    #[tokio::test]
    async fn create_then_read_round_trips() {
        let store = MemoryDocumentStore::new();
        let created = CrudService::create::<Users>(&store, &new_user()).await.unwrap();
        assert_eq!(created.name, "A");
        let read = CrudService::read::<Users>(&store, created.id).await.unwrap();
        assert_eq!(read, Some(created));
    }

    #[tokio::test]
    async fn empty_change_set_is_rejected_before_the_store() {
        let err = CrudService::update::<Users>(&BrokenStore, Uuid::new_v4(), &UserChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn store_failures_carry_generic_messages() {
        match CrudService::list::<Users>(&BrokenStore).await {
            Err(AppError::Storage { message, .. }) => assert_eq!(message, "Error retrieving users"),
            other => panic!("unexpected: {:?}", other.map(|v| v.len())),
        }
        match CrudService::create::<Users>(&BrokenStore, &new_user()).await {
            Err(AppError::Storage { message, .. }) => assert_eq!(message, "Error creating user"),
            other => panic!("unexpected: {:?}", other.is_ok()),
        }
    }

    #[tokio::test]
    async fn undecodable_stored_document_is_a_storage_error() {
        let store = MemoryDocumentStore::new();
        let mut fields = Map::new();
        fields.insert("name".into(), Value::from("no email"));
        store.insert_one("users", fields).await.unwrap();
        let err = CrudService::list::<Users>(&store).await.unwrap_err();
        assert!(matches!(err, AppError::Storage { .. }));
    }
}
