//! In-memory store adapter.
//!
//! The development and test double for the document store. Each trait call
//! takes the lock exactly once, so single-call atomicity holds while
//! sequences of calls (read-then-write) keep their race windows - the same
//! behavior a remote document store exhibits.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Document, DocumentStore, Fields, QueryOp, StoreError, WriteMode};

/// In-memory [`DocumentStore`] over keyed maps.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Fields>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(key))
            .map(|fields| Document {
                key: key.to_owned(),
                fields: fields.clone(),
            }))
    }

    async fn query(
        &self,
        collection: &str,
        field: &str,
        op: QueryOp,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(docs
            .iter()
            .filter(|(_, fields)| match op {
                QueryOp::Eq => fields.get(field) == Some(value),
            })
            .map(|(key, fields)| Document {
                key: key.clone(),
                fields: fields.clone(),
            })
            .collect())
    }

    async fn scan(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(docs
            .iter()
            .map(|(key, fields)| Document {
                key: key.clone(),
                fields: fields.clone(),
            })
            .collect())
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let mut collections = self.collections.write().await;
        let key = Uuid::new_v4().simple().to_string();
        collections
            .entry(collection.to_owned())
            .or_default()
            .insert(key.clone(), fields);
        Ok(key)
    }

    async fn update(
        &self,
        collection: &str,
        key: &str,
        fields: Fields,
        mode: WriteMode,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_owned()).or_default();
        match mode {
            WriteMode::Merge => {
                docs.entry(key.to_owned()).or_default().extend(fields);
            }
            WriteMode::Replace => {
                docs.insert(key.to_owned(), fields);
            }
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(key);
        }
        Ok(())
    }
}
