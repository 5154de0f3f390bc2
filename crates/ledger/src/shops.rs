//! Shop catalog: unconditional CRUD, no ledger invariants.

use tracing::instrument;

use crate::error::LedgerError;
use crate::models::ShopRecord;
use crate::store::{DocumentStore, Fields, collections};

/// Catalog of shop documents.
pub struct ShopCatalog<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> ShopCatalog<'a> {
    /// Create a catalog over a store handle.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Store a shop document as given.
    ///
    /// # Errors
    ///
    /// Returns a store failure.
    #[instrument(skip(self, fields))]
    pub async fn create(&self, fields: Fields) -> Result<ShopRecord, LedgerError> {
        let key = self.store.insert(collections::SHOPS, fields.clone()).await?;
        Ok(ShopRecord { key, fields })
    }

    /// List every shop.
    ///
    /// # Errors
    ///
    /// Returns a store failure or `DataCorruption` for an undecodable
    /// stored document.
    pub async fn list(&self) -> Result<Vec<ShopRecord>, LedgerError> {
        self.store
            .scan(collections::SHOPS)
            .await?
            .iter()
            .map(ShopRecord::from_document)
            .collect()
    }

    /// Fetch a shop by store key. Absence is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns a store failure or `DataCorruption` for an undecodable
    /// stored document.
    pub async fn get(&self, key: &str) -> Result<Option<ShopRecord>, LedgerError> {
        self.store
            .get(collections::SHOPS, key)
            .await?
            .map(|doc| ShopRecord::from_document(&doc))
            .transpose()
    }

    /// Delete a shop.
    ///
    /// # Errors
    ///
    /// Returns a store failure.
    #[instrument(skip(self))]
    pub async fn delete(&self, key: &str) -> Result<(), LedgerError> {
        self.store.delete(collections::SHOPS, key).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_crud_roundtrip() {
        let store = MemoryStore::new();
        let catalog = ShopCatalog::new(&store);

        let mut fields = Fields::new();
        fields.insert("name".to_owned(), json!("Downtown"));
        fields.insert("city".to_owned(), json!("Vienna"));

        let shop = catalog.create(fields).await.unwrap();
        assert!(!shop.key.is_empty());

        let fetched = catalog.get(&shop.key).await.unwrap().unwrap();
        assert_eq!(fetched.fields.get("name"), Some(&json!("Downtown")));
        assert_eq!(catalog.list().await.unwrap().len(), 1);

        catalog.delete(&shop.key).await.unwrap();
        assert!(catalog.get(&shop.key).await.unwrap().is_none());
        assert!(catalog.list().await.unwrap().is_empty());
    }
}
