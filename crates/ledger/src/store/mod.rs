//! Document-store adapter boundary.
//!
//! The ledger consumes storage as keyed collections of JSON documents. The
//! guarantees it assumes are deliberately weak, matching what hosted
//! document stores actually give:
//!
//! - single-document reads and writes are atomic
//! - merge-writes perform a shallow field merge and create the document
//!   when it is absent
//! - no ordering, no cross-document atomicity, no transactions
//!
//! Connection setup, authentication, and query execution live in the
//! concrete adapter behind [`DocumentStore`]; the ledger never sees them.
//! [`MemoryStore`] is the in-process adapter used for development and
//! tests.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub mod memory;

pub use memory::MemoryStore;

/// The field map of a single document.
pub type Fields = serde_json::Map<String, Value>;

/// Collection names used by the ledger.
pub mod collections {
    /// User profiles, keyed by email.
    pub const USERS: &str = "users";
    /// Reward-grant records.
    pub const ORDERS: &str = "orders";
    /// Redemption requests.
    pub const REDEMPTIONS: &str = "redemptions";
    /// Singleton configuration documents (gold price).
    pub const SETTINGS: &str = "settings";
    /// Shop catalog entries.
    pub const SHOPS: &str = "shops";
    /// Contact-form messages.
    pub const CONTACTS: &str = "contacts";
}

/// A stored document: its key plus its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Store-assigned key, or the caller-chosen key for keyed collections.
    pub key: String,
    /// The document's fields.
    pub fields: Fields,
}

impl Document {
    /// Deserialize the document's fields into a typed record.
    ///
    /// # Errors
    ///
    /// Returns the underlying serde error when the fields do not match the
    /// record type.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.fields.clone()))
    }
}

/// Comparison operator for [`DocumentStore::query`].
///
/// The ledger only ever filters by equality; the operator is explicit so
/// adapters backed by richer stores can extend it without changing call
/// sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOp {
    /// Field equals value.
    Eq,
}

/// Write behavior for [`DocumentStore::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Shallow field merge: mentioned fields overwrite, unmentioned fields
    /// persist. Creates the document when absent.
    #[default]
    Merge,
    /// Replace the whole document with the given fields.
    Replace,
}

/// Errors surfaced by a store adapter.
///
/// The ledger propagates these unchanged - no catching, wrapping, or
/// retrying.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected or failed the operation.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Keyed collections of JSON documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a single document by key. Absence is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on transport or backend failure.
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>, StoreError>;

    /// Fetch all documents whose `field` compares to `value` under `op`.
    /// No result ordering is guaranteed.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on transport or backend failure.
    async fn query(
        &self,
        collection: &str,
        field: &str,
        op: QueryOp,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError>;

    /// Fetch every document in a collection.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on transport or backend failure.
    async fn scan(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Insert a new document, returning the store-assigned key.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on transport or backend failure.
    async fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// Write to a document by key. [`WriteMode::Merge`] creates the
    /// document when absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on transport or backend failure.
    async fn update(
        &self,
        collection: &str,
        key: &str,
        fields: Fields,
        mode: WriteMode,
    ) -> Result<(), StoreError>;

    /// Delete a document by key. Deleting an absent document is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on transport or backend failure.
    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError>;
}
