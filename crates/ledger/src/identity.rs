//! Identity registry: user profiles keyed by email.
//!
//! Users are merge-upserted: unspecified fields persist across partial
//! updates, `createdAt` is written once and protected thereafter.

use chrono::Utc;
use serde_json::Value;
use tracing::{info, instrument};

use karat_core::Email;

use crate::error::{LedgerError, missing_after_write};
use crate::models::{UserRecord, timestamp_value};
use crate::store::{DocumentStore, Fields, WriteMode, collections};

/// Fields callers cannot set through a profile patch. The email is the
/// document key, and `createdAt` is immutable after first write.
const PROTECTED_FIELDS: &[&str] = &["email", "createdAt"];

/// Registry for user profile documents.
pub struct IdentityRegistry<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> IdentityRegistry<'a> {
    /// Create a registry over a store handle.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Create or merge-update a user profile.
    ///
    /// Existing users keep their `createdAt` and every profile field the
    /// patch does not mention; `updatedAt` refreshes on every call. One
    /// document read plus one merge-write; the merge is commutative for
    /// disjoint field sets, which bounds the damage of concurrent upserts.
    ///
    /// # Errors
    ///
    /// Returns a store failure or `DataCorruption` when the resulting
    /// document does not decode.
    #[instrument(skip(self, profile), fields(email = %email))]
    pub async fn upsert(&self, email: &Email, profile: Fields) -> Result<UserRecord, LedgerError> {
        let existing = self.store.get(collections::USERS, email.as_str()).await?;
        let now = Utc::now();

        let mut fields = strip_protected(profile);
        fields.insert("email".to_owned(), Value::String(email.to_string()));
        fields.insert("updatedAt".to_owned(), timestamp_value(now));
        if existing.is_none() {
            fields.insert("createdAt".to_owned(), timestamp_value(now));
        }

        self.store
            .update(collections::USERS, email.as_str(), fields, WriteMode::Merge)
            .await?;
        info!(created = existing.is_none(), "user upserted");
        self.require(email).await
    }

    /// Fetch a user by email. Absence is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns a store failure or `DataCorruption` for an undecodable
    /// stored document.
    pub async fn get(&self, email: &Email) -> Result<Option<UserRecord>, LedgerError> {
        self.store
            .get(collections::USERS, email.as_str())
            .await?
            .map(|doc| UserRecord::from_document(&doc))
            .transpose()
    }

    /// List every user profile.
    ///
    /// # Errors
    ///
    /// Returns a store failure or `DataCorruption` for an undecodable
    /// stored document.
    pub async fn list(&self) -> Result<Vec<UserRecord>, LedgerError> {
        self.store
            .scan(collections::USERS)
            .await?
            .iter()
            .map(UserRecord::from_document)
            .collect()
    }

    /// Merge-write profile updates without the create-or-merge branching
    /// of [`Self::upsert`].
    ///
    /// Assumes the user exists; the store's merge-write creates the
    /// document implicitly when it does not, leaving it without a
    /// `createdAt`. Callers uncertain about existence should prefer
    /// [`Self::upsert`].
    ///
    /// # Errors
    ///
    /// Returns a store failure or `DataCorruption` when the resulting
    /// document does not decode.
    #[instrument(skip(self, updates), fields(email = %email))]
    pub async fn update(&self, email: &Email, updates: Fields) -> Result<UserRecord, LedgerError> {
        let mut fields = strip_protected(updates);
        fields.insert("email".to_owned(), Value::String(email.to_string()));
        fields.insert("updatedAt".to_owned(), timestamp_value(Utc::now()));
        self.store
            .update(collections::USERS, email.as_str(), fields, WriteMode::Merge)
            .await?;
        self.require(email).await
    }

    /// Delete a user profile.
    ///
    /// Does NOT cascade: the user's orders and redemptions stay behind,
    /// orphaned, and keep counting in any later aggregation for the email.
    ///
    /// # Errors
    ///
    /// Returns a store failure.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn delete(&self, email: &Email) -> Result<(), LedgerError> {
        self.store
            .delete(collections::USERS, email.as_str())
            .await?;
        info!("user deleted");
        Ok(())
    }

    async fn require(&self, email: &Email) -> Result<UserRecord, LedgerError> {
        let doc = self
            .store
            .get(collections::USERS, email.as_str())
            .await?
            .ok_or_else(|| missing_after_write(collections::USERS, email.as_str()))?;
        UserRecord::from_document(&doc)
    }
}

fn strip_protected(mut fields: Fields) -> Fields {
    for field in PROTECTED_FIELDS {
        fields.remove(*field);
    }
    fields
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::store::MemoryStore;

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    fn profile(pairs: &[(&str, Value)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_upsert_creates_with_matching_timestamps() {
        let store = MemoryStore::new();
        let registry = IdentityRegistry::new(&store);

        let user = registry
            .upsert(&email("a@b.com"), profile(&[("firstName", json!("Ada"))]))
            .await
            .unwrap();

        assert_eq!(user.email.as_str(), "a@b.com");
        assert_eq!(user.created_at, user.updated_at);
        assert_eq!(user.profile.get("firstName"), Some(&json!("Ada")));
    }

    #[tokio::test]
    async fn test_upsert_preserves_created_at_and_unmentioned_fields() {
        let store = MemoryStore::new();
        let registry = IdentityRegistry::new(&store);
        let ada = email("a@b.com");

        let first = registry
            .upsert(&ada, profile(&[("firstName", json!("Ada")), ("tier", json!("gold"))]))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;

        let second = registry
            .upsert(&ada, profile(&[("tier", json!("platinum"))]))
            .await
            .unwrap();

        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at > first.updated_at);
        assert_eq!(second.profile.get("firstName"), Some(&json!("Ada")));
        assert_eq!(second.profile.get("tier"), Some(&json!("platinum")));
    }

    #[tokio::test]
    async fn test_upsert_strips_protected_fields() {
        let store = MemoryStore::new();
        let registry = IdentityRegistry::new(&store);
        let ada = email("a@b.com");

        let first = registry.upsert(&ada, Fields::new()).await.unwrap();
        let forged = registry
            .upsert(
                &ada,
                profile(&[
                    ("createdAt", json!("1999-01-01T00:00:00Z")),
                    ("email", json!("evil@b.com")),
                ]),
            )
            .await
            .unwrap();

        assert_eq!(forged.created_at, first.created_at);
        assert_eq!(forged.email.as_str(), "a@b.com");
    }

    #[tokio::test]
    async fn test_get_absent_is_none_and_list_grows() {
        let store = MemoryStore::new();
        let registry = IdentityRegistry::new(&store);

        assert!(registry.get(&email("nobody@x.com")).await.unwrap().is_none());
        assert!(registry.list().await.unwrap().is_empty());

        registry.upsert(&email("a@b.com"), Fields::new()).await.unwrap();
        registry.upsert(&email("c@d.com"), Fields::new()).await.unwrap();
        assert_eq!(registry.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_merges_and_refreshes_updated_at() {
        let store = MemoryStore::new();
        let registry = IdentityRegistry::new(&store);
        let ada = email("a@b.com");

        let created = registry
            .upsert(&ada, profile(&[("firstName", json!("Ada"))]))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;

        let updated = registry
            .update(&ada, profile(&[("phone", json!("+1555"))]))
            .await
            .unwrap();

        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.profile.get("firstName"), Some(&json!("Ada")));
        assert_eq!(updated.profile.get("phone"), Some(&json!("+1555")));
    }

    #[tokio::test]
    async fn test_update_on_missing_user_creates_implicitly() {
        let store = MemoryStore::new();
        let registry = IdentityRegistry::new(&store);

        let user = registry
            .update(&email("ghost@b.com"), profile(&[("firstName", json!("G"))]))
            .await
            .unwrap();

        // implicitly created documents never went through upsert
        assert!(user.created_at.is_none());
        assert!(user.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_delete_then_get_is_none() {
        let store = MemoryStore::new();
        let registry = IdentityRegistry::new(&store);
        let ada = email("a@b.com");

        registry.upsert(&ada, Fields::new()).await.unwrap();
        registry.delete(&ada).await.unwrap();
        assert!(registry.get(&ada).await.unwrap().is_none());
    }
}
