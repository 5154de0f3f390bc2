//! Contact log: append-and-list messages from the storefront contact form.

use chrono::Utc;
use tracing::instrument;

use crate::error::LedgerError;
use crate::models::{ContactRecord, NewContact, to_fields};
use crate::store::{DocumentStore, collections};

/// Append-and-list log of contact messages.
pub struct ContactLog<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> ContactLog<'a> {
    /// Create a log over a store handle.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Record a contact message, stamping the receive time.
    ///
    /// # Errors
    ///
    /// Returns a store failure.
    #[instrument(skip(self, new_contact))]
    pub async fn create(&self, new_contact: NewContact) -> Result<ContactRecord, LedgerError> {
        let record = ContactRecord {
            key: String::new(),
            name: new_contact.name,
            email: new_contact.email,
            message: new_contact.message,
            created_at: Some(Utc::now()),
        };
        let fields = to_fields(&record)?;
        let key = self.store.insert(collections::CONTACTS, fields).await?;
        Ok(ContactRecord { key, ..record })
    }

    /// List every recorded message.
    ///
    /// # Errors
    ///
    /// Returns a store failure or `DataCorruption` for an undecodable
    /// stored document.
    pub async fn list(&self) -> Result<Vec<ContactRecord>, LedgerError> {
        self.store
            .scan(collections::CONTACTS)
            .await?
            .iter()
            .map(ContactRecord::from_document)
            .collect()
    }

    /// Delete a message.
    ///
    /// # Errors
    ///
    /// Returns a store failure.
    #[instrument(skip(self))]
    pub async fn delete(&self, key: &str) -> Result<(), LedgerError> {
        self.store.delete(collections::CONTACTS, key).await?;
        Ok(())
    }
}
