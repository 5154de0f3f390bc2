//! Order ledger: reward-grant records and their attribution.
//!
//! Orders are created by the purchase pipeline, often before the buyer has
//! a registered identity; attribution ("claiming") links them to an email
//! afterwards, first writer wins.

use chrono::Utc;
use serde_json::Value;
use tracing::{info, instrument};

use karat_core::{CustomId, Email};

use crate::error::{LedgerError, missing_after_write};
use crate::models::{NewOrder, OrderRecord, to_fields};
use crate::store::{DocumentStore, Fields, QueryOp, WriteMode, collections};

/// Ledger of reward-grant documents.
pub struct OrderLedger<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> OrderLedger<'a> {
    /// Create a ledger over a store handle.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Record a reward grant.
    ///
    /// Attaches a fresh correlation ID and defaults the earning time to
    /// now. `user_email` may be absent: orders are routinely created
    /// before the purchasing identity registers and attributed later via
    /// [`Self::claim`].
    ///
    /// # Errors
    ///
    /// Returns a store failure.
    #[instrument(skip(self, new_order))]
    pub async fn create(&self, new_order: NewOrder) -> Result<OrderRecord, LedgerError> {
        let record = OrderRecord {
            key: String::new(),
            custom_id: CustomId::generate(),
            order_id: new_order.order_id,
            user_email: new_order.user_email,
            reward_grams: new_order.reward_grams,
            created_at: Some(new_order.created_at.unwrap_or_else(Utc::now)),
        };
        let fields = to_fields(&record)?;
        let key = self.store.insert(collections::ORDERS, fields).await?;
        info!(%key, custom_id = %record.custom_id, "order created");
        Ok(OrderRecord { key, ..record })
    }

    /// List orders, optionally restricted to one user.
    ///
    /// An empty result is an empty vector, never a not-found sentinel.
    ///
    /// # Errors
    ///
    /// Returns a store failure or `DataCorruption` for an undecodable
    /// stored document.
    pub async fn list(&self, email: Option<&Email>) -> Result<Vec<OrderRecord>, LedgerError> {
        let docs = match email {
            Some(email) => {
                self.store
                    .query(
                        collections::ORDERS,
                        "userEmail",
                        QueryOp::Eq,
                        &Value::String(email.to_string()),
                    )
                    .await?
            }
            None => self.store.scan(collections::ORDERS).await?,
        };
        docs.iter().map(OrderRecord::from_document).collect()
    }

    /// Fetch an order by store key. Absence is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns a store failure or `DataCorruption` for an undecodable
    /// stored document.
    pub async fn get(&self, key: &str) -> Result<Option<OrderRecord>, LedgerError> {
        self.store
            .get(collections::ORDERS, key)
            .await?
            .map(|doc| OrderRecord::from_document(&doc))
            .transpose()
    }

    /// Merge-write updates into an order and return the refreshed record.
    ///
    /// # Errors
    ///
    /// Returns a store failure or `DataCorruption` when the resulting
    /// document does not decode.
    #[instrument(skip(self, updates))]
    pub async fn update(&self, key: &str, updates: Fields) -> Result<OrderRecord, LedgerError> {
        self.store
            .update(collections::ORDERS, key, updates, WriteMode::Merge)
            .await?;
        let doc = self
            .store
            .get(collections::ORDERS, key)
            .await?
            .ok_or_else(|| missing_after_write(collections::ORDERS, key))?;
        OrderRecord::from_document(&doc)
    }

    /// Delete an order.
    ///
    /// May leave dangling references from redemptions or past attribution;
    /// there is no cascading cleanup.
    ///
    /// # Errors
    ///
    /// Returns a store failure.
    #[instrument(skip(self))]
    pub async fn delete(&self, key: &str) -> Result<(), LedgerError> {
        self.store.delete(collections::ORDERS, key).await?;
        Ok(())
    }

    /// Attribute every order carrying the correlation key `order_id` to
    /// `email`, where not already attributed.
    ///
    /// A correlation key can match several documents (split shipments);
    /// each match is claimed independently and only when `userEmail` is
    /// currently unset - first attribution wins, later claims are silently
    /// ignored per record. Returns the refreshed last record of the match
    /// set, or `Ok(None)` when nothing matched.
    ///
    /// The per-document check-then-set is two store calls, not one
    /// conditional operation: two concurrent claimants can both observe an
    /// unclaimed record, and the final owner is whichever write lands last
    /// at the store. A store failure partway through leaves the already
    /// applied attributions in place; re-running is safe because claimed
    /// records are skipped.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` when `order_id` is empty, a store
    /// failure, or `DataCorruption` for an undecodable stored document.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn claim(
        &self,
        order_id: &str,
        email: &Email,
    ) -> Result<Option<OrderRecord>, LedgerError> {
        if order_id.is_empty() {
            return Err(LedgerError::Validation(
                "order correlation key must not be empty".to_owned(),
            ));
        }

        let matches = self
            .store
            .query(
                collections::ORDERS,
                "orderId",
                QueryOp::Eq,
                &Value::String(order_id.to_owned()),
            )
            .await?;

        let mut last_key = None;
        for doc in &matches {
            let record = OrderRecord::from_document(doc)?;
            if record.user_email.is_none() {
                let mut fields = Fields::new();
                fields.insert("userEmail".to_owned(), Value::String(email.to_string()));
                self.store
                    .update(collections::ORDERS, &doc.key, fields, WriteMode::Merge)
                    .await?;
                info!(key = %doc.key, "order attributed");
            }
            last_key = Some(doc.key.clone());
        }

        match last_key {
            Some(key) => self.get(&key).await,
            None => Ok(None),
        }
    }
}
