//! Redemption lifecycle: payout requests against the vested balance.
//!
//! State machine, one instance per redemption document:
//!
//! ```text
//!  [pending] --approve--> [approved]    (terminal)
//!  [approved] --approve--> [approved]   (idempotent no-op)
//! ```
//!
//! There is no reject or cancel transition in this model.

use chrono::Utc;
use tracing::{info, instrument};

use karat_core::{CustomId, Email, RedemptionStatus};

use crate::error::{LedgerError, missing_after_write};
use crate::models::{NewRedemption, RedemptionRecord, timestamp_value, to_fields};
use crate::store::{DocumentStore, Fields, QueryOp, WriteMode, collections};

/// Ledger of redemption request documents.
pub struct RedemptionLedger<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> RedemptionLedger<'a> {
    /// Create a ledger over a store handle.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Record a redemption request.
    ///
    /// Attaches a fresh correlation ID; status defaults to pending when
    /// the caller leaves it unset, never undefined. The grams reserve
    /// against the redeemable balance immediately - before approval - so
    /// the same balance cannot be redeemed twice while an approval is in
    /// flight.
    ///
    /// # Errors
    ///
    /// Returns a store failure.
    #[instrument(skip(self, new_redemption), fields(email = %new_redemption.email))]
    pub async fn create(
        &self,
        new_redemption: NewRedemption,
    ) -> Result<RedemptionRecord, LedgerError> {
        let record = RedemptionRecord {
            key: String::new(),
            custom_id: CustomId::generate(),
            email: new_redemption.email,
            grams: new_redemption.grams,
            status: new_redemption.status.unwrap_or_default(),
            approved_at: None,
            created_at: Some(Utc::now()),
        };
        let fields = to_fields(&record)?;
        let key = self.store.insert(collections::REDEMPTIONS, fields).await?;
        info!(%key, grams = %record.grams, "redemption created");
        Ok(RedemptionRecord { key, ..record })
    }

    /// List redemptions, optionally restricted to one user.
    ///
    /// # Errors
    ///
    /// Returns a store failure or `DataCorruption` for an undecodable
    /// stored document.
    pub async fn list(&self, email: Option<&Email>) -> Result<Vec<RedemptionRecord>, LedgerError> {
        let docs = match email {
            Some(email) => {
                self.store
                    .query(
                        collections::REDEMPTIONS,
                        "email",
                        QueryOp::Eq,
                        &serde_json::Value::String(email.to_string()),
                    )
                    .await?
            }
            None => self.store.scan(collections::REDEMPTIONS).await?,
        };
        docs.iter().map(RedemptionRecord::from_document).collect()
    }

    /// Approve a redemption.
    ///
    /// Absent key is `Ok(None)`. An already-approved redemption is
    /// returned unchanged - the transition is one-way and idempotent, and
    /// `approvedAt` is never overwritten. Otherwise the status moves to
    /// approved with `approvedAt = now`.
    ///
    /// The status check and the write are separate store calls; the window
    /// between them is covered by idempotence of the transition, not by
    /// locking.
    ///
    /// # Errors
    ///
    /// Returns a store failure or `DataCorruption` for an undecodable
    /// stored document.
    #[instrument(skip(self))]
    pub async fn approve(&self, key: &str) -> Result<Option<RedemptionRecord>, LedgerError> {
        let Some(doc) = self.store.get(collections::REDEMPTIONS, key).await? else {
            return Ok(None);
        };
        let record = RedemptionRecord::from_document(&doc)?;
        if record.status == RedemptionStatus::Approved {
            return Ok(Some(record));
        }

        let mut fields = Fields::new();
        fields.insert("status".to_owned(), serde_json::json!(RedemptionStatus::Approved));
        fields.insert("approvedAt".to_owned(), timestamp_value(Utc::now()));
        self.store
            .update(collections::REDEMPTIONS, key, fields, WriteMode::Merge)
            .await?;
        info!("redemption approved");

        let doc = self
            .store
            .get(collections::REDEMPTIONS, key)
            .await?
            .ok_or_else(|| missing_after_write(collections::REDEMPTIONS, key))?;
        RedemptionRecord::from_document(&doc).map(Some)
    }
}
