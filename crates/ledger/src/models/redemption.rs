//! Redemption request records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use karat_core::{CustomId, Email, RedemptionStatus};

use super::decode_error;
use crate::error::LedgerError;
use crate::store::{Document, collections};

/// A redemption request document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionRecord {
    /// Store-assigned key. Not part of the document fields.
    #[serde(skip)]
    pub key: String,
    /// Locally generated correlation ID, distinct from the store key.
    #[serde(rename = "_customId")]
    pub custom_id: CustomId,
    /// The redeeming user.
    pub email: Email,
    /// Grams requested for payout.
    #[serde(with = "rust_decimal::serde::float")]
    pub grams: Decimal,
    /// Lifecycle status. Defaults to pending when the stored document
    /// omits it.
    #[serde(default)]
    pub status: RedemptionStatus,
    /// Set on the pending -> approved transition, never overwritten.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    /// When the request was recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl RedemptionRecord {
    pub(crate) fn from_document(doc: &Document) -> Result<Self, LedgerError> {
        let mut record: Self = doc
            .decode()
            .map_err(|e| decode_error(collections::REDEMPTIONS, doc, &e))?;
        record.key.clone_from(&doc.key);
        Ok(record)
    }
}

/// Input for recording a redemption request.
#[derive(Debug, Clone)]
pub struct NewRedemption {
    /// The redeeming user.
    pub email: Email,
    /// Grams requested for payout.
    pub grams: Decimal,
    /// Initial status; pending when unset.
    pub status: Option<RedemptionStatus>,
}
