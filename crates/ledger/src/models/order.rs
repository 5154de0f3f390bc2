//! Reward-grant ("order") records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use karat_core::{CustomId, Email};

use super::decode_error;
use crate::error::LedgerError;
use crate::store::{Document, collections};

/// A reward-grant document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    /// Store-assigned key. Not part of the document fields.
    #[serde(skip)]
    pub key: String,
    /// Locally generated correlation ID, distinct from the store key.
    #[serde(rename = "_customId")]
    pub custom_id: CustomId,
    /// Correlation key from the originating purchase system. Opaque, and
    /// not guaranteed unique across time unless the upstream system
    /// guarantees it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Owning user. Absent until the order is claimed; first attribution
    /// wins and is never overwritten.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<Email>,
    /// Grams earned by this order. Missing counts as zero.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub reward_grams: Option<Decimal>,
    /// Earning time, the start of the vesting clock. Missing counts as
    /// earned "now" (not yet vested).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl OrderRecord {
    pub(crate) fn from_document(doc: &Document) -> Result<Self, LedgerError> {
        let mut record: Self = doc
            .decode()
            .map_err(|e| decode_error(collections::ORDERS, doc, &e))?;
        record.key.clone_from(&doc.key);
        Ok(record)
    }
}

/// Input for recording a reward grant.
#[derive(Debug, Clone, Default)]
pub struct NewOrder {
    /// Correlation key from the originating purchase system.
    pub order_id: Option<String>,
    /// Owning user, when already known at creation time.
    pub user_email: Option<Email>,
    /// Grams earned.
    pub reward_grams: Option<Decimal>,
    /// Earning time; defaults to now when unset.
    pub created_at: Option<DateTime<Utc>>,
}
