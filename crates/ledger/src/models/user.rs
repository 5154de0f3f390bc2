//! User profile records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use karat_core::Email;

use super::decode_error;
use crate::error::LedgerError;
use crate::store::{Document, Fields, collections};

/// A user profile document, keyed by email.
///
/// Profile fields are caller-defined and ride along untyped; the ledger
/// only interprets the identity and bookkeeping fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// The user's email, also the document key.
    pub email: Email,
    /// First-creation time. Written once by upsert, protected thereafter.
    /// Optional because a merge-update can implicitly create a document
    /// that never went through upsert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Refreshed on every upsert or update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Arbitrary profile fields (name, phone, marketing flags, ...).
    #[serde(flatten)]
    pub profile: Fields,
}

impl UserRecord {
    pub(crate) fn from_document(doc: &Document) -> Result<Self, LedgerError> {
        doc.decode()
            .map_err(|e| decode_error(collections::USERS, doc, &e))
    }
}
