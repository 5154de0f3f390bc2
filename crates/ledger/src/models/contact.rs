//! Contact-form message records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use karat_core::Email;

use super::decode_error;
use crate::error::LedgerError;
use crate::store::{Document, collections};

/// A contact-form message. Append-and-list; no invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    /// Store-assigned key. Not part of the document fields.
    #[serde(skip)]
    pub key: String,
    /// Sender's name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Sender's email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    /// The message body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// When the message was recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ContactRecord {
    pub(crate) fn from_document(doc: &Document) -> Result<Self, LedgerError> {
        let mut record: Self = doc
            .decode()
            .map_err(|e| decode_error(collections::CONTACTS, doc, &e))?;
        record.key.clone_from(&doc.key);
        Ok(record)
    }
}

/// Input for recording a contact-form message.
#[derive(Debug, Clone, Default)]
pub struct NewContact {
    /// Sender's name.
    pub name: Option<String>,
    /// Sender's email.
    pub email: Option<Email>,
    /// The message body.
    pub message: Option<String>,
}
