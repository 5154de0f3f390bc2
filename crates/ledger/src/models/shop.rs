//! Shop catalog records.

use serde::{Deserialize, Serialize};

use super::decode_error;
use crate::error::LedgerError;
use crate::store::{Document, Fields, collections};

/// A shop-catalog document.
///
/// Pure CRUD: the ledger never interprets the fields, it only persists
/// them and embeds them in dashboard summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopRecord {
    /// Store-assigned key. Not part of the document fields.
    #[serde(skip)]
    pub key: String,
    /// The catalog entry, of caller-defined shape.
    #[serde(flatten)]
    pub fields: Fields,
}

impl ShopRecord {
    pub(crate) fn from_document(doc: &Document) -> Result<Self, LedgerError> {
        let mut record: Self = doc
            .decode()
            .map_err(|e| decode_error(collections::SHOPS, doc, &e))?;
        record.key.clone_from(&doc.key);
        Ok(record)
    }
}
