//! Typed records for each store collection.
//!
//! Documents come off the store as raw field maps; each collection maps to
//! exactly one record type with explicit optional fields, so a missing
//! field surfaces at decode time instead of deep inside the aggregation
//! arithmetic. Wire names are camelCase.

pub mod contact;
pub mod order;
pub mod price;
pub mod redemption;
pub mod shop;
pub mod user;

pub use contact::{ContactRecord, NewContact};
pub use order::{NewOrder, OrderRecord};
pub use price::GoldPriceRecord;
pub use redemption::{NewRedemption, RedemptionRecord};
pub use shop::ShopRecord;
pub use user::UserRecord;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::LedgerError;
use crate::store::{Document, Fields};

/// Serialize a record into a document field map.
pub(crate) fn to_fields<T: Serialize>(record: &T) -> Result<Fields, LedgerError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(LedgerError::DataCorruption(format!(
            "record serialized to a non-object value: {other}"
        ))),
        Err(e) => Err(LedgerError::DataCorruption(format!(
            "failed to serialize record: {e}"
        ))),
    }
}

/// Serialize a timestamp the way record fields serialize it, so stored
/// strings and decoded values round-trip through one formatting path.
pub(crate) fn timestamp_value(at: DateTime<Utc>) -> Value {
    serde_json::json!(at)
}

/// Map a decode failure to `DataCorruption` with collection and key
/// context.
pub(crate) fn decode_error(collection: &str, doc: &Document, err: &serde_json::Error) -> LedgerError {
    LedgerError::DataCorruption(format!("invalid {collection} document {}: {err}", doc.key))
}
