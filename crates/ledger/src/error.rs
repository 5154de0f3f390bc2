//! Unified error handling for the rewards ledger.
//!
//! Not-found is not an error anywhere in this crate: single-key lookups
//! return `Ok(None)` and collection queries return empty vectors, so
//! callers check the sentinel instead of catching.

use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A caller-supplied argument failed validation (empty correlation key,
    /// non-positive price). Surfaced directly; never retried.
    #[error("validation error: {0}")]
    Validation(String),

    /// Store or transport failure, propagated unchanged from the adapter.
    /// Retry policy belongs to the caller, not the ledger.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A stored document does not decode into its typed record.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Result type alias for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// A merge-write creates its target document, so a `None` on the immediate
/// re-read means the adapter misbehaved.
pub(crate) fn missing_after_write(collection: &str, key: &str) -> LedgerError {
    LedgerError::DataCorruption(format!("{collection} document {key} missing after write"))
}
