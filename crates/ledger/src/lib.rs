//! Karat rewards ledger and aggregation engine.
//!
//! Turns order (reward-grant) and redemption documents into a consistent
//! per-user balance of gold grams: a 30-day vesting window, reservation of
//! outstanding redemptions, first-attribution-wins claiming, and a
//! read-only dashboard summary.
//!
//! # Architecture
//!
//! Storage is consumed through the [`store::DocumentStore`] trait - keyed
//! collections of JSON documents with per-document atomic writes and no
//! cross-document transactions. The components borrow the store handle:
//!
//! - [`IdentityRegistry`] - user profiles keyed by email, merge upserts
//! - [`PriceRegistry`] - the singleton gold price
//! - [`OrderLedger`] - reward grants and their attribution
//! - [`RedemptionLedger`] - the pending -> approved payout lifecycle
//! - [`DashboardEngine`] - read-only aggregation over all of the above
//! - [`ShopCatalog`], [`ContactLog`] - plain CRUD surfaces
//!
//! Every mutating operation touches one document per logical operation
//! (claiming may touch several matching documents). Store failures
//! propagate unchanged and nothing is retried; retry policy belongs to
//! the caller.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod contacts;
pub mod dashboard;
pub mod error;
pub mod identity;
pub mod models;
pub mod orders;
pub mod price;
pub mod redemptions;
pub mod shops;
pub mod store;

pub use contacts::ContactLog;
pub use dashboard::{DashboardEngine, DashboardSummary, MilestoneProgress, VESTING_WINDOW_MS};
pub use error::LedgerError;
pub use identity::IdentityRegistry;
pub use models::{
    ContactRecord, GoldPriceRecord, NewContact, NewOrder, NewRedemption, OrderRecord,
    RedemptionRecord, ShopRecord, UserRecord,
};
pub use orders::OrderLedger;
pub use price::PriceRegistry;
pub use redemptions::RedemptionLedger;
pub use shops::ShopCatalog;
pub use store::{Document, DocumentStore, Fields, MemoryStore, QueryOp, StoreError, WriteMode};
