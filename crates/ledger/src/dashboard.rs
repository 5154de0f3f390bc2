//! Ledger aggregation engine: the per-user dashboard summary.
//!
//! Read-only. The engine performs several independent multi-document
//! reads (price, orders, redemptions, shops) with no cross-collection
//! snapshot: a write landing mid-computation can produce a summary
//! reflecting a state that never existed atomically. Re-computation on
//! the next call converges, so this is an eventual-consistency read, not
//! a bug, and the engine is safe to call at any frequency.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::{debug, instrument};

use karat_core::Email;

use crate::error::LedgerError;
use crate::models::{OrderRecord, ShopRecord};
use crate::orders::OrderLedger;
use crate::price::PriceRegistry;
use crate::redemptions::RedemptionLedger;
use crate::shops::ShopCatalog;
use crate::store::DocumentStore;

/// Grams vest this long after their earning time, boundary inclusive.
pub const VESTING_WINDOW_MS: i64 = 30 * 24 * 60 * 60 * 1000;

/// Progress toward the next whole-gram milestone.
///
/// `progress_percent` is `current / next_milestone`: a sawtooth fraction
/// of the way to the next whole unit, reaching 1.0 exactly at whole-unit
/// boundaries. It is a simple progress indicator, not a percentile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneProgress {
    /// Total grams earned so far.
    #[serde(with = "rust_decimal::serde::float")]
    pub current: Decimal,
    /// The next whole-gram milestone, at least 1.
    #[serde(with = "rust_decimal::serde::float")]
    pub next_milestone: Decimal,
    /// Fraction of the way to `next_milestone`, in (0, 1].
    #[serde(with = "rust_decimal::serde::float")]
    pub progress_percent: Decimal,
}

/// The per-user dashboard summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Total grams ever earned, vested or not.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_grams: Decimal,
    /// Monetary value of the total grams at the current price, rounded to
    /// two decimal places.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
    /// Vested grams minus outstanding redemptions, floored at zero.
    #[serde(with = "rust_decimal::serde::float")]
    pub redeemable_grams: Decimal,
    /// The price per gram the value was computed against.
    #[serde(with = "rust_decimal::serde::float")]
    pub current_price: Decimal,
    /// The orders behind the totals.
    pub orders: Vec<OrderRecord>,
    /// The shop catalog, embedded for dashboard display.
    pub shops: Vec<ShopRecord>,
    /// Progress toward the next whole-gram milestone.
    pub progress: MilestoneProgress,
}

/// Read-only aggregation over orders, redemptions, price, and shops.
pub struct DashboardEngine<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> DashboardEngine<'a> {
    /// Create an engine over a store handle.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Compute the dashboard summary for a user as of now.
    ///
    /// # Errors
    ///
    /// Returns a store failure or `DataCorruption` for an undecodable
    /// stored document.
    pub async fn compute(
        &self,
        email: &Email,
        default_price: Decimal,
    ) -> Result<DashboardSummary, LedgerError> {
        self.compute_at(email, default_price, Utc::now()).await
    }

    /// Compute the summary against an explicit evaluation time.
    ///
    /// The vesting boundary is exact to the millisecond; injecting the
    /// clock keeps it deterministic for callers that need that (and for
    /// tests).
    ///
    /// # Errors
    ///
    /// Returns a store failure or `DataCorruption` for an undecodable
    /// stored document.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn compute_at(
        &self,
        email: &Email,
        default_price: Decimal,
        now: DateTime<Utc>,
    ) -> Result<DashboardSummary, LedgerError> {
        let current_price = PriceRegistry::new(self.store).get(default_price).await?;
        let orders = OrderLedger::new(self.store).list(Some(email)).await?;

        let vesting_window = Duration::milliseconds(VESTING_WINDOW_MS);
        let mut total_grams = Decimal::ZERO;
        let mut total_value = Decimal::ZERO;
        let mut vested_grams = Decimal::ZERO;
        for order in &orders {
            let grams = order.reward_grams.unwrap_or_default();
            total_grams += grams;
            total_value += grams * current_price;
            // no earning time means earned now: not yet vested
            let earned_at = order.created_at.unwrap_or(now);
            if now - earned_at >= vesting_window {
                vested_grams += grams;
            }
        }

        let redemptions = RedemptionLedger::new(self.store).list(Some(email)).await?;
        let reserved: Decimal = redemptions
            .iter()
            .filter(|r| r.status.is_outstanding())
            .map(|r| r.grams)
            .sum();

        let redeemable_grams = (vested_grams - reserved).max(Decimal::ZERO);
        let total_value =
            total_value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        let next_milestone = next_milestone(total_grams);
        let progress_percent = total_grams / next_milestone;

        let shops = ShopCatalog::new(self.store).list().await?;

        debug!(%total_grams, %vested_grams, %reserved, %redeemable_grams, "dashboard computed");

        Ok(DashboardSummary {
            total_grams,
            total_value,
            redeemable_grams,
            current_price,
            orders,
            shops,
            progress: MilestoneProgress {
                current: total_grams,
                next_milestone,
                progress_percent,
            },
        })
    }
}

/// Next whole-gram milestone: `ceil(total)`, floored at one so the
/// progress division is defined for an empty ledger.
fn next_milestone(total_grams: Decimal) -> Decimal {
    let ceiling = total_grams.ceil();
    if ceiling.is_zero() { Decimal::ONE } else { ceiling }
}
