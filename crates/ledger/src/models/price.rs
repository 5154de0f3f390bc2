//! The singleton gold-price configuration record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The current price of one gram of gold, in the shop currency.
///
/// Stored as a singleton settings document. Absence means no price has
/// been configured yet; callers supply a default instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoldPriceRecord {
    /// Price per gram. Always positive.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// When the price was last set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
