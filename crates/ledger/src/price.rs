//! Gold price registry: the singleton price-per-gram configuration value.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, instrument};

use crate::error::LedgerError;
use crate::models::{GoldPriceRecord, decode_error, to_fields};
use crate::store::{DocumentStore, WriteMode, collections};

/// Document key of the singleton price record.
const GOLD_PRICE_KEY: &str = "goldPrice";

/// Registry for the gold-price singleton.
pub struct PriceRegistry<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> PriceRegistry<'a> {
    /// Create a registry over a store handle.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Current price per gram, or `default_price` when none has been set.
    /// Absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns a store failure or `DataCorruption` when the stored record
    /// does not decode.
    pub async fn get(&self, default_price: Decimal) -> Result<Decimal, LedgerError> {
        match self.store.get(collections::SETTINGS, GOLD_PRICE_KEY).await? {
            Some(doc) => {
                let record: GoldPriceRecord = doc
                    .decode()
                    .map_err(|e| decode_error(collections::SETTINGS, &doc, &e))?;
                Ok(record.price)
            }
            None => Ok(default_price),
        }
    }

    /// Set the price per gram.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` unless the price is positive
    /// (`Decimal` already rules out the non-numeric case), or a store
    /// failure.
    #[instrument(skip(self))]
    pub async fn set(&self, price: Decimal) -> Result<Decimal, LedgerError> {
        if price <= Decimal::ZERO {
            return Err(LedgerError::Validation(
                "gold price must be a positive number".to_owned(),
            ));
        }

        let record = GoldPriceRecord {
            price,
            updated_at: Some(Utc::now()),
        };
        let fields = to_fields(&record)?;
        self.store
            .update(collections::SETTINGS, GOLD_PRICE_KEY, fields, WriteMode::Merge)
            .await?;
        info!(%price, "gold price updated");
        Ok(price)
    }
}
