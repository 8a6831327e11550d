//! Provides a map of asset prices keyed by asset id and quote currency.

use crate::error::ApiError;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;

/// Prices as returned by the provider's simple-price endpoint:
/// `{ assetId: { currencyCode: price } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable(HashMap<String, HashMap<String, f64>>);

impl PriceTable {
    /// Retrieves the price of `asset` in `currency`, if the provider sent one.
    pub fn get(&self, asset: &str, currency: &str) -> Option<f64> {
        self.0.get(asset)?.get(currency).copied()
    }

    /// Like [`PriceTable::get`], but a missing pair is an error.
    pub fn require(&self, asset: &str, currency: &str) -> Result<f64, ApiError> {
        self.get(asset, currency).ok_or_else(|| ApiError::MissingPrice {
            asset: asset.to_string(),
            currency: currency.to_string(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
