//! Runtime settings of the converter.

use crate::price_providers::PriceProviderKind;
use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.coingecko.com/api/v3";

/// Everything the converter needs to know before it starts.
///
/// The API base can be overridden at build time with `COINGECKO_API_BASE`;
/// a browser build has no runtime environment to read from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConverterConfig {
    pub provider: PriceProviderKind,
    pub api_base: String,

    /// Minimum time between two amount updates reaching the conversion.
    pub throttle_interval: Duration,

    /// Time between two polls of the reference price table.
    pub poll_period: Duration,

    pub initial_from: String,
    pub initial_to: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            provider: PriceProviderKind::default(),
            api_base: option_env!("COINGECKO_API_BASE")
                .unwrap_or(DEFAULT_API_BASE)
                .to_string(),
            throttle_interval: Duration::from_millis(500),
            poll_period: Duration::from_millis(5 * 60 * 1000),
            initial_from: "01coin".to_string(),
            initial_to: "btc".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetCatalog;
    use crate::quote_currency::QuoteCurrencySet;

    #[test]
    fn defaults_match_the_fallback_collections() {
        let config = ConverterConfig::default();

        assert_eq!(config.throttle_interval, Duration::from_millis(500));
        assert_eq!(config.poll_period, Duration::from_millis(300_000));
        assert!(AssetCatalog::fallback().contains(&config.initial_from));
        assert!(QuoteCurrencySet::fallback().contains(&config.initial_to));
    }

    #[test]
    fn round_trips_through_json() {
        let config = ConverterConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<ConverterConfig>(&json).unwrap(), config);
    }
}
