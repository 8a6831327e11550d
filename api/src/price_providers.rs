//! Defines the trait for external price data providers and its CoinGecko
//! implementation.

use crate::asset::AssetCatalog;
use crate::error::ApiError;
use crate::price_map::PriceTable;
use crate::quote_currency::QuoteCurrencySet;
use serde::Deserialize;
use serde::Serialize;

/// A service that can list assets and quote currencies, and price assets.
///
/// Any transport failure, non-2xx status or unparsable body is an error.
#[allow(async_fn_in_trait)]
pub trait PriceProvider {
    /// Fetches the catalog of convertible assets.
    async fn coins_list(&self) -> Result<AssetCatalog, ApiError>;

    /// Fetches the quote currencies assets can be priced in.
    async fn supported_vs_currencies(&self) -> Result<QuoteCurrencySet, ApiError>;

    /// Fetches the price of every asset in `ids` in every currency of
    /// `vs_currencies`.
    async fn simple_price(
        &self,
        ids: &[&str],
        vs_currencies: &[&str],
    ) -> Result<PriceTable, ApiError>;
}

/// The selectable provider backends.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
)]
#[strum(ascii_case_insensitive)]
pub enum PriceProviderKind {
    #[default]
    CoinGecko,
}

/// Provides price data from the public CoinGecko API.
pub mod coin_gecko {
    use super::*;
    use dioxus_logger::tracing;

    pub const COINS_LIST_PATH: &str = "/coins/list";
    pub const VS_CURRENCIES_PATH: &str = "/simple/supported_vs_currencies";
    pub const SIMPLE_PRICE_PATH: &str = "/simple/price";

    /// An implementation of the `PriceProvider` trait for CoinGecko.
    #[derive(Clone, Debug)]
    pub struct CoinGecko {
        client: reqwest::Client,
        api_base: String,
    }

    impl CoinGecko {
        pub fn new(api_base: impl Into<String>) -> Self {
            let api_base = api_base.into().trim_end_matches('/').to_string();
            Self {
                client: reqwest::Client::new(),
                api_base,
            }
        }

        pub fn coins_list_url(&self) -> String {
            format!("{}{}", self.api_base, COINS_LIST_PATH)
        }

        pub fn vs_currencies_url(&self) -> String {
            format!("{}{}", self.api_base, VS_CURRENCIES_PATH)
        }

        pub fn simple_price_url(&self, ids: &[&str], vs_currencies: &[&str]) -> String {
            format!(
                "{}{}?ids={}&vs_currencies={}",
                self.api_base,
                SIMPLE_PRICE_PATH,
                ids.join(","),
                vs_currencies.join(",")
            )
        }

        /// GETs `url` and decodes the JSON body into `T`.
        async fn get_json<T>(&self, url: &str) -> Result<T, ApiError>
        where
            T: serde::de::DeserializeOwned,
        {
            tracing::debug!("GET {}", url);

            let resp = self.client.get(url).send().await?;
            let status = resp.status();
            let body = resp.text().await?;
            decode(status, &body)
        }
    }

    /// Maps a response to its payload. A non-2xx status wins over the body.
    pub fn decode<T>(status: reqwest::StatusCode, body: &str) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(serde_json::from_str(body)?)
    }

    impl PriceProvider for CoinGecko {
        async fn coins_list(&self) -> Result<AssetCatalog, ApiError> {
            self.get_json(&self.coins_list_url()).await
        }

        async fn supported_vs_currencies(&self) -> Result<QuoteCurrencySet, ApiError> {
            self.get_json(&self.vs_currencies_url()).await
        }

        async fn simple_price(
            &self,
            ids: &[&str],
            vs_currencies: &[&str],
        ) -> Result<PriceTable, ApiError> {
            self.get_json(&self.simple_price_url(ids, vs_currencies))
                .await
        }
    }
}
