//! A scripted in-memory price provider for tests.

use crate::compat;
use crate::compat::Instant;
use api::asset::Asset;
use api::asset::AssetCatalog;
use api::price_map::PriceTable;
use api::price_providers::PriceProvider;
use api::quote_currency::QuoteCurrencySet;
use api::ApiError;
use std::cell::Cell;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CoinsList,
    VsCurrencies,
    SimplePrice { ids: Vec<String>, vs: Vec<String> },
}

/// Responses are set per endpoint; an `Err(status)` makes the call fail
/// with `ApiError::Status`.
pub struct MockProvider {
    pub catalog: RefCell<Result<AssetCatalog, u16>>,
    pub currencies: RefCell<Result<QuoteCurrencySet, u16>>,
    pub prices: RefCell<Result<PriceTable, u16>>,
    /// Latency of every call unless `price_latencies` has an entry queued.
    pub latency: Cell<Duration>,
    /// Consumed one per `simple_price` call.
    pub price_latencies: RefCell<VecDeque<Duration>>,
    pub calls: RefCell<Vec<(Instant, Call)>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            catalog: RefCell::new(Ok(AssetCatalog::new(vec![
                Asset::new("bitcoin", "btc", "Bitcoin"),
                Asset::new("ethereum", "eth", "Ethereum"),
            ]))),
            currencies: RefCell::new(Ok(QuoteCurrencySet::new(["usd", "eur"]))),
            prices: RefCell::new(Ok(prices(r#"{"bitcoin": {"usd": 50000}}"#))),
            latency: Cell::new(Duration::ZERO),
            price_latencies: RefCell::new(VecDeque::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn set_prices(&self, json: &str) {
        *self.prices.borrow_mut() = Ok(prices(json));
    }

    pub fn fail_prices(&self, status: u16) {
        *self.prices.borrow_mut() = Err(status);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().iter().map(|(_, c)| c.clone()).collect()
    }

    /// Times of the `simple_price` calls for the reference basket.
    pub fn poll_times(&self) -> Vec<Instant> {
        self.calls
            .borrow()
            .iter()
            .filter(|(_, c)| matches!(c, Call::SimplePrice { ids, .. } if ids.len() == 3))
            .map(|(t, _)| *t)
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push((compat::now(), call));
    }
}

pub fn prices(json: &str) -> PriceTable {
    serde_json::from_str(json).unwrap()
}

impl PriceProvider for MockProvider {
    async fn coins_list(&self) -> Result<AssetCatalog, ApiError> {
        self.record(Call::CoinsList);
        compat::sleep(self.latency.get()).await;
        self.catalog.borrow().clone().map_err(ApiError::Status)
    }

    async fn supported_vs_currencies(&self) -> Result<QuoteCurrencySet, ApiError> {
        self.record(Call::VsCurrencies);
        compat::sleep(self.latency.get()).await;
        self.currencies.borrow().clone().map_err(ApiError::Status)
    }

    async fn simple_price(
        &self,
        ids: &[&str],
        vs_currencies: &[&str],
    ) -> Result<PriceTable, ApiError> {
        self.record(Call::SimplePrice {
            ids: ids.iter().map(|s| s.to_string()).collect(),
            vs: vs_currencies.iter().map(|s| s.to_string()).collect(),
        });
        let latency = self
            .price_latencies
            .borrow_mut()
            .pop_front()
            .unwrap_or(self.latency.get());
        compat::sleep(latency).await;
        self.prices.borrow().clone().map_err(ApiError::Status)
    }
}
