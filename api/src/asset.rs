//! Convertible assets as listed by the provider's coin catalog.

use serde::Deserialize;
use serde::Serialize;

/// A single convertible asset. `id` is the key used in price queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub symbol: String,
    pub name: String,
}

impl Asset {
    pub fn new(id: impl Into<String>, symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

/// The ordered list of assets a user can convert from.
///
/// A catalog is only ever replaced as a whole; there is no API for editing
/// individual entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetCatalog(Vec<Asset>);

impl AssetCatalog {
    pub fn new(assets: Vec<Asset>) -> Self {
        Self(assets)
    }

    /// The hardcoded catalog used until (or instead of) a provider response.
    pub fn fallback() -> Self {
        Self(vec![
            Asset::new("01coin", "zoc", "01coin"),
            Asset::new("dogecoin", "doge", "Dogecoin"),
            Asset::new("binance-bitcoin", "btcb", "Binance Bitcoin"),
            Asset::new("usd-coin", "usdc", "USD Coin"),
        ])
    }

    pub fn get(&self, id: &str) -> Option<&Asset> {
        self.0.iter().find(|asset| asset.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Asset> {
        self.0.iter()
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::fallback()
    }
}
