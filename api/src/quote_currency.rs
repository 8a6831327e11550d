//! The set of currency codes an asset can be priced in.

use serde::Deserialize;
use serde::Serialize;

/// Quote currency codes (lowercase, as the provider spells them), in the
/// order the provider returned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteCurrencySet(Vec<String>);

impl QuoteCurrencySet {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(codes.into_iter().map(Into::into).collect())
    }

    /// The hardcoded set used until (or instead of) a provider response.
    pub fn fallback() -> Self {
        Self::new(["btc", "eth", "ltc", "bch", "bnb", "eos"])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.iter().any(|c| c == code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for QuoteCurrencySet {
    fn default() -> Self {
        Self::fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_vs_currencies_payload() {
        let set: QuoteCurrencySet = serde_json::from_str(r#"["btc", "usd", "eur"]"#).unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), ["btc", "usd", "eur"]);
        assert!(set.contains("usd"));
        assert!(!set.contains("USD"));
    }

    #[test]
    fn fallback_set_contains_btc() {
        let set = QuoteCurrencySet::default();
        assert_eq!(set.len(), 6);
        assert!(set.contains("btc"));
    }
}
