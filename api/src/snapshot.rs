//! The periodically refreshed reference price table.

use crate::price_map::PriceTable;
use crate::reference_currency::ReferenceAsset;
use crate::reference_currency::ReferenceCurrency;
use serde::Deserialize;
use serde::Serialize;
use strum::IntoEnumIterator;

/// A complete copy of the reference basket prices from one poll.
///
/// Snapshots are replaced wholesale; a new poll never merges into an old one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    table: PriceTable,
}

/// One table row: an asset and its price in each reference currency.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRow {
    pub asset: ReferenceAsset,
    pub prices: Vec<(ReferenceCurrency, Option<f64>)>,
}

impl PriceSnapshot {
    pub fn new(table: PriceTable) -> Self {
        Self { table }
    }

    /// Asset ids of the basket, in row order.
    pub fn basket_ids() -> Vec<&'static str> {
        ReferenceAsset::iter().map(|a| a.id()).collect()
    }

    /// Currency codes of the basket, in column order.
    pub fn basket_currencies() -> Vec<&'static str> {
        ReferenceCurrency::iter().map(|c| c.api_code()).collect()
    }

    pub fn price(&self, asset: ReferenceAsset, currency: ReferenceCurrency) -> Option<f64> {
        self.table.get(asset.id(), currency.api_code())
    }

    /// Rows in display order. Cells the provider left out are `None`.
    pub fn rows(&self) -> Vec<SnapshotRow> {
        ReferenceAsset::iter()
            .map(|asset| SnapshotRow {
                asset,
                prices: ReferenceCurrency::iter()
                    .map(|currency| (currency, self.price(asset, currency)))
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_basket_order_and_tolerate_gaps() {
        let table: PriceTable = serde_json::from_str(
            r#"{
                "bitcoin": {"usd": 50000, "eur": 46000, "gbp": 39000},
                "ethereum": {"usd": 3000}
            }"#,
        )
        .unwrap();
        let snapshot = PriceSnapshot::new(table);

        let rows = snapshot.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].asset, ReferenceAsset::Bitcoin);
        assert_eq!(
            rows[0].prices,
            vec![
                (ReferenceCurrency::USD, Some(50000.0)),
                (ReferenceCurrency::EUR, Some(46000.0)),
                (ReferenceCurrency::GBP, Some(39000.0)),
            ]
        );
        assert_eq!(rows[1].prices[1], (ReferenceCurrency::EUR, None));
        assert!(rows[2].prices.iter().all(|(_, p)| p.is_none()));
    }

    #[test]
    fn basket_query_parameters() {
        assert_eq!(PriceSnapshot::basket_ids().join(","), "bitcoin,ethereum,litecoin");
        assert_eq!(PriceSnapshot::basket_currencies().join(","), "usd,eur,gbp");
    }
}
