#![allow(non_snake_case)]

use crate::hooks::use_converter::ConverterHandle;
use api::reference_currency::ReferenceCurrency;
use dioxus::prelude::*;
use strum::IntoEnumIterator;

/// Reference prices of the fixed basket, refreshed by the poller.
#[component]
pub fn PriceTable() -> Element {
    let signals = use_context::<ConverterHandle>().signals;
    let Some(snapshot) = signals.snapshot.read().clone() else {
        return rsx! {
            p { "aria-busy": "true", "Fetching prices..." }
        };
    };

    rsx! {
        table {
            thead {
                tr {
                    th { scope: "col", "Asset" }
                    for currency in ReferenceCurrency::iter() {
                        th {
                            scope: "col",
                            key: "{currency.code()}",
                            title: "{currency.name()}",
                            "{currency.code()}"
                        }
                    }
                }
            }
            tbody {
                for row in snapshot.rows() {
                    tr {
                        key: "{row.asset.id()}",
                        th { scope: "row", "{row.asset.name()}" }
                        for (currency, price) in row.prices.iter() {
                            td {
                                key: "{currency.code()}",
                                {format_cell(*currency, *price)}
                            }
                        }
                    }
                }
            }
        }
    }
}

fn format_cell(currency: ReferenceCurrency, price: Option<f64>) -> String {
    price
        .map(|p| currency.format_price(p))
        .unwrap_or_else(|| "-".to_string())
}
