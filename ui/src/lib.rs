//! The client-side converter: a reactive core plus the Dioxus widgets on top.

use dioxus::prelude::*;

pub mod compat;
mod components;
pub mod conversion;
pub mod converter;
pub mod error;
pub mod hooks;
pub mod notice;
pub mod price_poller;
pub mod reactive;
pub mod reference_data;
pub mod throttle;

#[cfg(test)]
mod test_support;

use api::config::ConverterConfig;
use components::amount_input::AmountInput;
use components::asset_select::FromAssetSelect;
use components::asset_select::ToCurrencySelect;
use components::conversion_result::ConversionResult;
use components::pico::Card;
use components::pico::Container;
use components::pico::Grid;
use components::price_table::PriceTable;
use hooks::use_converter::use_converter;

const PICO_CSS: &str = "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.cyan.min.css";

#[allow(non_snake_case)]
pub fn App() -> Element {
    rsx! {
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1.0",
        }
        document::Stylesheet {
            href: PICO_CSS,
        }
        ConverterApp {}
    }
}

/// Owns the converter. It starts on first render and shuts down on unmount.
#[component]
fn ConverterApp() -> Element {
    let handle = use_converter(ConverterConfig::default());
    use_context_provider(|| handle.clone());

    rsx! {
        Container {
            header {
                h1 { "Cryptocurrency Converter" }
            }
            Card {
                AmountInput {}
                Grid {
                    FromAssetSelect {}
                    ToCurrencySelect {}
                }
                ConversionResult {}
            }
            Card {
                PriceTable {}
            }
            footer {
                small {
                    "Powered by "
                    a {
                        href: "https://www.coingecko.com",
                        target: "_blank",
                        rel: "noopener noreferrer",
                        "CoinGecko"
                    }
                }
            }
        }
    }
}
