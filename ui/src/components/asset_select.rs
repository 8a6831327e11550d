#![allow(non_snake_case)]

use crate::hooks::use_converter::ConverterHandle;
use dioxus::prelude::*;
use dioxus_logger::tracing;

/// Chooses the asset being converted.
#[component]
pub fn FromAssetSelect() -> Element {
    let handle = use_context::<ConverterHandle>();
    let assets = handle.signals.assets.read().clone();
    let selected = handle.signals.from.read().clone();

    rsx! {
        label {
            r#for: "from-asset",
            "From"
            select {
                id: "from-asset",
                onchange: move |evt: FormEvent| {
                    if let Err(e) = handle.converter().select_from(&evt.value()) {
                        tracing::warn!("{e}");
                    }
                },
                for asset in assets.iter() {
                    option {
                        key: "{asset.id}",
                        value: "{asset.id}",
                        selected: asset.id == selected,
                        "{asset.name} ({asset.symbol})"
                    }
                }
            }
        }
    }
}

/// Chooses the currency the result is quoted in.
#[component]
pub fn ToCurrencySelect() -> Element {
    let handle = use_context::<ConverterHandle>();
    let currencies = handle.signals.currencies.read().clone();
    let selected = handle.signals.to.read().clone();

    rsx! {
        label {
            r#for: "to-currency",
            "To"
            select {
                id: "to-currency",
                onchange: move |evt: FormEvent| {
                    if let Err(e) = handle.converter().select_to(&evt.value()) {
                        tracing::warn!("{e}");
                    }
                },
                for currency in currencies.iter() {
                    option {
                        key: "{currency}",
                        value: "{currency}",
                        selected: currency == selected,
                        "{currency.to_uppercase()}"
                    }
                }
            }
        }
    }
}
