#![allow(non_snake_case)]

use crate::converter::summary_line;
use crate::hooks::use_converter::ConverterHandle;
use dioxus::prelude::*;

/// The summary line, or "Loading..." while a conversion is in flight.
/// The error banner is hidden while converting.
#[component]
pub fn ConversionResult() -> Element {
    let signals = use_context::<ConverterHandle>().signals;

    let converting = *signals.converting.read();
    if converting {
        return rsx! {
            p { "aria-busy": "true", "Loading..." }
        };
    }

    let result = *signals.result.read();
    let amount = *signals.throttled_amount.read();
    let from = signals.from.read().clone();
    let to = signals.to.read().clone();
    let summary = summary_line(converting, result, amount, &from, &to);
    let error = signals.error.read().clone();

    rsx! {
        if let Some(summary) = summary {
            p {
                strong { "{summary}" }
            }
        }
        if let Some(notice) = error {
            p {
                role: "alert",
                style: "color: var(--pico-del-color);",
                "{notice.message}"
            }
        }
    }
}
