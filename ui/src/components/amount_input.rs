#![allow(non_snake_case)]

use crate::hooks::use_converter::ConverterHandle;
use dioxus::prelude::*;
use dioxus_logger::tracing;

/// The numeric amount field. Read-only while the reference data loads.
#[component]
pub fn AmountInput() -> Element {
    let handle = use_context::<ConverterHandle>();
    let locked = *handle.signals.loading.read();
    let busy = if locked { "true" } else { "false" };
    // The raw text is kept locally so partial input like "1." survives a render.
    let mut text = use_signal(|| handle.signals.amount.peek().to_string());

    rsx! {
        label {
            r#for: "amount",
            "Amount"
            input {
                id: "amount",
                r#type: "number",
                min: "0",
                step: "any",
                value: "{text}",
                readonly: locked,
                "aria-busy": busy,
                oninput: move |evt: FormEvent| {
                    let value = evt.value();
                    if let Err(e) = handle.converter().set_amount_text(&value) {
                        tracing::debug!("ignoring amount input: {e}");
                    }
                    text.set(value);
                },
            }
        }
    }
}
