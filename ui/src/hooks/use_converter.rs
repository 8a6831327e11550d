//! Bridges the converter's stores into Dioxus signals.

use crate::converter::Converter;
use crate::notice::ErrorNotice;
use crate::reactive::Store;
use crate::reactive::Subscription;
use api::asset::AssetCatalog;
use api::config::ConverterConfig;
use api::price_providers::coin_gecko::CoinGecko;
use api::price_providers::PriceProviderKind;
use api::quote_currency::QuoteCurrencySet;
use api::snapshot::PriceSnapshot;
use dioxus::prelude::*;
use futures::channel::mpsc;
use futures::channel::mpsc::UnboundedReceiver;
use futures::StreamExt;
use std::rc::Rc;

/// Read-only mirrors of the converter state. Reading one in a component
/// subscribes that component to it.
#[derive(Clone, Copy)]
pub struct ConverterSignals {
    pub amount: Signal<f64>,
    pub throttled_amount: Signal<f64>,
    pub from: Signal<String>,
    pub to: Signal<String>,
    pub assets: Signal<AssetCatalog>,
    pub currencies: Signal<QuoteCurrencySet>,
    pub loading: Signal<bool>,
    pub converting: Signal<bool>,
    pub result: Signal<Option<f64>>,
    pub error: Signal<Option<ErrorNotice>>,
    pub snapshot: Signal<Option<PriceSnapshot>>,
}

/// What components get from the context: the converter for input
/// operations and the signals for rendering.
#[derive(Clone)]
pub struct ConverterHandle {
    converter: Rc<Converter>,
    pub signals: ConverterSignals,
}

impl ConverterHandle {
    pub fn converter(&self) -> &Converter {
        &self.converter
    }
}

/// Starts a converter for the lifetime of the calling component.
///
/// The converter is created on first render and shut down when the
/// component unmounts.
pub fn use_converter(config: ConverterConfig) -> ConverterHandle {
    let converter = use_hook(move || {
        let provider = match config.provider {
            PriceProviderKind::CoinGecko => CoinGecko::new(config.api_base.clone()),
        };
        Rc::new(Converter::start(Rc::new(provider), &config))
    });

    let signals = ConverterSignals {
        amount: use_mirror(converter.amount()),
        throttled_amount: use_mirror(converter.throttled_amount()),
        from: use_mirror(converter.from()),
        to: use_mirror(converter.to()),
        assets: use_mirror(converter.assets()),
        currencies: use_mirror(converter.currencies()),
        loading: use_mirror(converter.loading()),
        converting: use_mirror(converter.converting()),
        result: use_mirror(converter.result()),
        error: use_mirror(converter.errors()),
        snapshot: use_mirror(converter.snapshot()),
    };

    let on_unmount = converter.clone();
    use_drop(move || on_unmount.shutdown());

    ConverterHandle { converter, signals }
}

/// Keeps a signal equal to `store` for as long as the component lives.
///
/// Stores change from tasks outside the Dioxus runtime, so changes travel
/// through a channel and the signal is written by a task of this component.
fn use_mirror<T: Clone + PartialEq + 'static>(store: &Store<T>) -> Signal<T> {
    let mut signal = use_signal(|| store.get());
    use_hook(|| {
        let (subscription, mut changes) = forward(store);
        spawn(async move {
            while let Some(value) = changes.next().await {
                signal.set(value);
            }
        });
        Rc::new(subscription)
    });
    signal
}

/// Sends every future value of `store` down a channel until the returned
/// subscription is dropped.
fn forward<T: Clone + PartialEq + 'static>(store: &Store<T>) -> (Subscription, UnboundedReceiver<T>) {
    let (tx, rx) = mpsc::unbounded();
    let subscription = store.subscribe(move |value| {
        // A closed receiver means the component is gone.
        let _ = tx.unbounded_send(value.clone());
    });
    (subscription, rx)
}
