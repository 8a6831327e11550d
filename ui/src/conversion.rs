//! Converts the (throttled) amount whenever it or the selected pair changes.

use crate::compat;
use crate::notice::ErrorNotice;
use crate::notice::ErrorSlot;
use crate::reactive::Effect;
use crate::reactive::Scope;
use crate::reactive::Store;
use api::price_providers::PriceProvider;
use api::ApiError;
use dioxus_logger::tracing;
use std::cell::Cell;
use std::rc::Rc;

/// What a conversion reads. `amount` is normally the throttled amount.
#[derive(Clone, Debug)]
pub struct ConversionInputs {
    pub amount: Store<f64>,
    pub from: Store<String>,
    pub to: Store<String>,
}

/// What a conversion publishes.
#[derive(Clone, Debug)]
pub struct ConversionOutputs {
    /// `true` from trigger until the latest activation settles.
    pub converting: Store<bool>,
    pub result: Store<Option<f64>>,
    pub errors: ErrorSlot,
}

/// Prices one unit of `from` in `to` and scales it by `amount`.
pub async fn convert<P: PriceProvider>(
    provider: &P,
    amount: f64,
    from: &str,
    to: &str,
) -> Result<f64, ApiError> {
    let table = provider.simple_price(&[from], &[to]).await?;
    Ok(amount * table.require(from, to)?)
}

struct Pipeline<P> {
    provider: Rc<P>,
    inputs: ConversionInputs,
    outputs: ConversionOutputs,
    generation: Cell<u64>,
    scope: Scope,
}

/// Re-runs a conversion each time any input changes.
///
/// Each activation is stamped with a generation number; a response that
/// arrives after a newer activation started is discarded.
pub struct ConversionPipeline {
    _effect: Effect,
}

impl ConversionPipeline {
    /// Starts the pipeline. The first conversion is issued right away.
    pub fn start<P: PriceProvider + 'static>(
        provider: Rc<P>,
        inputs: ConversionInputs,
        outputs: ConversionOutputs,
        scope: Scope,
    ) -> Self {
        let pipeline = Rc::new(Pipeline {
            provider,
            inputs: inputs.clone(),
            outputs,
            generation: Cell::new(0),
            scope,
        });

        let effect = Effect::new(move || pipeline.activate())
            .depends_on(&inputs.amount)
            .depends_on(&inputs.from)
            .depends_on(&inputs.to)
            .start();

        Self { _effect: effect }
    }
}

impl<P: PriceProvider + 'static> Pipeline<P> {
    fn activate(self: &Rc<Self>) {
        let ticket = self.generation.get() + 1;
        self.generation.set(ticket);

        let amount = self.inputs.amount.get();
        let from = self.inputs.from.get();
        let to = self.inputs.to.get();
        self.outputs.converting.set(true);

        let pipeline = self.clone();
        compat::spawn_detached(async move {
            let _settle = SettleGuard {
                pipeline: pipeline.as_ref(),
                ticket,
            };
            let outcome = convert(pipeline.provider.as_ref(), amount, &from, &to).await;
            if !pipeline.is_current(ticket) {
                tracing::debug!("discarding stale conversion {from}->{to} (#{ticket})");
                return;
            }

            match outcome {
                Ok(value) => {
                    pipeline.outputs.result.set(Some(value));
                    pipeline.outputs.errors.set(None);
                }
                Err(e) => {
                    tracing::warn!("conversion {from}->{to} failed: {e}");
                    pipeline.outputs.errors.set(Some(ErrorNotice::conversion()));
                    pipeline.outputs.result.set(None);
                }
            }
        });
    }
}

impl<P> Pipeline<P> {
    fn is_current(&self, ticket: u64) -> bool {
        self.scope.is_alive() && self.generation.get() == ticket
    }
}

/// Lowers the converting flag when an activation ends, however it ends,
/// unless a newer activation has taken over.
struct SettleGuard<'a, P> {
    pipeline: &'a Pipeline<P>,
    ticket: u64,
}

impl<P> Drop for SettleGuard<'_, P> {
    fn drop(&mut self) {
        if self.pipeline.is_current(self.ticket) {
            self.pipeline.outputs.converting.set(false);
        }
    }
}
