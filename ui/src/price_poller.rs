//! Keeps the reference price table fresh.

use crate::compat;
use crate::compat::interval::Interval;
use crate::compat::TaskGuard;
use crate::notice::ErrorNotice;
use crate::notice::ErrorSlot;
use crate::reactive::Scope;
use crate::reactive::Store;
use api::price_providers::PriceProvider;
use api::snapshot::PriceSnapshot;
use dioxus_logger::tracing;
use std::rc::Rc;
use std::time::Duration;

/// Polls the reference basket immediately and then every `period`.
///
/// A successful poll replaces the snapshot wholesale; a failed one keeps the
/// previous snapshot and raises the poll notice. Dropping the poller stops
/// the schedule.
pub struct PricePoller {
    task: TaskGuard,
}

impl PricePoller {
    pub fn start<P: PriceProvider + 'static>(
        provider: Rc<P>,
        period: Duration,
        snapshot: Store<Option<PriceSnapshot>>,
        errors: ErrorSlot,
        scope: Scope,
    ) -> Self {
        let task = compat::spawn(async move {
            let mut interval = Interval::new(period);
            loop {
                poll_once(provider.as_ref(), &snapshot, &errors, &scope).await;
                interval.tick().await;
            }
        });
        Self { task }
    }

    pub fn stop(&self) {
        self.task.cancel();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_cancelled()
    }
}

async fn poll_once<P: PriceProvider>(
    provider: &P,
    snapshot: &Store<Option<PriceSnapshot>>,
    errors: &ErrorSlot,
    scope: &Scope,
) {
    let ids = PriceSnapshot::basket_ids();
    let vs_currencies = PriceSnapshot::basket_currencies();
    let result = provider.simple_price(&ids, &vs_currencies).await;
    if !scope.is_alive() {
        return;
    }

    match result {
        Ok(table) => {
            tracing::debug!("reference prices: {:?}", table);
            snapshot.set(Some(PriceSnapshot::new(table)));
            // Only our own notice is cleared; a conversion error stays up.
            if errors.with(|e| e.as_ref().is_some_and(|n| n.source.is_price_poll())) {
                errors.set(None);
            }
        }
        Err(e) => {
            tracing::warn!("Error occurred while fetching prices: {e}");
            errors.set(Some(ErrorNotice::price_poll()));
        }
    }
}
