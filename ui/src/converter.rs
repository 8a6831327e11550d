//! Wires the throttle, the reference data loader, the price poller and the
//! conversion pipeline into one converter with a single teardown point.

use crate::conversion::ConversionInputs;
use crate::conversion::ConversionOutputs;
use crate::conversion::ConversionPipeline;
use crate::error::ConverterError;
use crate::notice::ErrorNotice;
use crate::notice::ErrorSlot;
use crate::price_poller::PricePoller;
use crate::reactive::Scope;
use crate::reactive::Store;
use crate::reference_data::ReferenceData;
use crate::throttle::Throttle;
use api::asset::AssetCatalog;
use api::config::ConverterConfig;
use api::price_providers::PriceProvider;
use api::quote_currency::QuoteCurrencySet;
use api::snapshot::PriceSnapshot;
use dioxus_logger::tracing;
use std::cell::RefCell;
use std::rc::Rc;

/// The running background activities. Dropping them is the teardown.
struct Activities {
    _pipeline: ConversionPipeline,
    _throttle: Throttle<f64>,
    _poller: PricePoller,
}

/// The converter's complete state plus the activities that maintain it.
///
/// All published state lives in [`Store`]s; the presentation layer
/// subscribes to whichever it renders.
pub struct Converter {
    amount: Store<f64>,
    throttled_amount: Store<f64>,
    from: Store<String>,
    to: Store<String>,
    reference: ReferenceData,
    snapshot: Store<Option<PriceSnapshot>>,
    converting: Store<bool>,
    result: Store<Option<f64>>,
    errors: ErrorSlot,
    scope: Scope,
    activities: RefCell<Option<Activities>>,
}

impl Converter {
    /// Creates the state and starts every activity: the first price poll,
    /// the reference data load and the first conversion are all issued
    /// immediately.
    pub fn start<P: PriceProvider + 'static>(provider: Rc<P>, config: &ConverterConfig) -> Self {
        let scope = Scope::new();

        let amount = Store::new(0.0);
        let from = Store::new(config.initial_from.clone());
        let to = Store::new(config.initial_to.clone());
        let reference = ReferenceData::new();
        let snapshot = Store::new(None);
        let converting = Store::new(false);
        let result = Store::new(None);
        let errors: ErrorSlot = Store::new(None);

        tracing::info!(
            "starting converter ({} at {})",
            config.provider,
            config.api_base
        );

        let poller = PricePoller::start(
            provider.clone(),
            config.poll_period,
            snapshot.clone(),
            errors.clone(),
            scope.clone(),
        );

        reference.load(provider.clone(), scope.clone());

        let throttle = Throttle::new(&amount, config.throttle_interval);
        let throttled_amount = throttle.output().clone();

        let pipeline = ConversionPipeline::start(
            provider,
            ConversionInputs {
                amount: throttled_amount.clone(),
                from: from.clone(),
                to: to.clone(),
            },
            ConversionOutputs {
                converting: converting.clone(),
                result: result.clone(),
                errors: errors.clone(),
            },
            scope.clone(),
        );

        Self {
            amount,
            throttled_amount,
            from,
            to,
            reference,
            snapshot,
            converting,
            result,
            errors,
            scope,
            activities: RefCell::new(Some(Activities {
                _pipeline: pipeline,
                _throttle: throttle,
                _poller: poller,
            })),
        }
    }

    /// Sets the raw amount. Negative and non-finite amounts are rejected.
    pub fn set_amount(&self, amount: f64) -> Result<(), ConverterError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ConverterError::InvalidAmount(amount.to_string()));
        }
        self.amount.set(amount);
        Ok(())
    }

    /// Sets the amount from the text of a numeric input. Blank text is 0.
    pub fn set_amount_text(&self, text: &str) -> Result<(), ConverterError> {
        let trimmed = text.trim();
        let amount = if trimmed.is_empty() {
            0.0
        } else {
            trimmed
                .parse::<f64>()
                .map_err(|_| ConverterError::InvalidAmount(text.to_string()))?
        };
        self.set_amount(amount)
    }

    /// Selects the asset to convert from. It must be in the current catalog.
    pub fn select_from(&self, asset_id: &str) -> Result<(), ConverterError> {
        if !self.reference.assets.with(|assets| assets.contains(asset_id)) {
            return Err(ConverterError::UnknownAsset(asset_id.to_string()));
        }
        self.from.set(asset_id.to_string());
        Ok(())
    }

    /// Selects the quote currency. It must be in the current set.
    pub fn select_to(&self, currency: &str) -> Result<(), ConverterError> {
        if !self
            .reference
            .currencies
            .with(|currencies| currencies.contains(currency))
        {
            return Err(ConverterError::UnknownCurrency(currency.to_string()));
        }
        self.to.set(currency.to_string());
        Ok(())
    }

    pub fn amount(&self) -> &Store<f64> {
        &self.amount
    }

    pub fn throttled_amount(&self) -> &Store<f64> {
        &self.throttled_amount
    }

    pub fn from(&self) -> &Store<String> {
        &self.from
    }

    pub fn to(&self) -> &Store<String> {
        &self.to
    }

    pub fn assets(&self) -> &Store<AssetCatalog> {
        &self.reference.assets
    }

    pub fn currencies(&self) -> &Store<QuoteCurrencySet> {
        &self.reference.currencies
    }

    /// `true` while the reference data loads.
    pub fn loading(&self) -> &Store<bool> {
        &self.reference.loading
    }

    /// The amount input should not accept edits while this is `true`.
    pub fn is_input_locked(&self) -> bool {
        self.reference.loading.get()
    }

    pub fn converting(&self) -> &Store<bool> {
        &self.converting
    }

    pub fn result(&self) -> &Store<Option<f64>> {
        &self.result
    }

    pub fn errors(&self) -> &ErrorSlot {
        &self.errors
    }

    pub fn snapshot(&self) -> &Store<Option<PriceSnapshot>> {
        &self.snapshot
    }

    /// "`amount from = result to`", once a conversion has settled.
    pub fn summary(&self) -> Option<String> {
        summary_line(
            self.converting.get(),
            self.result.get(),
            self.throttled_amount.get(),
            &self.from.get(),
            &self.to.get(),
        )
    }

    /// The error banner, hidden while a conversion is in flight.
    pub fn visible_error(&self) -> Option<ErrorNotice> {
        if self.converting.get() {
            return None;
        }
        self.errors.get()
    }

    pub fn is_running(&self) -> bool {
        self.activities.borrow().is_some()
    }

    /// Cancels the throttle timer and the poll schedule. Requests still in
    /// flight finish, but publish nothing.
    pub fn shutdown(&self) {
        self.scope.close();
        if self.activities.borrow_mut().take().is_some() {
            tracing::info!("converter shut down");
        }
    }
}

impl Drop for Converter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

pub fn format_summary(amount: f64, from: &str, result: f64, to: &str) -> String {
    format!("{amount} {from} = {result} {to}")
}

/// The summary line for a settled conversion; nothing while converting or
/// without a result.
pub fn summary_line(
    converting: bool,
    result: Option<f64>,
    amount: f64,
    from: &str,
    to: &str,
) -> Option<String> {
    if converting {
        return None;
    }
    result.map(|result| format_summary(amount, from, result, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat;
    use crate::notice::ErrorSource;
    use crate::test_support::Call;
    use crate::test_support::MockProvider;
    use std::time::Duration;
    use tokio::task::LocalSet;

    fn config() -> ConverterConfig {
        ConverterConfig::default()
    }

    fn start(provider: MockProvider) -> Converter {
        Converter::start(Rc::new(provider), &config())
    }

    async fn settle() {
        compat::sleep(Duration::from_millis(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn startup_issues_poll_load_and_first_conversion() {
        LocalSet::new()
            .run_until(async {
                let converter = start(MockProvider::new());
                assert!(converter.loading().get());
                assert!(converter.is_input_locked());
                assert!(converter.converting().get());
                assert_eq!(converter.from().get(), "01coin");
                assert_eq!(converter.to().get(), "btc");

                settle().await;

                assert!(!converter.loading().get());
                assert!(converter.assets().get().contains("bitcoin"));
                assert!(converter.snapshot().get().is_some());
                // The default pair has no price in the mock.
                assert_eq!(converter.result().get(), None);
                assert_eq!(
                    converter.visible_error().map(|n| n.source),
                    Some(ErrorSource::Conversion)
                );
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn typed_amount_reaches_the_conversion_after_the_throttle() {
        LocalSet::new()
            .run_until(async {
                let provider = MockProvider::new();
                let converter = start(provider);
                settle().await;

                converter.select_from("bitcoin").unwrap();
                converter.select_to("usd").unwrap();
                converter.set_amount_text("1").unwrap();
                converter.set_amount_text("2").unwrap();
                settle().await;
                assert_eq!(converter.amount().get(), 2.0);
                assert_eq!(converter.throttled_amount().get(), 0.0);

                compat::sleep(Duration::from_millis(500)).await;
                assert_eq!(converter.throttled_amount().get(), 2.0);
                assert_eq!(converter.result().get(), Some(100_000.0));
                assert_eq!(converter.visible_error(), None);
                assert_eq!(
                    converter.summary().as_deref(),
                    Some("2 bitcoin = 100000 usd")
                );
            })
            .await;
    }

    #[test]
    fn summary_line_only_for_a_settled_result() {
        assert_eq!(
            summary_line(false, Some(100_000.0), 2.0, "bitcoin", "usd").as_deref(),
            Some("2 bitcoin = 100000 usd")
        );
        assert_eq!(summary_line(true, Some(1.0), 1.0, "bitcoin", "usd"), None);
        assert_eq!(summary_line(false, None, 1.0, "bitcoin", "usd"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn rejects_invalid_input_without_touching_state() {
        LocalSet::new()
            .run_until(async {
                let converter = start(MockProvider::new());
                settle().await;

                assert!(matches!(
                    converter.set_amount(-1.0),
                    Err(ConverterError::InvalidAmount(_))
                ));
                assert!(converter.set_amount(f64::NAN).is_err());
                assert!(converter.set_amount_text("abc").is_err());
                assert_eq!(converter.amount().get(), 0.0);

                converter.set_amount_text("  ").unwrap();
                assert_eq!(converter.amount().get(), 0.0);

                assert_eq!(
                    converter.select_from("01coin"),
                    Err(ConverterError::UnknownAsset("01coin".to_string()))
                );
                assert_eq!(
                    converter.select_to("gbp"),
                    Err(ConverterError::UnknownCurrency("gbp".to_string()))
                );
                assert_eq!(converter.to().get(), "btc");
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn fallback_collections_after_a_failed_load() {
        LocalSet::new()
            .run_until(async {
                let provider = MockProvider::new();
                *provider.catalog.borrow_mut() = Err(429);
                let converter = start(provider);
                settle().await;

                assert_eq!(converter.assets().get(), AssetCatalog::fallback());
                assert_eq!(converter.currencies().get(), QuoteCurrencySet::fallback());
                assert!(converter.select_from("dogecoin").is_ok());
                // A load failure never reaches the banner.
                assert_ne!(
                    converter.errors().get().map(|n| n.source),
                    Some(ErrorSource::PricePoll)
                );
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_polling_and_pending_amounts() {
        LocalSet::new()
            .run_until(async {
                let converter = start(MockProvider::new());
                settle().await;
                converter.set_amount(5.0).unwrap();

                converter.shutdown();
                assert!(!converter.is_running());
                compat::sleep(Duration::from_secs(3600)).await;

                assert_eq!(converter.throttled_amount().get(), 0.0);
                assert_eq!(converter.amount().subscriber_count(), 0);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn polls_every_five_minutes_while_running() {
        LocalSet::new()
            .run_until(async {
                let provider = Rc::new(MockProvider::new());
                let converter = Converter::start(provider.clone(), &config());

                compat::sleep(Duration::from_secs(601)).await;
                assert_eq!(provider.poll_times().len(), 3);

                drop(converter);
                compat::sleep(Duration::from_secs(601)).await;
                assert_eq!(provider.poll_times().len(), 3);
                assert!(provider
                    .calls()
                    .iter()
                    .any(|c| matches!(c, Call::CoinsList)));
            })
            .await;
    }
}
