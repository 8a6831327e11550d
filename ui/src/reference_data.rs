//! Loads the asset catalog and the quote currency list once at startup.

use crate::compat;
use crate::reactive::Scope;
use crate::reactive::Store;
use api::asset::AssetCatalog;
use api::price_providers::PriceProvider;
use api::quote_currency::QuoteCurrencySet;
use api::ApiError;
use dioxus_logger::tracing;
use std::rc::Rc;

/// The selectable collections plus the flag raised while they load.
///
/// Both collections start out as the hardcoded fallbacks and are only ever
/// replaced together.
#[derive(Clone, Debug)]
pub struct ReferenceData {
    pub assets: Store<AssetCatalog>,
    pub currencies: Store<QuoteCurrencySet>,
    /// While `true` the amount input should be read-only.
    pub loading: Store<bool>,
}

impl ReferenceData {
    pub fn new() -> Self {
        Self {
            assets: Store::new(AssetCatalog::fallback()),
            currencies: Store::new(QuoteCurrencySet::fallback()),
            loading: Store::new(false),
        }
    }

    /// Fetches both collections concurrently and publishes them.
    ///
    /// On any failure both collections are reset to the fallbacks. Nothing is
    /// published once `scope` has closed.
    pub fn load<P: PriceProvider + 'static>(&self, provider: Rc<P>, scope: Scope) {
        let data = self.clone();
        data.loading.set(true);

        compat::spawn_detached(async move {
            let result = fetch_reference_data(provider.as_ref()).await;
            if !scope.is_alive() {
                tracing::debug!("reference data arrived after teardown, ignored");
                return;
            }

            match result {
                Ok((assets, currencies)) if !assets.is_empty() && !currencies.is_empty() => {
                    tracing::info!(
                        "loaded {} assets and {} quote currencies",
                        assets.len(),
                        currencies.len()
                    );
                    data.assets.set(assets);
                    data.currencies.set(currencies);
                }
                Ok(_) => {
                    tracing::warn!("Provider returned an empty currency list. Used default values.");
                    data.reset_to_fallback();
                }
                Err(e) => {
                    tracing::warn!("Error occurred during loading currencies: {e}. Used default values.");
                    data.reset_to_fallback();
                }
            }
            data.loading.set(false);
        });
    }

    fn reset_to_fallback(&self) {
        self.assets.set(AssetCatalog::fallback());
        self.currencies.set(QuoteCurrencySet::fallback());
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::new()
    }
}

/// Issues both catalog requests in parallel; fails if either fails.
pub async fn fetch_reference_data<P: PriceProvider>(
    provider: &P,
) -> Result<(AssetCatalog, QuoteCurrencySet), ApiError> {
    let (assets, currencies) = tokio::join!(provider.coins_list(), provider.supported_vs_currencies());
    Ok((assets?, currencies?))
}
