//! This crate contains the data model and the price provider client shared
//! by the converter UI.

pub mod asset;
pub mod config;
pub mod error;
pub mod price_map;
pub mod price_providers;
pub mod quote_currency;
pub mod reference_currency;
pub mod snapshot;

pub use error::ApiError;
