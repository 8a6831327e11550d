//! Errors returned to callers of the converter's input operations.

/// A rejected user input. State is left untouched when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConverterError {
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("unknown asset: {0}")]
    UnknownAsset(String),

    #[error("unknown quote currency: {0}")]
    UnknownCurrency(String),
}
