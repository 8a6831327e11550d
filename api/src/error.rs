//! Errors produced while talking to a price provider.

/// Any failure of a provider call: transport, status, payload or lookup.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider answered with status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no {currency} price for {asset}")]
    MissingPrice { asset: String, currency: String },
}
