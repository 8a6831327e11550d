//! The user-facing error banner shared by the price poller and the
//! conversion pipeline.

use crate::reactive::Store;

pub const CONVERSION_ERROR_MESSAGE: &str =
    "Error occurred during conversion. Please try again later.";
pub const PRICE_POLL_ERROR_MESSAGE: &str =
    "Error occurred while fetching prices. Please try again later.";

/// Which activity raised a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumIs)]
pub enum ErrorSource {
    PricePoll,
    Conversion,
}

/// A generic error message, tagged with the activity that raised it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorNotice {
    pub source: ErrorSource,
    pub message: &'static str,
}

impl ErrorNotice {
    pub fn conversion() -> Self {
        Self {
            source: ErrorSource::Conversion,
            message: CONVERSION_ERROR_MESSAGE,
        }
    }

    pub fn price_poll() -> Self {
        Self {
            source: ErrorSource::PricePoll,
            message: PRICE_POLL_ERROR_MESSAGE,
        }
    }
}

/// The single banner slot. Writers overwrite each other; the last write wins.
pub type ErrorSlot = Store<Option<ErrorNotice>>;
