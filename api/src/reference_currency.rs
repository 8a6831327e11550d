//! Defines the fixed basket shown in the reference price table.

use serde::Deserialize;
use serde::Serialize;

/// A quote currency of the reference table, with its display rules.
#[derive(
    Debug,
    PartialEq,
    Eq,
    Hash,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Default,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
#[allow(clippy::upper_case_acronyms)]
pub enum ReferenceCurrency {
    #[default]
    USD, // United States Dollar
    EUR, // Euro
    GBP, // Great British Pound
}

impl ReferenceCurrency {
    /// Returns the graphical symbol for the currency (e.g., '$').
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Returns the ISO 4217 string code for the currency (e.g., "USD").
    /// This is handled automatically by the `strum::IntoStaticStr` derive macro.
    pub fn code(&self) -> &'static str {
        self.into()
    }

    /// The lowercase code the price provider expects in `vs_currencies`.
    pub fn api_code(&self) -> &'static str {
        match self {
            Self::USD => "usd",
            Self::EUR => "eur",
            Self::GBP => "gbp",
        }
    }

    /// Returns the full name of the currency.
    pub fn name(&self) -> &'static str {
        match self {
            Self::USD => "United States Dollar",
            Self::EUR => "Euro",
            Self::GBP => "Great British Pound",
        }
    }

    pub fn format_price(&self, price: f64) -> String {
        format!("{}{}", self.symbol(), price)
    }
}

/// An asset row of the reference table.
#[derive(
    Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize, strum::EnumIter, strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum ReferenceAsset {
    Bitcoin,
    Ethereum,
    Litecoin,
}

impl ReferenceAsset {
    /// The provider's asset id.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Bitcoin => "bitcoin",
            Self::Ethereum => "ethereum",
            Self::Litecoin => "litecoin",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bitcoin => "Bitcoin",
            Self::Ethereum => "Ethereum",
            Self::Litecoin => "Litecoin",
        }
    }
}
