//! Resolution output.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::{CurrencyCode, Money};

/// Where a resolved price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    /// The ERP pricing source.
    Remote,
    /// Catalog price fallback.
    Fallback,
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// The authoritative price for one line item under one pricing context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPrice {
    /// Unit price, never negative.
    pub unit_price: Money,
    /// Currency of the unit price.
    pub currency: CurrencyCode,
    /// Origin of the price.
    pub source: PriceSource,
    /// Whether the price may be used as-is.
    pub valid: bool,
    /// Error reported by the ERP when it refused to price the item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_error: Option<String>,
}

impl ResolvedPrice {
    /// A valid ERP price.
    #[must_use]
    pub fn remote(unit_price: Money, currency: CurrencyCode) -> Self {
        Self {
            unit_price: unit_price.non_negative(),
            currency,
            source: PriceSource::Remote,
            valid: true,
            remote_error: None,
        }
    }

    /// A catalog fallback price.
    #[must_use]
    pub fn fallback(unit_price: Money, currency: CurrencyCode) -> Self {
        Self {
            unit_price: unit_price.non_negative(),
            currency,
            source: PriceSource::Fallback,
            valid: true,
            remote_error: None,
        }
    }

    /// Attach the ERP's diagnostic message.
    #[must_use]
    pub fn with_remote_error(mut self, error: Option<String>) -> Self {
        self.remote_error = error;
        self
    }

    /// True when this is a usable ERP price.
    #[must_use]
    pub fn is_valid_remote(&self) -> bool {
        self.valid && self.source == PriceSource::Remote
    }
}
