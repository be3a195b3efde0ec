//! Normalized ERP pricing outcome.

use crate::domain::shared::{CurrencyCode, Money};

/// Outcome of one ERP pricing call after boundary validation.
///
/// Adapters produce this from whatever shape the ERP returned; internal code
/// never inspects the raw payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemotePricingResult {
    /// The ERP priced the item.
    Valid {
        /// Net unit price, never negative.
        net_price: Money,
        /// Currency named by the ERP, if any.
        currency: Option<CurrencyCode>,
    },
    /// The ERP answered but refused to price the item.
    Invalid {
        /// Diagnostic supplied by the ERP.
        error: Option<String>,
    },
    /// The payload could not be understood.
    Malformed {
        /// What was wrong with it.
        reason: String,
    },
}

impl RemotePricingResult {
    /// Short label for logs and metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Valid { .. } => "valid",
            Self::Invalid { .. } => "invalid",
            Self::Malformed { .. } => "malformed",
        }
    }
}
