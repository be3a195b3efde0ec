//! ISO currency code.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency used when neither the ERP nor the catalog names one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// A non-empty, upper-cased ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parse a code, returning `None` for blank input.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_ascii_uppercase()))
    }

    /// Parse a code, falling back to `default` when absent or blank.
    #[must_use]
    pub fn parse_or(code: Option<&str>, default: &Self) -> Self {
        code.and_then(Self::parse).unwrap_or_else(|| default.clone())
    }

    /// Get the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self(DEFAULT_CURRENCY.to_string())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
