//! Line item quantity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// A positive whole number of units.
///
/// Zero and negative quantities are caller errors and never reach the
/// pricing source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct ItemQuantity(u32);

impl ItemQuantity {
    /// One unit.
    pub const ONE: Self = Self(1);

    /// Create a quantity, rejecting zero.
    pub fn new(value: u32) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::invalid("quantity", "must be at least 1"));
        }
        Ok(Self(value))
    }

    /// Get the raw value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for ItemQuantity {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let value = u32::try_from(value)
            .map_err(|_| DomainError::invalid("quantity", format!("out of range: {value}")))?;
        Self::new(value)
    }
}

impl From<ItemQuantity> for u32 {
    fn from(value: ItemQuantity) -> Self {
        value.0
    }
}

impl fmt::Display for ItemQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
