//! Strongly-typed identifiers for domain entities.
//!
//! These prevent mixing up IDs from different contexts: a storefront order
//! number and an ERP order number are both strings, but never interchangeable.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Storefront and ERP payloads carry ids as JSON strings or integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

fn string_or_integer<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Signed(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
    })
}

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(#[serde(deserialize_with = "string_or_integer")] String);

        impl $name {
            /// Create a new identifier from a string.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Get the inner string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }

            /// True when the identifier is empty or whitespace only.
            #[must_use]
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

define_id!(ProductId, "Storefront catalog product identifier.");
define_id!(VariantId, "Storefront catalog variant identifier.");
define_id!(CartId, "Identifier of a persisted storefront cart.");
define_id!(LineId, "Identifier of a persisted cart line item.");
define_id!(CustomerId, "ERP customer identifier (the company's `CustID`).");
define_id!(GroupCode, "ERP pricing group code of a company.");
define_id!(UserId, "Internal storefront user identifier.");
define_id!(LocalOrderId, "Order number issued by the storefront.");
define_id!(
    ExternalOrderId,
    "Order number issued by the ERP for the same order."
);

impl ProductId {
    /// True when the id is not a usable catalog product number.
    ///
    /// The storefront uses product id `0` for line items that have not been
    /// linked to a catalog product yet; blank and non-numeric ids are treated
    /// the same way.
    #[must_use]
    pub fn is_unassigned(&self) -> bool {
        self.0
            .trim()
            .parse::<f64>()
            .map_or(true, |n| !n.is_normal())
    }
}
