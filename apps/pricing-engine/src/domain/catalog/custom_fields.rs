//! Product custom fields.

use serde::{Deserialize, Serialize};

/// Custom field controlling whether a product's price is shown.
pub const SHOW_PRICE_FIELD: &str = "show_price";

/// A `{name, value}` custom field on a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    /// Field name.
    pub name: String,
    /// Field value.
    #[serde(default)]
    pub value: String,
}

impl CustomField {
    /// Create a field.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// True when the first `show_price` field says `yes`.
#[must_use]
pub fn show_price_enabled(fields: &[CustomField]) -> bool {
    fields
        .iter()
        .find(|field| normalize(&field.name) == SHOW_PRICE_FIELD)
        .is_some_and(|field| normalize(&field.value) == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("show_price", "yes", true ; "exact")]
    #[test_case(" Show_Price ", " YES ", true ; "padded and cased")]
    #[test_case("show_price", "no", false ; "disabled")]
    #[test_case("show_price", "", false ; "empty value")]
    #[test_case("show price", "yes", false ; "different name")]
    fn single_field(name: &str, value: &str, expected: bool) {
        assert_eq!(show_price_enabled(&[CustomField::new(name, value)]), expected);
    }

    #[test]
    fn missing_field_is_disabled() {
        assert!(!show_price_enabled(&[]));
    }

    #[test]
    fn first_matching_field_decides() {
        let fields = [
            CustomField::new("show_price", "no"),
            CustomField::new("SHOW_PRICE", "yes"),
        ];
        assert!(!show_price_enabled(&fields));
    }
}
