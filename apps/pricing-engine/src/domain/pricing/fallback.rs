//! Catalog price fallback.
//!
//! Deterministic, synchronous and free of I/O. Used whenever the ERP is not
//! consulted, fails, or refuses to price an item.
//!
//! Precedence:
//!
//! 1. The selected variant's catalog price (tax-inclusive or exclusive per the
//!    store's display setting). A zero or missing variant price falls through
//!    to the flat base price without tax.
//! 2. The flat base price, plus the tax amount when the store displays
//!    tax-inclusive prices.

use serde::{Deserialize, Serialize};

use super::{LineItem, ResolvedPrice};
use crate::domain::shared::{CurrencyCode, Money};

/// Whether the storefront displays prices with tax included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxDisplay {
    /// Prices include tax.
    Inclusive,
    /// Prices exclude tax.
    #[default]
    Exclusive,
}

/// Computes catalog prices for line items.
#[derive(Debug, Clone, Default)]
pub struct CatalogPriceFallback {
    tax_display: TaxDisplay,
    currency: CurrencyCode,
}

impl CatalogPriceFallback {
    /// Create a fallback calculator.
    #[must_use]
    pub const fn new(tax_display: TaxDisplay, currency: CurrencyCode) -> Self {
        Self {
            tax_display,
            currency,
        }
    }

    /// Store default currency.
    #[must_use]
    pub const fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Catalog unit price for `item`, never negative.
    #[must_use]
    pub fn unit_price(&self, item: &LineItem) -> Money {
        if item.variant_id.is_some() && !item.variant_prices.is_empty() {
            let variant_price = item.selected_variant_price().and_then(|price| match self.tax_display {
                TaxDisplay::Inclusive => price.price_inc_tax,
                TaxDisplay::Exclusive => price.price_ex_tax,
            });
            return match variant_price {
                Some(price) if !price.is_zero() => price.non_negative(),
                _ => item.catalog_base_price.non_negative(),
            };
        }

        let base = item.catalog_base_price;
        let price = match (self.tax_display, item.catalog_tax_price) {
            (TaxDisplay::Inclusive, Some(tax)) => base.checked_add(tax).unwrap_or(base),
            _ => base,
        };
        price.non_negative()
    }

    /// Catalog price for `item` tagged as a fallback.
    #[must_use]
    pub fn resolve(&self, item: &LineItem) -> ResolvedPrice {
        ResolvedPrice::fallback(self.unit_price(item), self.currency.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::{PriceSource, VariantPrice};
    use crate::domain::shared::ItemQuantity;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn item(base: Decimal) -> LineItem {
        LineItem::new("42", "A1", ItemQuantity::ONE, Money::new(base))
    }

    fn variant(id: &str, inc: Option<Decimal>, ex: Option<Decimal>) -> VariantPrice {
        VariantPrice {
            variant_id: id.into(),
            price_inc_tax: inc.map(Money::new),
            price_ex_tax: ex.map(Money::new),
        }
    }

    #[test]
    fn exclusive_display_ignores_tax() {
        let fallback = CatalogPriceFallback::new(TaxDisplay::Exclusive, CurrencyCode::default());
        let item = item(dec!(10)).with_tax(Money::new(dec!(0.80)));
        assert_eq!(fallback.unit_price(&item), Money::new(dec!(10)));
    }

    #[test]
    fn inclusive_display_adds_tax() {
        let fallback = CatalogPriceFallback::new(TaxDisplay::Inclusive, CurrencyCode::default());
        let item = item(dec!(10)).with_tax(Money::new(dec!(0.80)));
        assert_eq!(fallback.unit_price(&item), Money::new(dec!(10.80)));
    }

    #[test]
    fn variant_price_takes_precedence() {
        let fallback = CatalogPriceFallback::new(TaxDisplay::Inclusive, CurrencyCode::default());
        let item = item(dec!(10)).with_variant(
            "7",
            vec![
                variant("6", Some(dec!(99)), Some(dec!(90))),
                variant("7", Some(dec!(12.50)), Some(dec!(11))),
            ],
        );
        assert_eq!(fallback.unit_price(&item), Money::new(dec!(12.50)));

        let fallback = CatalogPriceFallback::new(TaxDisplay::Exclusive, CurrencyCode::default());
        assert_eq!(fallback.unit_price(&item), Money::new(dec!(11)));
    }

    #[test]
    fn zero_variant_price_falls_back_to_base_without_tax() {
        let fallback = CatalogPriceFallback::new(TaxDisplay::Inclusive, CurrencyCode::default());
        let item = item(dec!(10))
            .with_tax(Money::new(dec!(1)))
            .with_variant("7", vec![variant("7", Some(Decimal::ZERO), None)]);
        assert_eq!(fallback.unit_price(&item), Money::new(dec!(10)));
    }

    #[test]
    fn unknown_variant_falls_back_to_base() {
        let fallback = CatalogPriceFallback::default();
        let item = item(dec!(10)).with_variant("8", vec![variant("7", None, Some(dec!(11)))]);
        assert_eq!(fallback.unit_price(&item), Money::new(dec!(10)));
    }

    #[test]
    fn overflowing_tax_keeps_base_price() {
        let fallback = CatalogPriceFallback::new(TaxDisplay::Inclusive, CurrencyCode::default());
        let item = item(Decimal::MAX).with_tax(Money::new(dec!(1)));
        assert_eq!(fallback.unit_price(&item), Money::new(Decimal::MAX));
    }

    #[test]
    fn resolve_tags_fallback_with_store_currency() {
        let fallback = CatalogPriceFallback::new(TaxDisplay::Exclusive, CurrencyCode::parse("CAD").unwrap());
        let price = fallback.resolve(&item(dec!(5)));
        assert_eq!(price.source, PriceSource::Fallback);
        assert_eq!(price.currency.as_str(), "CAD");
        assert!(price.valid);
    }

    proptest! {
        #[test]
        fn never_negative(base in -10_000i64..10_000, tax in -1_000i64..1_000, inclusive in any::<bool>()) {
            let display = if inclusive { TaxDisplay::Inclusive } else { TaxDisplay::Exclusive };
            let fallback = CatalogPriceFallback::new(display, CurrencyCode::default());
            let item = item(Decimal::new(base, 2)).with_tax(Money::new(Decimal::new(tax, 2)));
            prop_assert!(!fallback.unit_price(&item).is_negative());
        }
    }
}
