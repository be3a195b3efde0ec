//! Line items submitted for pricing.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{ItemQuantity, Money, ProductId, VariantId};

/// Catalog price of one variant, as exposed by the storefront product search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantPrice {
    /// Variant this price belongs to.
    pub variant_id: VariantId,
    /// Price including tax.
    #[serde(default)]
    pub price_inc_tax: Option<Money>,
    /// Price excluding tax.
    #[serde(default)]
    pub price_ex_tax: Option<Money>,
}

/// A unit of product to be priced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog product.
    pub product_id: ProductId,
    /// Selected variant, if the product has variants.
    #[serde(default)]
    pub variant_id: Option<VariantId>,
    /// Variant or product SKU.
    #[serde(default)]
    pub sku: String,
    /// Units requested.
    pub quantity: ItemQuantity,
    /// Flat catalog price.
    #[serde(default)]
    pub catalog_base_price: Money,
    /// Tax amount on top of the base price.
    #[serde(default)]
    pub catalog_tax_price: Option<Money>,
    /// Variant-level price list, preferred over the flat base price.
    #[serde(default)]
    pub variant_prices: Vec<VariantPrice>,
}

impl LineItem {
    /// Create a line item with a flat catalog price.
    #[must_use]
    pub fn new(
        product_id: impl Into<ProductId>,
        sku: impl Into<String>,
        quantity: ItemQuantity,
        catalog_base_price: Money,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            variant_id: None,
            sku: sku.into(),
            quantity,
            catalog_base_price,
            catalog_tax_price: None,
            variant_prices: Vec::new(),
        }
    }

    /// Set the catalog tax amount.
    #[must_use]
    pub const fn with_tax(mut self, tax: Money) -> Self {
        self.catalog_tax_price = Some(tax);
        self
    }

    /// Set the selected variant and its price list.
    #[must_use]
    pub fn with_variant(mut self, variant_id: impl Into<VariantId>, prices: Vec<VariantPrice>) -> Self {
        self.variant_id = Some(variant_id.into());
        self.variant_prices = prices;
        self
    }

    /// Catalog price entry for the selected variant, if any.
    #[must_use]
    pub fn selected_variant_price(&self) -> Option<&VariantPrice> {
        let variant_id = self.variant_id.as_ref()?;
        self.variant_prices
            .iter()
            .find(|price| &price.variant_id == variant_id)
    }
}
