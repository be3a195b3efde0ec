//! Cart lines, logical items and reconciliation records.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{ItemQuantity, LineId, Money, ProductId, VariantId};

/// A persisted cart line, owned by the cart subsystem.
///
/// The engine only reads it and requests updates to its unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Cart line id.
    pub line_id: LineId,
    /// Catalog product.
    pub product_id: ProductId,
    /// Catalog variant.
    #[serde(default)]
    pub variant_id: Option<VariantId>,
    /// Line SKU.
    #[serde(default)]
    pub sku: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Units in the cart.
    #[serde(default)]
    pub quantity: u32,
    /// Unit price the cart currently holds.
    #[serde(default)]
    pub current_unit_price: Money,
}

/// An item the shopper added, as known before the cart persisted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalItem {
    /// Catalog product.
    pub product_id: ProductId,
    /// Catalog variant.
    #[serde(default)]
    pub variant_id: Option<VariantId>,
    /// SKU as entered or selected.
    #[serde(default)]
    pub sku: Option<String>,
    /// Units added.
    pub quantity: ItemQuantity,
    /// Externally resolved unit price, when the caller has one.
    #[serde(default)]
    pub resolved_price: Option<Money>,
}

impl LogicalItem {
    /// SKU, ignoring blank values.
    #[must_use]
    pub fn sku(&self) -> Option<&str> {
        non_blank(self.sku.as_deref())
    }
}

impl CartLine {
    /// SKU, ignoring blank values.
    #[must_use]
    pub fn sku(&self) -> Option<&str> {
        non_blank(self.sku.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// A matched pair ready to submit to the price-synchronization endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationRecord {
    /// Cart line being repriced.
    pub line_id: LineId,
    /// Catalog product.
    pub product_id: ProductId,
    /// Variant, preferring the logical item's.
    pub variant_id: Option<VariantId>,
    /// SKU, preferring the cart line's.
    pub sku: String,
    /// Cart line display name.
    pub name: String,
    /// Units, from the logical item.
    pub quantity: ItemQuantity,
    /// Price to apply.
    pub resolved_price: Money,
    /// Price the cart held before reconciliation.
    pub original_price: Money,
}

impl ReconciliationRecord {
    /// Combine a logical item with the cart line it matched.
    #[must_use]
    pub fn from_match(item: &LogicalItem, line: &CartLine) -> Self {
        Self {
            line_id: line.line_id.clone(),
            product_id: item.product_id.clone(),
            variant_id: item.variant_id.clone().or_else(|| line.variant_id.clone()),
            sku: line
                .sku()
                .or_else(|| item.sku())
                .unwrap_or_default()
                .to_string(),
            name: line.name.clone(),
            quantity: item.quantity,
            resolved_price: item.resolved_price.unwrap_or(line.current_unit_price),
            original_price: line.current_unit_price,
        }
    }
}
