//! ERP webhook request and response types.
//!
//! Responses are loosely typed on the wire; everything here normalizes them
//! into tagged results so the application layer never re-checks optionality.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ports::PriceSyncBatch;
use crate::domain::pricing::RemotePricingResult;
use crate::domain::shared::{
    CartId, CurrencyCode, ExternalOrderId, ItemQuantity, LineId, Money, ProductId, VariantId,
};

// ============================================================================
// Pricing
// ============================================================================

/// Pricing webhook response: one object, or an array holding one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum PricingEnvelope {
    Many(Vec<PricingResponse>),
    One(PricingResponse),
}

#[derive(Debug, Clone, Deserialize)]
struct PricingResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    pricing: Option<ErpPricing>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErpPricing {
    #[serde(default)]
    net_price: Option<Value>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    valid: Option<bool>,
    #[serde(default)]
    error: Option<String>,
}

/// Normalize a pricing webhook payload.
#[must_use]
pub fn normalize_pricing_response(payload: Value) -> RemotePricingResult {
    let envelope = match serde_json::from_value::<PricingEnvelope>(payload) {
        Ok(envelope) => envelope,
        Err(e) => {
            return RemotePricingResult::Malformed {
                reason: e.to_string(),
            };
        }
    };

    let response = match envelope {
        PricingEnvelope::One(response) => response,
        PricingEnvelope::Many(responses) => match responses.into_iter().next() {
            Some(response) => response,
            None => {
                return RemotePricingResult::Malformed {
                    reason: "empty response array".to_string(),
                };
            }
        },
    };

    if response.success == Some(false) {
        return RemotePricingResult::Invalid {
            error: response
                .error
                .or_else(|| response.pricing.and_then(|p| p.error)),
        };
    }

    let Some(pricing) = response.pricing else {
        return RemotePricingResult::Invalid {
            error: response.error,
        };
    };

    if pricing.valid != Some(true) {
        return RemotePricingResult::Invalid {
            error: pricing.error,
        };
    }

    let net_price = match pricing.net_price {
        None | Some(Value::Null) => {
            return RemotePricingResult::Invalid {
                error: pricing.error,
            };
        }
        Some(Value::Number(n)) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string())),
        Some(Value::String(s)) => Decimal::from_str(s.trim()),
        Some(other) => {
            return RemotePricingResult::Malformed {
                reason: format!("netPrice is not numeric: {other}"),
            };
        }
    };

    match net_price {
        Ok(amount) if amount.is_sign_negative() && !amount.is_zero() => {
            RemotePricingResult::Invalid {
                error: Some(format!("negative net price {amount}")),
            }
        }
        Ok(amount) => RemotePricingResult::Valid {
            net_price: Money::new(amount),
            currency: pricing.currency.as_deref().and_then(CurrencyCode::parse),
        },
        Err(e) => RemotePricingResult::Malformed {
            reason: format!("netPrice is not numeric: {e}"),
        },
    }
}

// ============================================================================
// Order lookup
// ============================================================================

const ORDER_NUMBER_FIELD: &str = "EpicorErpOrderNumber";
const METAFIELD_NAMESPACE: &str = "Sales Department";
const METAFIELD_KEY: &str = "order_integration_info";

/// Extract the ERP order number from an order lookup payload.
///
/// Shapes, in order: `success: false` yields nothing; an order number at
/// the top level; a metafield array whose integration entry embeds the
/// order number in its JSON `value`.
#[must_use]
pub fn extract_external_order_id(payload: &Value) -> Option<ExternalOrderId> {
    if payload.get("success").and_then(Value::as_bool) == Some(false) {
        return None;
    }

    if let Some(id) = payload.get(ORDER_NUMBER_FIELD).and_then(scalar_to_id) {
        return Some(id);
    }

    payload
        .get("data")
        .and_then(Value::as_array)?
        .iter()
        .find(|entry| {
            entry.get("namespace").and_then(Value::as_str) == Some(METAFIELD_NAMESPACE)
                && entry.get("key").and_then(Value::as_str) == Some(METAFIELD_KEY)
        })
        .and_then(|entry| entry.get("value"))
        .and_then(|value| match value {
            Value::String(raw) => serde_json::from_str::<Value>(raw).ok(),
            other => Some(other.clone()),
        })
        .and_then(|info| info.get(ORDER_NUMBER_FIELD).and_then(scalar_to_id))
}

fn scalar_to_id(value: &Value) -> Option<ExternalOrderId> {
    let raw = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!raw.is_empty()).then(|| ExternalOrderId::new(raw))
}

// ============================================================================
// Cart price sync
// ============================================================================

/// Action name the sync endpoint dispatches on.
pub const UPDATE_CART_PRICES_ACTION: &str = "update_cart_prices";

/// Cart price-synchronization request body.
#[derive(Debug, Clone, Serialize)]
pub struct CartPriceUpdateRequest<'a> {
    /// Always [`UPDATE_CART_PRICES_ACTION`].
    pub action: &'static str,
    /// Cart.
    pub cart_id: &'a CartId,
    /// One entry per matched line.
    pub cart_items: Vec<CartPriceItem<'a>>,
    /// Storefront store hash.
    pub store_hash: &'a str,
    /// Storefront API token.
    pub auth_token: &'a str,
    /// Number of entries in `cart_items`.
    pub total_items: usize,
}

/// One line of a price-synchronization request.
#[derive(Debug, Clone, Serialize)]
pub struct CartPriceItem<'a> {
    /// Cart line id.
    pub item_id: &'a LineId,
    /// Product.
    pub product_id: &'a ProductId,
    /// Variant.
    pub variant_id: Option<&'a VariantId>,
    /// SKU.
    pub sku: &'a str,
    /// Display name.
    pub name: &'a str,
    /// Units.
    pub quantity: ItemQuantity,
    /// Price to apply.
    #[serde(with = "rust_decimal::serde::float")]
    pub epicor_price: Decimal,
    /// Price before reconciliation.
    #[serde(with = "rust_decimal::serde::float")]
    pub original_price: Decimal,
}

impl<'a> CartPriceUpdateRequest<'a> {
    /// Build the request body for `batch`.
    #[must_use]
    pub fn new(batch: &'a PriceSyncBatch, store_hash: &'a str, auth_token: &'a str) -> Self {
        let cart_items: Vec<CartPriceItem<'a>> = batch
            .records
            .iter()
            .map(|record| CartPriceItem {
                item_id: &record.line_id,
                product_id: &record.product_id,
                variant_id: record.variant_id.as_ref(),
                sku: &record.sku,
                name: &record.name,
                quantity: record.quantity,
                epicor_price: record.resolved_price.amount(),
                original_price: record.original_price.amount(),
            })
            .collect();

        Self {
            action: UPDATE_CART_PRICES_ACTION,
            cart_id: &batch.cart_id,
            total_items: cart_items.len(),
            cart_items,
            store_hash,
            auth_token,
        }
    }
}
