//! Cart reconciliation DTOs

use serde::{Deserialize, Serialize};

use crate::domain::cart::{CartLine, LogicalItem, MatchStrategy, MatchedPair};
use crate::domain::shared::{CartId, LineId, ProductId};

/// Items the shopper added and the cart lines the cart persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileCartRequest {
    /// Logical items.
    pub items: Vec<LogicalItem>,
    /// Persisted cart lines.
    #[serde(default)]
    pub cart_lines: Vec<CartLine>,
}

/// A logical item and the line it matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedLineDto {
    /// Product of the logical item.
    pub product_id: ProductId,
    /// Matched cart line.
    pub line_id: LineId,
    /// Strategy that matched.
    pub strategy: MatchStrategy,
}

impl From<&MatchedPair> for MatchedLineDto {
    fn from(pair: &MatchedPair) -> Self {
        Self {
            product_id: pair.item.product_id.clone(),
            line_id: pair.line.line_id.clone(),
            strategy: pair.strategy,
        }
    }
}

/// Outcome of reconciling one cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationReport {
    /// Cart.
    pub cart_id: CartId,
    /// Matched lines.
    pub matched: Vec<MatchedLineDto>,
    /// Items that matched no cart line.
    pub unmatched: Vec<LogicalItem>,
    /// Whether a batch was accepted by the sync endpoint.
    pub synced: bool,
    /// Time waited for the cart to settle.
    pub settle_delay_ms: u64,
    /// Reconciliation failure, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReconciliationReport {
    /// Report for a cart where nothing was attempted.
    #[must_use]
    pub fn skipped(cart_id: CartId, unmatched: Vec<LogicalItem>) -> Self {
        Self {
            cart_id,
            matched: Vec::new(),
            unmatched,
            synced: false,
            settle_delay_ms: 0,
            error: None,
        }
    }
}
