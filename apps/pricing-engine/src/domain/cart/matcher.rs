//! Cart line matching.
//!
//! Each logical item walks an ordered strategy chain and takes the first
//! unconsumed cart line the first successful strategy finds. A cart line is
//! consumed by at most one logical item.

use serde::Serialize;
use std::fmt;

use super::{CartLine, LogicalItem};

/// One step of the matching chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Same product and same variant.
    ProductAndVariant,
    /// The cart holds exactly one line.
    SingleLineCart,
    /// Same SKU.
    Sku,
    /// Same product, any variant.
    ProductOnly,
}

impl MatchStrategy {
    /// Strategies in the order they are tried.
    pub const CHAIN: [Self; 4] = [
        Self::ProductAndVariant,
        Self::SingleLineCart,
        Self::Sku,
        Self::ProductOnly,
    ];

    fn find(self, item: &LogicalItem, lines: &[CartLine], consumed: &[bool]) -> Option<usize> {
        let mut available = lines
            .iter()
            .enumerate()
            .filter(|(index, _)| !consumed[*index]);

        match self {
            Self::ProductAndVariant => available
                .find(|(_, line)| {
                    line.product_id == item.product_id && line.variant_id == item.variant_id
                })
                .map(|(index, _)| index),
            Self::SingleLineCart => {
                if lines.len() == 1 && !consumed[0] {
                    Some(0)
                } else {
                    None
                }
            }
            Self::Sku => {
                let sku = item.sku()?;
                available
                    .find(|(_, line)| line.sku() == Some(sku))
                    .map(|(index, _)| index)
            }
            Self::ProductOnly => {
                if item.product_id.is_unassigned() {
                    return None;
                }
                available
                    .find(|(_, line)| line.product_id == item.product_id)
                    .map(|(index, _)| index)
            }
        }
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ProductAndVariant => "product_and_variant",
            Self::SingleLineCart => "single_line_cart",
            Self::Sku => "sku",
            Self::ProductOnly => "product_only",
        };
        f.write_str(name)
    }
}

/// A logical item paired with the cart line it matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedPair {
    /// Logical item.
    pub item: LogicalItem,
    /// Matched cart line.
    pub line: CartLine,
    /// Strategy that produced the match.
    pub strategy: MatchStrategy,
}

/// Result of matching a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Items that found a cart line, in input order.
    pub matched: Vec<MatchedPair>,
    /// Items that exhausted every strategy, in input order.
    pub unmatched: Vec<LogicalItem>,
}

/// Match logical items to persisted cart lines.
#[must_use]
pub fn match_cart_lines(items: &[LogicalItem], lines: &[CartLine]) -> MatchOutcome {
    let mut consumed = vec![false; lines.len()];
    let mut outcome = MatchOutcome::default();

    for item in items {
        let found = MatchStrategy::CHAIN
            .iter()
            .find_map(|strategy| strategy.find(item, lines, &consumed).map(|i| (i, *strategy)));

        match found {
            Some((index, strategy)) => {
                consumed[index] = true;
                outcome.matched.push(MatchedPair {
                    item: item.clone(),
                    line: lines[index].clone(),
                    strategy,
                });
            }
            None => outcome.unmatched.push(item.clone()),
        }
    }

    outcome
}
