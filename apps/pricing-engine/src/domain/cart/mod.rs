//! Cart Bounded Context
//!
//! Matching logical items to persisted cart lines and the settling policy
//! that follows a price synchronization.

mod entities;
mod matcher;
mod settling;

pub use entities::{CartLine, LogicalItem, ReconciliationRecord};
pub use matcher::{MatchOutcome, MatchStrategy, MatchedPair, match_cart_lines};
pub use settling::{FixedPerItemDelay, SettlingPolicy};
