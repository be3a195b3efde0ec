//! Documents Bounded Context
//!
//! Decides whether a rendered invoice needs its order identifier replaced and
//! where that identifier sits on the page.

mod region;
mod rewrite;

pub use region::{IdentifierRegion, Rect};
pub use rewrite::{PassthroughReason, RewriteDecision};
