//! Identifier rewrite decision.

use std::fmt;

use crate::domain::shared::{ExternalOrderId, LocalOrderId};

/// Why a document is returned untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassthroughReason {
    /// No external identifier exists for the order.
    NoExternalId,
    /// No local identifier to anchor the replacement to.
    NoLocalId,
    /// Both identifiers are the same.
    SameId,
}

impl fmt::Display for PassthroughReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::NoExternalId => "no_external_id",
            Self::NoLocalId => "no_local_id",
            Self::SameId => "same_id",
        };
        f.write_str(reason)
    }
}

/// What to do with a rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteDecision<'a> {
    /// Return the document unchanged.
    Passthrough(PassthroughReason),
    /// Replace `local` with `external`.
    Rewrite {
        /// Identifier currently printed.
        local: &'a LocalOrderId,
        /// Identifier to print instead.
        external: &'a ExternalOrderId,
    },
}

impl<'a> RewriteDecision<'a> {
    /// Evaluate the no-op cases in order; otherwise rewrite.
    #[must_use]
    pub fn decide(local: Option<&'a LocalOrderId>, external: Option<&'a ExternalOrderId>) -> Self {
        let Some(external) = external.filter(|id| !id.is_blank()) else {
            return Self::Passthrough(PassthroughReason::NoExternalId);
        };
        let Some(local) = local.filter(|id| !id.is_blank()) else {
            return Self::Passthrough(PassthroughReason::NoLocalId);
        };
        if external.as_str() == local.as_str() {
            return Self::Passthrough(PassthroughReason::SameId);
        }
        Self::Rewrite { local, external }
    }
}
