//! Order Identifier Resolver
//!
//! Maps a storefront order number to the ERP order number. `None` is a
//! normal result meaning "print the storefront number".

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::OrderLookupPort;
use crate::domain::shared::{ExternalOrderId, LocalOrderId};

/// Resolves ERP order numbers, consulting caller-supplied mappings first.
#[derive(Debug)]
pub struct OrderIdentifierResolver<L>
where
    L: OrderLookupPort,
{
    lookup: Arc<L>,
}

impl<L> OrderIdentifierResolver<L>
where
    L: OrderLookupPort,
{
    /// Create a resolver.
    #[must_use]
    pub const fn new(lookup: Arc<L>) -> Self {
        Self { lookup }
    }

    /// ERP order number for `order_id`. Never fails.
    pub async fn resolve(
        &self,
        order_id: &LocalOrderId,
        known: &HashMap<LocalOrderId, ExternalOrderId>,
    ) -> Option<ExternalOrderId> {
        if order_id.is_blank() {
            return None;
        }

        if let Some(external) = known.get(order_id) {
            return Some(external.clone());
        }

        match self.lookup.external_order_id(order_id).await {
            Ok(external) => external.filter(|id| !id.is_blank()),
            Err(e) => {
                tracing::warn!(error = %e, %order_id, "ERP order lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockOrderLookupPort, OrderLookupError};

    #[tokio::test]
    async fn known_mapping_skips_remote() {
        let mut lookup = MockOrderLookupPort::new();
        lookup.expect_external_order_id().never();

        let mut known = HashMap::new();
        known.insert(LocalOrderId::new("123"), ExternalOrderId::new("491655"));

        let resolver = OrderIdentifierResolver::new(Arc::new(lookup));
        let external = resolver.resolve(&LocalOrderId::new("123"), &known).await;
        assert_eq!(external, Some(ExternalOrderId::new("491655")));
    }

    #[tokio::test]
    async fn remote_lookup_on_miss() {
        let mut lookup = MockOrderLookupPort::new();
        lookup
            .expect_external_order_id()
            .withf(|id| id.as_str() == "123")
            .times(1)
            .returning(|_| Ok(Some(ExternalOrderId::new("491655"))));

        let resolver = OrderIdentifierResolver::new(Arc::new(lookup));
        let external = resolver.resolve(&LocalOrderId::new("123"), &HashMap::new()).await;
        assert_eq!(external, Some(ExternalOrderId::new("491655")));
    }

    #[tokio::test]
    async fn failure_resolves_to_none() {
        let mut lookup = MockOrderLookupPort::new();
        lookup
            .expect_external_order_id()
            .returning(|_| Err(OrderLookupError::Rejected { status: 502 }));

        let resolver = OrderIdentifierResolver::new(Arc::new(lookup));
        assert!(resolver.resolve(&LocalOrderId::new("123"), &HashMap::new()).await.is_none());
    }

    #[tokio::test]
    async fn blank_order_id_skips_remote() {
        let mut lookup = MockOrderLookupPort::new();
        lookup.expect_external_order_id().never();

        let resolver = OrderIdentifierResolver::new(Arc::new(lookup));
        assert!(resolver.resolve(&LocalOrderId::new(" "), &HashMap::new()).await.is_none());
    }
}
