//! Render Invoice Document Use Case

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::{
    DocumentSourceError, DocumentSourcePort, IdentifierStamper, OrderLookupPort,
};
use crate::application::services::{
    DocumentIdentifierRewriter, OrderIdentifierResolver, RewriteStatus,
};
use crate::domain::shared::{ExternalOrderId, LocalOrderId};

/// An invoice ready to hand to the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedInvoice {
    /// Document bytes.
    pub document: Vec<u8>,
    /// ERP order number printed on it, if any.
    pub external_order_id: Option<ExternalOrderId>,
    /// What the rewriter did.
    pub status: RewriteStatus,
}

/// Use case for fetching an invoice and printing the ERP order number on it.
pub struct RenderInvoiceDocumentUseCase<D, L, S>
where
    D: DocumentSourcePort,
    L: OrderLookupPort,
    S: IdentifierStamper,
{
    source: Arc<D>,
    orders: Arc<OrderIdentifierResolver<L>>,
    rewriter: Arc<DocumentIdentifierRewriter<S>>,
}

impl<D, L, S> RenderInvoiceDocumentUseCase<D, L, S>
where
    D: DocumentSourcePort,
    L: OrderLookupPort,
    S: IdentifierStamper + 'static,
{
    /// Create a new `RenderInvoiceDocumentUseCase`.
    #[must_use]
    pub const fn new(
        source: Arc<D>,
        orders: Arc<OrderIdentifierResolver<L>>,
        rewriter: Arc<DocumentIdentifierRewriter<S>>,
    ) -> Self {
        Self {
            source,
            orders,
            rewriter,
        }
    }

    /// Fetch the invoice at `url` and rewrite its order identifier.
    ///
    /// # Errors
    ///
    /// Returns an error only when the document cannot be fetched.
    pub async fn execute(
        &self,
        url: &str,
        order_id: &LocalOrderId,
        known: &HashMap<LocalOrderId, ExternalOrderId>,
    ) -> Result<RenderedInvoice, DocumentSourceError> {
        let document = self.source.fetch(url).await?;
        let external_order_id = self.orders.resolve(order_id, known).await;

        let outcome = Arc::clone(&self.rewriter)
            .rewrite_blocking(document, Some(order_id.clone()), external_order_id.clone())
            .await;

        Ok(RenderedInvoice {
            document: outcome.document,
            external_order_id,
            status: outcome.status,
        })
    }
}
