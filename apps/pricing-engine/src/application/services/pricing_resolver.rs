//! Pricing Resolver
//!
//! Resolves one line item to exactly one price. Consults the cache, then the
//! ERP, and degrades to the catalog price on any remote problem. Never
//! returns an error.

use std::sync::Arc;

use crate::application::ports::{PricingRequest, PricingSourcePort};
use crate::domain::pricing::{
    CatalogPriceFallback, LineItem, PriceFingerprint, PricingContext, RemotePricingResult,
    ResolvedPrice,
};
use crate::domain::shared::CurrencyCode;
use crate::observability::{record_cache_lookup, record_price_resolution};

use super::PriceCache;

/// Resolves unit prices against the ERP with catalog fallback.
#[derive(Debug)]
pub struct PricingResolver<S>
where
    S: PricingSourcePort,
{
    source: Arc<S>,
    cache: Arc<PriceCache>,
    fallback: CatalogPriceFallback,
}

impl<S> PricingResolver<S>
where
    S: PricingSourcePort,
{
    /// Create a resolver.
    #[must_use]
    pub const fn new(source: Arc<S>, cache: Arc<PriceCache>, fallback: CatalogPriceFallback) -> Self {
        Self {
            source,
            cache,
            fallback,
        }
    }

    /// Shared price cache.
    #[must_use]
    pub fn cache(&self) -> &Arc<PriceCache> {
        &self.cache
    }

    /// Catalog price for `item`, bypassing the ERP.
    #[must_use]
    pub fn fallback_for(&self, item: &LineItem) -> ResolvedPrice {
        self.fallback.resolve(item)
    }

    /// Currency used when the ERP reports none.
    #[must_use]
    pub const fn default_currency(&self) -> &CurrencyCode {
        self.fallback.currency()
    }

    /// Resolve the unit price of `item` under `context`.
    #[tracing::instrument(
        skip(self, context, item),
        fields(product_id = %item.product_id, sku = %item.sku, quantity = %item.quantity)
    )]
    pub async fn resolve(&self, context: &PricingContext, item: &LineItem) -> ResolvedPrice {
        if !context.is_privileged {
            record_price_resolution("fallback", "not_privileged");
            return self.fallback.resolve(item);
        }

        let cache_key = context
            .is_cacheable()
            .then(|| PriceFingerprint::of(context, item));

        if let Some(key) = &cache_key {
            if let Some(hit) = self.cache.get(key) {
                record_cache_lookup(true);
                tracing::debug!(key = %key, "Price cache hit");
                return hit;
            }
            record_cache_lookup(false);
        }

        let request = PricingRequest::new(context, item);
        match self.source.fetch_price(&request).await {
            Ok(RemotePricingResult::Valid { net_price, .. })
                if net_price.checked_times(item.quantity).is_none() =>
            {
                tracing::warn!(%net_price, "ERP price overflows the line total, using catalog price");
                record_price_resolution("fallback", "malformed");
                self.fallback.resolve(item)
            }
            Ok(RemotePricingResult::Valid { net_price, currency }) => {
                let currency = currency.unwrap_or_else(|| self.fallback.currency().clone());
                let price = ResolvedPrice::remote(net_price, currency);
                if let Some(key) = cache_key {
                    self.cache.put(key, price.clone());
                }
                record_price_resolution("remote", "valid");
                price
            }
            Ok(RemotePricingResult::Invalid { error }) => {
                tracing::warn!(
                    error = error.as_deref().unwrap_or("none"),
                    "ERP refused to price item, using catalog price"
                );
                record_price_resolution("fallback", "invalid");
                self.fallback.resolve(item).with_remote_error(error)
            }
            Ok(RemotePricingResult::Malformed { reason }) => {
                tracing::warn!(%reason, "Malformed ERP pricing payload, using catalog price");
                record_price_resolution("fallback", "malformed");
                self.fallback.resolve(item)
            }
            Err(e) => {
                tracing::warn!(error = %e, "ERP pricing call failed, using catalog price");
                record_price_resolution("fallback", "unavailable");
                self.fallback.resolve(item)
            }
        }
    }
}
