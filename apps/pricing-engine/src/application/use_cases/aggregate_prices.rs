//! Aggregate Prices Use Case
//!
//! Prices every item of a batch concurrently and combines the results.

use std::sync::Arc;

use futures::StreamExt;
use futures::stream::FuturesUnordered;

use crate::application::dto::{PriceAggregate, PricedItem};
use crate::application::ports::PricingSourcePort;
use crate::application::services::PricingResolver;
use crate::domain::pricing::{LineItem, PriceSource, PricingContext, ResolvedPrice};
use crate::domain::shared::Money;

/// Use case for pricing a batch of line items.
#[derive(Debug)]
pub struct AggregatePricesUseCase<S>
where
    S: PricingSourcePort + 'static,
{
    resolver: Arc<PricingResolver<S>>,
}

impl<S> AggregatePricesUseCase<S>
where
    S: PricingSourcePort + 'static,
{
    /// Create a new `AggregatePricesUseCase`.
    #[must_use]
    pub const fn new(resolver: Arc<PricingResolver<S>>) -> Self {
        Self { resolver }
    }

    /// Resolve every item and sum the line totals.
    ///
    /// Each item is resolved on its own task; completions are merged by
    /// request index so out-of-order completion cannot misassign prices.
    pub async fn execute(&self, context: &PricingContext, items: &[LineItem]) -> PriceAggregate {
        let mut pending: FuturesUnordered<_> = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let resolver = Arc::clone(&self.resolver);
                let context = context.clone();
                let item = item.clone();
                let handle = tokio::spawn(async move { resolver.resolve(&context, &item).await });
                async move { (index, handle.await) }
            })
            .collect();

        let mut prices: Vec<Option<ResolvedPrice>> = vec![None; items.len()];
        let mut currency = None;

        while let Some((index, joined)) = pending.next().await {
            let price = match joined {
                Ok(price) => price,
                Err(e) => {
                    tracing::error!(error = %e, index, "Pricing task failed, using catalog price");
                    self.resolver.fallback_for(&items[index])
                }
            };
            if price.is_valid_remote() {
                currency = Some(price.currency.clone());
            }
            prices[index] = Some(price);
        }

        let priced: Vec<PricedItem> = items
            .iter()
            .zip(prices)
            .enumerate()
            .map(|(index, (item, price))| {
                let price = price.unwrap_or_else(|| self.resolver.fallback_for(item));
                PricedItem {
                    index,
                    product_id: item.product_id.clone(),
                    sku: item.sku.clone(),
                    quantity: item.quantity,
                    line_total: price.unit_price.times(item.quantity),
                    price,
                }
            })
            .collect();

        let remote_count = priced
            .iter()
            .filter(|p| p.price.source == PriceSource::Remote)
            .count();
        let total: Money = priced.iter().map(|p| p.line_total).sum();

        tracing::info!(
            items = priced.len(),
            remote = remote_count,
            total = %total,
            "Batch priced"
        );

        PriceAggregate {
            total,
            currency: currency.unwrap_or_else(|| self.resolver.default_currency().clone()),
            fallback_count: priced.len() - remote_count,
            remote_count,
            items: priced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockPricingSourcePort, PricingSourceError};
    use crate::application::services::PriceCache;
    use crate::domain::pricing::{CatalogPriceFallback, RemotePricingResult, TaxDisplay};
    use crate::domain::shared::{CurrencyCode, ItemQuantity};
    use rust_decimal_macros::dec;

    fn use_case(source: MockPricingSourcePort) -> AggregatePricesUseCase<MockPricingSourcePort> {
        let resolver = PricingResolver::new(
            Arc::new(source),
            Arc::new(PriceCache::default()),
            CatalogPriceFallback::new(TaxDisplay::Exclusive, CurrencyCode::default()),
        );
        AggregatePricesUseCase::new(Arc::new(resolver))
    }

    fn item(product: &str, sku: &str, qty: u32, base: rust_decimal::Decimal) -> LineItem {
        LineItem::new(product, sku, ItemQuantity::new(qty).unwrap(), Money::new(base))
    }

    #[tokio::test]
    async fn partial_failure_mixes_remote_and_fallback() {
        let mut source = MockPricingSourcePort::new();
        source.expect_fetch_price().returning(|req| {
            if req.sku == "DOWN" {
                Err(PricingSourceError::Unavailable {
                    message: "timeout".to_string(),
                })
            } else {
                Ok(RemotePricingResult::Valid {
                    net_price: Money::new(dec!(8)),
                    currency: CurrencyCode::parse("CAD"),
                })
            }
        });

        let items = [
            item("1", "UP", 2, dec!(10)),
            item("2", "DOWN", 3, dec!(5)),
            item("3", "UP", 1, dec!(10)),
        ];
        let aggregate = use_case(source)
            .execute(&PricingContext::privileged("C1", "G1"), &items)
            .await;

        assert_eq!(aggregate.total, Money::new(dec!(16) + dec!(15) + dec!(8)));
        assert_eq!(aggregate.remote_count, 2);
        assert_eq!(aggregate.fallback_count, 1);
        assert_eq!(aggregate.currency.as_str(), "CAD");
        assert_eq!(aggregate.items[1].price.source, PriceSource::Fallback);
        assert_eq!(aggregate.items[1].line_total, Money::new(dec!(15)));
    }

    #[tokio::test]
    async fn non_privileged_batch_is_fully_degraded() {
        let mut source = MockPricingSourcePort::new();
        source.expect_fetch_price().never();

        let items = [item("1", "A", 2, dec!(10)), item("2", "B", 1, dec!(4.50))];
        let aggregate = use_case(source)
            .execute(&PricingContext::retail(), &items)
            .await;

        assert!(aggregate.is_fully_degraded());
        assert_eq!(aggregate.total, Money::new(dec!(24.50)));
        assert_eq!(aggregate.currency.as_str(), "USD");
    }

    #[tokio::test]
    async fn results_keep_request_order() {
        let mut source = MockPricingSourcePort::new();
        source.expect_fetch_price().returning(|req| {
            let net = if req.product_id.as_str() == "1" { dec!(1) } else { dec!(2) };
            Ok(RemotePricingResult::Valid {
                net_price: Money::new(net),
                currency: None,
            })
        });

        let items = [item("1", "A", 1, dec!(0)), item("2", "B", 1, dec!(0))];
        let aggregate = use_case(source)
            .execute(&PricingContext::privileged("C1", "G1"), &items)
            .await;

        assert_eq!(aggregate.items[0].product_id.as_str(), "1");
        assert_eq!(aggregate.items[0].price.unit_price, Money::new(dec!(1)));
        assert_eq!(aggregate.items[1].price.unit_price, Money::new(dec!(2)));
    }

    #[tokio::test]
    async fn huge_catalog_prices_saturate_without_aborting_batch() {
        let mut source = MockPricingSourcePort::new();
        source.expect_fetch_price().never();

        let huge = rust_decimal::Decimal::from_scientific("1e23").unwrap();
        let items = [
            item("1", "A", 1_000_000_000, huge),
            item("2", "B", 1_000_000_000, huge),
            item("3", "C", 2, dec!(10)),
        ];
        let aggregate = use_case(source)
            .execute(&PricingContext::retail(), &items)
            .await;

        assert_eq!(aggregate.items.len(), 3);
        assert_eq!(aggregate.items[2].line_total, Money::new(dec!(20)));
        assert_eq!(aggregate.total, Money::new(rust_decimal::Decimal::MAX));
    }

    #[tokio::test]
    async fn empty_batch_totals_zero() {
        let source = MockPricingSourcePort::new();
        let aggregate = use_case(source)
            .execute(&PricingContext::retail(), &[])
            .await;
        assert_eq!(aggregate.total, Money::ZERO);
        assert!(aggregate.items.is_empty());
    }
}
