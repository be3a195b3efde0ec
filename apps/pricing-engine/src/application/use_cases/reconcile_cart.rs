//! Reconcile Cart Use Case
//!
//! After a cart mutation commits, pushes resolved prices for every matched
//! line in one batch and waits for the cart to settle. Reconciliation
//! failures are reported, never fatal: the cart mutation already succeeded.

use std::sync::Arc;
use std::time::Duration;

use crate::application::dto::{MatchedLineDto, ReconcileCartRequest, ReconciliationReport};
use crate::application::ports::{PriceSyncBatch, PriceSyncError, PriceSyncPort};
use crate::domain::cart::{MatchedPair, ReconciliationRecord, SettlingPolicy, match_cart_lines};
use crate::domain::shared::CartId;
use crate::observability::{record_reconciliation, record_settle_delay, record_unmatched_items};

/// Result of a successful reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// Lines included in the batch.
    pub synced_lines: usize,
    /// Time waited after the batch was accepted.
    pub settle_delay: Duration,
}

impl Settlement {
    const NOTHING: Self = Self {
        synced_lines: 0,
        settle_delay: Duration::ZERO,
    };
}

/// Use case for reconciling cart line prices.
#[derive(Debug)]
pub struct ReconcileCartUseCase<P>
where
    P: PriceSyncPort,
{
    sync: Arc<P>,
    policy: Arc<dyn SettlingPolicy>,
}

impl<P> ReconcileCartUseCase<P>
where
    P: PriceSyncPort,
{
    /// Create a new `ReconcileCartUseCase`.
    #[must_use]
    pub fn new(sync: Arc<P>, policy: Arc<dyn SettlingPolicy>) -> Self {
        Self { sync, policy }
    }

    /// Push one batch for `pairs` and wait for the cart to settle.
    ///
    /// An empty batch sends nothing and does not wait.
    ///
    /// # Errors
    ///
    /// Returns the sync endpoint's failure; no wait happens in that case.
    pub async fn reconcile(
        &self,
        cart_id: &CartId,
        pairs: &[MatchedPair],
    ) -> Result<Settlement, PriceSyncError> {
        if pairs.is_empty() {
            return Ok(Settlement::NOTHING);
        }

        let batch = PriceSyncBatch {
            cart_id: cart_id.clone(),
            records: pairs
                .iter()
                .map(|pair| ReconciliationRecord::from_match(&pair.item, &pair.line))
                .collect(),
        };

        if let Err(e) = self.sync.push_prices(&batch).await {
            record_reconciliation("failed");
            return Err(e);
        }
        record_reconciliation("accepted");

        let settle_delay = self.policy.settle_delay(pairs.len());
        tracing::debug!(
            %cart_id,
            lines = pairs.len(),
            delay_ms = settle_delay.as_millis(),
            "Waiting for cart prices to settle"
        );
        tokio::time::sleep(settle_delay).await;
        record_settle_delay(settle_delay);

        Ok(Settlement {
            synced_lines: pairs.len(),
            settle_delay,
        })
    }

    /// Match, reconcile and report. Never fails.
    pub async fn execute(&self, cart_id: CartId, request: ReconcileCartRequest) -> ReconciliationReport {
        if request.cart_lines.is_empty() {
            tracing::warn!(%cart_id, "Cart has no line items, skipping price reconciliation");
            return ReconciliationReport::skipped(cart_id, request.items);
        }

        let outcome = match_cart_lines(&request.items, &request.cart_lines);
        for item in &outcome.unmatched {
            tracing::warn!(
                %cart_id,
                product_id = %item.product_id,
                sku = item.sku().unwrap_or(""),
                "No cart line matched item"
            );
        }
        record_unmatched_items(outcome.unmatched.len());

        if outcome.matched.is_empty() {
            tracing::warn!(%cart_id, "No valid items to reconcile");
            return ReconciliationReport::skipped(cart_id, outcome.unmatched);
        }

        let matched: Vec<MatchedLineDto> = outcome.matched.iter().map(MatchedLineDto::from).collect();

        match self.reconcile(&cart_id, &outcome.matched).await {
            Ok(settlement) => {
                tracing::info!(
                    %cart_id,
                    lines = settlement.synced_lines,
                    unmatched = outcome.unmatched.len(),
                    "Cart prices reconciled"
                );
                ReconciliationReport {
                    cart_id,
                    matched,
                    unmatched: outcome.unmatched,
                    synced: true,
                    settle_delay_ms: u64::try_from(settlement.settle_delay.as_millis())
                        .unwrap_or(u64::MAX),
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!(%cart_id, error = %e, "Cart price reconciliation failed");
                ReconciliationReport {
                    cart_id,
                    matched,
                    unmatched: outcome.unmatched,
                    synced: false,
                    settle_delay_ms: 0,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockPriceSyncPort;
    use crate::domain::cart::{CartLine, FixedPerItemDelay, LogicalItem};
    use crate::domain::shared::{ItemQuantity, LineId, Money, ProductId};

    fn line(id: &str, product: &str) -> CartLine {
        CartLine {
            line_id: LineId::new(id),
            product_id: ProductId::new(product),
            variant_id: None,
            sku: Some(format!("SKU-{product}")),
            name: format!("Product {product}"),
            quantity: 1,
            current_unit_price: Money::from_cents(1000),
        }
    }

    fn item(product: &str) -> LogicalItem {
        LogicalItem {
            product_id: ProductId::new(product),
            variant_id: None,
            sku: None,
            quantity: ItemQuantity::ONE,
            resolved_price: Some(Money::from_cents(900)),
        }
    }

    fn use_case(sync: MockPriceSyncPort) -> ReconcileCartUseCase<MockPriceSyncPort> {
        ReconcileCartUseCase::new(Arc::new(sync), Arc::new(FixedPerItemDelay::default()))
    }

    fn request(products: &[&str]) -> ReconcileCartRequest {
        ReconcileCartRequest {
            items: products.iter().map(|p| item(p)).collect(),
            cart_lines: products
                .iter()
                .enumerate()
                .map(|(i, p)| line(&format!("line-{i}"), p))
                .collect(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn five_pairs_wait_ten_seconds_after_one_request() {
        let mut sync = MockPriceSyncPort::new();
        sync.expect_push_prices()
            .withf(|batch| batch.records.len() == 5 && batch.cart_id.as_str() == "cart-1")
            .times(1)
            .returning(|_| Ok(()));

        let started = tokio::time::Instant::now();
        let report = use_case(sync)
            .execute(CartId::new("cart-1"), request(&["1", "2", "3", "4", "5"]))
            .await;

        assert!(report.synced);
        assert_eq!(report.settle_delay_ms, 10_000);
        assert!(started.elapsed() >= Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_pairs_send_nothing() {
        let mut sync = MockPriceSyncPort::new();
        sync.expect_push_prices().never();

        let settlement = use_case(sync)
            .reconcile(&CartId::new("cart-1"), &[])
            .await
            .unwrap();
        assert_eq!(settlement, Settlement::NOTHING);
    }

    #[tokio::test]
    async fn empty_cart_is_skipped() {
        let mut sync = MockPriceSyncPort::new();
        sync.expect_push_prices().never();

        let request = ReconcileCartRequest {
            items: vec![item("1")],
            cart_lines: Vec::new(),
        };
        let report = use_case(sync).execute(CartId::new("cart-1"), request).await;
        assert!(!report.synced);
        assert_eq!(report.unmatched.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_is_reported_without_waiting() {
        let mut sync = MockPriceSyncPort::new();
        sync.expect_push_prices().returning(|_| {
            Err(PriceSyncError::Rejected {
                status: 500,
                body: "cart locked".to_string(),
            })
        });

        let started = tokio::time::Instant::now();
        let report = use_case(sync)
            .execute(CartId::new("cart-1"), request(&["1", "2"]))
            .await;

        assert!(!report.synced);
        assert_eq!(report.error.as_deref(), Some("Webhook error: 500 - cart locked"));
        assert_eq!(report.matched.len(), 2);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn unmatched_items_are_reported_alongside_matches() {
        let mut sync = MockPriceSyncPort::new();
        sync.expect_push_prices()
            .withf(|batch| {
                batch.records.len() == 1
                    && batch.records[0].resolved_price == Money::from_cents(900)
                    && batch.records[0].original_price == Money::from_cents(1000)
            })
            .returning(|_| Ok(()));

        let request = ReconcileCartRequest {
            items: vec![item("1"), item("99")],
            cart_lines: vec![line("line-0", "1"), line("line-1", "2")],
        };
        let report = use_case(sync).execute(CartId::new("cart-1"), request).await;

        assert!(report.synced);
        assert_eq!(report.matched.len(), 1);
        assert_eq!(report.unmatched[0].product_id.as_str(), "99");
        assert_eq!(report.settle_delay_ms, 2_000);
    }
}
