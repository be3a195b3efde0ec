//! Show-price flag resolution with a per-product cache.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::application::ports::ProductFieldsPort;
use crate::domain::catalog::show_price_enabled;
use crate::domain::shared::ProductId;

/// Decides whether a product's price may be displayed.
///
/// Results, including lookup failures, are cached until [`Self::clear`].
#[derive(Debug)]
pub struct ShowPriceResolver<P>
where
    P: ProductFieldsPort,
{
    fields: Arc<P>,
    cache: Mutex<HashMap<String, bool>>,
}

impl<P> ShowPriceResolver<P>
where
    P: ProductFieldsPort,
{
    /// Create a resolver.
    #[must_use]
    pub fn new(fields: Arc<P>) -> Self {
        Self {
            fields,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// True when `product_id` has `show_price = yes`.
    pub async fn is_enabled(&self, product_id: &ProductId) -> bool {
        if product_id.is_unassigned() {
            return false;
        }

        let key = product_id.as_str().trim().to_string();
        if let Some(enabled) = self.cache.lock().get(&key).copied() {
            return enabled;
        }

        let enabled = match self.fields.custom_fields(product_id).await {
            Ok(fields) => show_price_enabled(&fields),
            Err(e) => {
                tracing::error!(error = %e, %product_id, "Unable to determine show_price");
                false
            }
        };

        self.cache.lock().insert(key, enabled);
        enabled
    }

    /// Forget every cached flag.
    pub fn clear(&self) {
        self.cache.lock().clear();
    }
}
