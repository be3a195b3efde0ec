//! Dependency Injection Container
//!
//! Manages creation and wiring of all application components.

use std::sync::Arc;

use crate::application::ports::{
    CompanyFieldProvider, DocumentSourcePort, OrderLookupPort, PresetCompanyFields, PriceSyncPort,
    PricingSourcePort, ProductFieldsPort,
};
use crate::application::services::{
    CompanyFieldChain, DocumentIdentifierRewriter, OrderIdentifierResolver, PriceCache,
    PricingResolver, ShowPriceResolver,
};
use crate::application::use_cases::{
    AggregatePricesUseCase, ReconcileCartUseCase, RenderInvoiceDocumentUseCase,
};
use crate::config::Config;
use crate::domain::cart::{FixedPerItemDelay, SettlingPolicy};
use crate::domain::pricing::CatalogPriceFallback;
use crate::domain::shared::CurrencyCode;
use crate::infrastructure::documents::{
    HtmlInvoiceRewriter, HttpDocumentSource, PdfInvoiceRewriter,
};
use crate::infrastructure::erp::{
    CartPriceSyncAdapter, ErpOrderLookupAdapter, ErpPricingAdapter, StoreCredentials,
};
use crate::infrastructure::graphql::{GraphqlCompanyFieldProvider, StorefrontProductFieldsAdapter};
use crate::infrastructure::http::AppState;
use crate::infrastructure::webhook::{WebhookClientConfig, WebhookError};

/// Container wired with the HTTP adapters.
pub type ProductionContainer = Container<
    ErpPricingAdapter,
    CartPriceSyncAdapter,
    ErpOrderLookupAdapter,
    HttpDocumentSource,
    StorefrontProductFieldsAdapter,
>;

/// Dependency injection container.
///
/// Holds the driven ports plus the shared state every request sees: the
/// price cache, the company provider chain and the PDF stamper.
pub struct Container<S, P, L, D, F>
where
    S: PricingSourcePort + 'static,
    P: PriceSyncPort + 'static,
    L: OrderLookupPort + 'static,
    D: DocumentSourcePort + 'static,
    F: ProductFieldsPort + 'static,
{
    // Ports
    pricing_source: Arc<S>,
    price_sync: Arc<P>,
    order_lookup: Arc<L>,
    document_source: Arc<D>,
    product_fields: Arc<F>,

    // Shared state
    cache: Arc<PriceCache>,
    fallback: CatalogPriceFallback,
    settling: Arc<dyn SettlingPolicy>,
    preset_companies: Arc<PresetCompanyFields>,
    companies: Arc<CompanyFieldChain>,
    stamper: PdfInvoiceRewriter,
}

/// Shared pieces that are not ports.
pub struct SharedState {
    /// Price cache.
    pub cache: Arc<PriceCache>,
    /// Catalog fallback pricing.
    pub fallback: CatalogPriceFallback,
    /// Wait after a cart price update.
    pub settling: Arc<dyn SettlingPolicy>,
    /// Caller-supplied company fields, consulted first.
    pub preset_companies: Arc<PresetCompanyFields>,
    /// Remaining company field providers in priority order.
    pub company_providers: Vec<Arc<dyn CompanyFieldProvider>>,
    /// PDF identifier stamper.
    pub stamper: PdfInvoiceRewriter,
}

impl<S, P, L, D, F> Container<S, P, L, D, F>
where
    S: PricingSourcePort + 'static,
    P: PriceSyncPort + 'static,
    L: OrderLookupPort + 'static,
    D: DocumentSourcePort + 'static,
    F: ProductFieldsPort + 'static,
{
    /// Create a new container with all dependencies.
    pub fn new(
        pricing_source: Arc<S>,
        price_sync: Arc<P>,
        order_lookup: Arc<L>,
        document_source: Arc<D>,
        product_fields: Arc<F>,
        shared: SharedState,
    ) -> Self {
        let preset: Arc<dyn CompanyFieldProvider> = Arc::clone(&shared.preset_companies) as _;
        let providers = std::iter::once(preset)
            .chain(shared.company_providers)
            .collect();

        Self {
            pricing_source,
            price_sync,
            order_lookup,
            document_source,
            product_fields,
            cache: shared.cache,
            fallback: shared.fallback,
            settling: shared.settling,
            preset_companies: shared.preset_companies,
            companies: Arc::new(CompanyFieldChain::new(providers)),
            stamper: shared.stamper,
        }
    }

    /// Get the shared price cache.
    pub fn price_cache(&self) -> Arc<PriceCache> {
        Arc::clone(&self.cache)
    }

    /// Get the preset company provider.
    pub fn preset_companies(&self) -> Arc<PresetCompanyFields> {
        Arc::clone(&self.preset_companies)
    }

    /// Create a `PricingResolver`.
    pub fn pricing_resolver(&self) -> PricingResolver<S> {
        PricingResolver::new(
            Arc::clone(&self.pricing_source),
            Arc::clone(&self.cache),
            self.fallback.clone(),
        )
    }

    /// Create a `ReconcileCartUseCase`.
    pub fn reconcile_cart_use_case(&self) -> ReconcileCartUseCase<P> {
        ReconcileCartUseCase::new(Arc::clone(&self.price_sync), Arc::clone(&self.settling))
    }

    /// Create an `OrderIdentifierResolver`.
    pub fn order_identifier_resolver(&self) -> OrderIdentifierResolver<L> {
        OrderIdentifierResolver::new(Arc::clone(&self.order_lookup))
    }

    /// Create a `ShowPriceResolver`.
    pub fn show_price_resolver(&self) -> ShowPriceResolver<F> {
        ShowPriceResolver::new(Arc::clone(&self.product_fields))
    }

    /// Build the HTTP application state.
    pub fn app_state(&self, version: impl Into<String>) -> AppState<S, P, L, D, F> {
        let resolver = Arc::new(self.pricing_resolver());
        let order_ids = Arc::new(self.order_identifier_resolver());
        let pdf_rewriter = Arc::new(DocumentIdentifierRewriter::new(self.stamper.clone()));

        AppState {
            aggregate_prices: Arc::new(AggregatePricesUseCase::new(Arc::clone(&resolver))),
            resolver,
            reconcile_cart: Arc::new(self.reconcile_cart_use_case()),
            render_invoice: Arc::new(RenderInvoiceDocumentUseCase::new(
                Arc::clone(&self.document_source),
                Arc::clone(&order_ids),
                Arc::clone(&pdf_rewriter),
            )),
            order_ids,
            pdf_rewriter,
            html_rewriter: Arc::new(DocumentIdentifierRewriter::new(HtmlInvoiceRewriter::new())),
            companies: Arc::clone(&self.companies),
            show_price: Arc::new(self.show_price_resolver()),
            version: version.into(),
        }
    }
}

impl ProductionContainer {
    /// Build every adapter from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, WebhookError> {
        let pricing = ErpPricingAdapter::new(
            &config.pricing.endpoint,
            &WebhookClientConfig::from(&config.pricing.client),
        )?;

        let reconciliation = &config.reconciliation;
        let sync = CartPriceSyncAdapter::new(
            &reconciliation.endpoint,
            StoreCredentials {
                store_hash: reconciliation.store_hash.clone(),
                auth_token: reconciliation.auth_token.clone(),
            },
            &WebhookClientConfig::from(&reconciliation.client),
        )?;

        let orders = ErpOrderLookupAdapter::new(
            &config.orders.endpoint,
            &WebhookClientConfig::from(&config.orders.client),
        )?;

        let documents = HttpDocumentSource::new(&WebhookClientConfig::from(&config.documents.client))?;

        if !config.catalog.is_enabled() {
            tracing::warn!("Catalog GraphQL endpoint not configured, show_price will be off");
        }
        let catalog = StorefrontProductFieldsAdapter::new(
            &config.catalog.endpoint,
            config.catalog.token().map(str::to_string),
            &WebhookClientConfig::from(&config.catalog.client),
        )?;

        let mut company_providers: Vec<Arc<dyn CompanyFieldProvider>> = Vec::new();
        if config.company.is_enabled() {
            company_providers.push(Arc::new(GraphqlCompanyFieldProvider::new(
                &config.company.endpoint,
                config.company.token().map(str::to_string),
                &WebhookClientConfig::from(&config.company.client),
            )?));
        }

        let default_currency =
            CurrencyCode::parse(&config.pricing.default_currency).unwrap_or_default();

        let shared = SharedState {
            cache: Arc::new(PriceCache::new(config.pricing.cache_ttl())),
            fallback: CatalogPriceFallback::new(config.pricing.tax_display, default_currency),
            settling: Arc::new(
                FixedPerItemDelay::new(reconciliation.settle_per_item())
                    .with_max(reconciliation.max_settle()),
            ),
            preset_companies: Arc::new(PresetCompanyFields::new()),
            company_providers,
            stamper: PdfInvoiceRewriter::new(config.documents.region.clone()),
        };

        Ok(Self::new(
            Arc::new(pricing),
            Arc::new(sync),
            Arc::new(orders),
            Arc::new(documents),
            Arc::new(catalog),
            shared,
        ))
    }
}
