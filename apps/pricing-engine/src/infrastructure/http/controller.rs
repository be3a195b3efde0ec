//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to application use cases.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};

use crate::application::dto::{
    AggregatePricesRequest, PriceAggregate, ReconcileCartRequest, ReconciliationReport,
    ResolvePriceRequest,
};
use crate::application::ports::{
    DocumentSourcePort, OrderLookupPort, PriceSyncPort, PricingSourcePort, ProductFieldsPort,
};
use crate::application::services::{
    CompanyFieldChain, DocumentIdentifierRewriter, OrderIdentifierResolver, PricingResolver,
    ShowPriceResolver,
};
use crate::application::use_cases::{
    AggregatePricesUseCase, ReconcileCartUseCase, RenderInvoiceDocumentUseCase,
};
use crate::domain::pricing::{PricingContext, RETAIL_ROLE, ResolvedPrice};
use crate::domain::shared::{CartId, ExternalOrderId, LocalOrderId, ProductId, UserId};
use crate::infrastructure::documents::{HtmlInvoiceRewriter, PdfInvoiceRewriter};

use super::request::{PricingContextQuery, RenderInvoiceRequest, RewriteDocumentQuery};
use super::response::{
    ApiErrorResponse, CacheClearedResponse, ExternalOrderIdResponse, HealthResponse,
    ShowPriceResponse,
};

/// Response header carrying the document rewrite outcome.
pub const REWRITE_STATUS_HEADER: &str = "x-rewrite-status";

const MAX_DOCUMENT_BYTES: usize = 32 * 1024 * 1024;

/// Application state shared across handlers.
pub struct AppState<S, P, L, D, F>
where
    S: PricingSourcePort + 'static,
    P: PriceSyncPort,
    L: OrderLookupPort,
    D: DocumentSourcePort,
    F: ProductFieldsPort,
{
    /// Single-item price resolution.
    pub resolver: Arc<PricingResolver<S>>,
    /// Batch pricing.
    pub aggregate_prices: Arc<AggregatePricesUseCase<S>>,
    /// Cart price reconciliation.
    pub reconcile_cart: Arc<ReconcileCartUseCase<P>>,
    /// ERP order number resolution.
    pub order_ids: Arc<OrderIdentifierResolver<L>>,
    /// PDF identifier rewriting.
    pub pdf_rewriter: Arc<DocumentIdentifierRewriter<PdfInvoiceRewriter>>,
    /// Printable HTML invoice identifier rewriting.
    pub html_rewriter: Arc<DocumentIdentifierRewriter<HtmlInvoiceRewriter>>,
    /// Fetch-resolve-rewrite invoice pipeline.
    pub render_invoice: Arc<RenderInvoiceDocumentUseCase<D, L, PdfInvoiceRewriter>>,
    /// Company field providers.
    pub companies: Arc<CompanyFieldChain>,
    /// Show-price flags.
    pub show_price: Arc<ShowPriceResolver<F>>,
    /// Application version.
    pub version: String,
}

impl<S, P, L, D, F> Clone for AppState<S, P, L, D, F>
where
    S: PricingSourcePort + 'static,
    P: PriceSyncPort,
    L: OrderLookupPort,
    D: DocumentSourcePort,
    F: ProductFieldsPort,
{
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            aggregate_prices: Arc::clone(&self.aggregate_prices),
            reconcile_cart: Arc::clone(&self.reconcile_cart),
            order_ids: Arc::clone(&self.order_ids),
            pdf_rewriter: Arc::clone(&self.pdf_rewriter),
            html_rewriter: Arc::clone(&self.html_rewriter),
            render_invoice: Arc::clone(&self.render_invoice),
            companies: Arc::clone(&self.companies),
            show_price: Arc::clone(&self.show_price),
            version: self.version.clone(),
        }
    }
}

/// Error returned to HTTP callers.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "invalid_request",
            message: message.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse {
            code: self.code.to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<S, P, L, D, F>(state: AppState<S, P, L, D, F>) -> Router
where
    S: PricingSourcePort + 'static,
    P: PriceSyncPort + 'static,
    L: OrderLookupPort + 'static,
    D: DocumentSourcePort + 'static,
    F: ProductFieldsPort + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/prices/resolve", post(resolve_price))
        .route("/api/v1/prices/aggregate", post(aggregate_prices))
        .route("/api/v1/prices/cache", delete(clear_price_cache))
        .route("/api/v1/carts/{cart_id}/reconcile", post(reconcile_cart))
        .route("/api/v1/orders/{order_id}/external-id", get(external_order_id))
        .route(
            "/api/v1/documents/rewrite",
            post(rewrite_document).layer(DefaultBodyLimit::max(MAX_DOCUMENT_BYTES)),
        )
        .route(
            "/api/v1/documents/rewrite-html",
            post(rewrite_html_document).layer(DefaultBodyLimit::max(MAX_DOCUMENT_BYTES)),
        )
        .route("/api/v1/documents/render", post(render_invoice))
        .route("/api/v1/users/{user_id}/pricing-context", get(pricing_context))
        .route("/api/v1/products/{product_id}/show-price", get(show_price))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check<S, P, L, D, F>(
    State(state): State<AppState<S, P, L, D, F>>,
) -> impl IntoResponse
where
    S: PricingSourcePort + 'static,
    P: PriceSyncPort,
    L: OrderLookupPort,
    D: DocumentSourcePort,
    F: ProductFieldsPort,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

/// Resolve one unit price.
async fn resolve_price<S, P, L, D, F>(
    State(state): State<AppState<S, P, L, D, F>>,
    payload: Result<Json<ResolvePriceRequest>, JsonRejection>,
) -> Result<Json<ResolvedPrice>, ApiError>
where
    S: PricingSourcePort + 'static,
    P: PriceSyncPort,
    L: OrderLookupPort,
    D: DocumentSourcePort,
    F: ProductFieldsPort,
{
    let Json(request) = payload?;
    let price = state.resolver.resolve(&request.context, &request.item).await;
    Ok(Json(price))
}

/// Price a batch and total it.
async fn aggregate_prices<S, P, L, D, F>(
    State(state): State<AppState<S, P, L, D, F>>,
    payload: Result<Json<AggregatePricesRequest>, JsonRejection>,
) -> Result<Json<PriceAggregate>, ApiError>
where
    S: PricingSourcePort + 'static,
    P: PriceSyncPort,
    L: OrderLookupPort,
    D: DocumentSourcePort,
    F: ProductFieldsPort,
{
    let Json(request) = payload?;
    let aggregate = state
        .aggregate_prices
        .execute(&request.context, &request.items)
        .await;
    Ok(Json(aggregate))
}

/// Drop every cached price.
async fn clear_price_cache<S, P, L, D, F>(
    State(state): State<AppState<S, P, L, D, F>>,
) -> impl IntoResponse
where
    S: PricingSourcePort + 'static,
    P: PriceSyncPort,
    L: OrderLookupPort,
    D: DocumentSourcePort,
    F: ProductFieldsPort,
{
    let cache = state.resolver.cache();
    let cleared = cache.len();
    cache.clear();
    tracing::info!(cleared, "Price cache cleared");
    Json(CacheClearedResponse { cleared })
}

/// Reconcile a persisted cart. Failures are reported in the body.
async fn reconcile_cart<S, P, L, D, F>(
    State(state): State<AppState<S, P, L, D, F>>,
    Path(cart_id): Path<String>,
    payload: Result<Json<ReconcileCartRequest>, JsonRejection>,
) -> Result<Json<ReconciliationReport>, ApiError>
where
    S: PricingSourcePort + 'static,
    P: PriceSyncPort,
    L: OrderLookupPort,
    D: DocumentSourcePort,
    F: ProductFieldsPort,
{
    let Json(request) = payload?;
    if cart_id.trim().is_empty() {
        return Err(ApiError::bad_request("cart id is required"));
    }
    let report = state
        .reconcile_cart
        .execute(CartId::new(cart_id), request)
        .await;
    Ok(Json(report))
}

/// ERP order number of a storefront order.
async fn external_order_id<S, P, L, D, F>(
    State(state): State<AppState<S, P, L, D, F>>,
    Path(order_id): Path<String>,
) -> impl IntoResponse
where
    S: PricingSourcePort + 'static,
    P: PriceSyncPort,
    L: OrderLookupPort,
    D: DocumentSourcePort,
    F: ProductFieldsPort,
{
    let local_order_id = LocalOrderId::new(order_id);
    let external_order_id = state
        .order_ids
        .resolve(&local_order_id, &HashMap::new())
        .await;
    Json(ExternalOrderIdResponse {
        local_order_id,
        external_order_id,
    })
}

fn document_response(content_type: &'static str, document: Vec<u8>, status: &'static str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type),
            (header::HeaderName::from_static(REWRITE_STATUS_HEADER), status),
        ],
        document,
    )
        .into_response()
}

/// Rewrite the order identifier of an uploaded PDF.
async fn rewrite_document<S, P, L, D, F>(
    State(state): State<AppState<S, P, L, D, F>>,
    Query(query): Query<RewriteDocumentQuery>,
    body: Bytes,
) -> Response
where
    S: PricingSourcePort + 'static,
    P: PriceSyncPort,
    L: OrderLookupPort,
    D: DocumentSourcePort,
    F: ProductFieldsPort,
{
    let external = external_for_rewrite(&state.order_ids, &query).await;
    let outcome = Arc::clone(&state.pdf_rewriter)
        .rewrite_blocking(body.to_vec(), query.local_order_id, external)
        .await;
    document_response("application/pdf", outcome.document, outcome.status.as_str())
}

/// Rewrite the order identifier of an uploaded printable HTML invoice.
async fn rewrite_html_document<S, P, L, D, F>(
    State(state): State<AppState<S, P, L, D, F>>,
    Query(query): Query<RewriteDocumentQuery>,
    body: Bytes,
) -> Response
where
    S: PricingSourcePort + 'static,
    P: PriceSyncPort,
    L: OrderLookupPort,
    D: DocumentSourcePort,
    F: ProductFieldsPort,
{
    let external = external_for_rewrite(&state.order_ids, &query).await;
    let outcome = Arc::clone(&state.html_rewriter)
        .rewrite_blocking(body.to_vec(), query.local_order_id, external)
        .await;
    document_response(
        "text/html; charset=utf-8",
        outcome.document,
        outcome.status.as_str(),
    )
}

/// The explicit ERP order number, else a lookup by the local one.
async fn external_for_rewrite<L>(
    order_ids: &OrderIdentifierResolver<L>,
    query: &RewriteDocumentQuery,
) -> Option<ExternalOrderId>
where
    L: OrderLookupPort,
{
    match (&query.external_order_id, &query.local_order_id) {
        (Some(external), _) => Some(external.clone()),
        (None, Some(local)) => order_ids.resolve(local, &HashMap::new()).await,
        (None, None) => None,
    }
}

/// Download an invoice and print the ERP order number on it.
async fn render_invoice<S, P, L, D, F>(
    State(state): State<AppState<S, P, L, D, F>>,
    payload: Result<Json<RenderInvoiceRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    S: PricingSourcePort + 'static,
    P: PriceSyncPort,
    L: OrderLookupPort,
    D: DocumentSourcePort,
    F: ProductFieldsPort,
{
    let Json(request) = payload?;
    let rendered = state
        .render_invoice
        .execute(
            &request.document_url,
            &request.local_order_id,
            &request.known_mappings,
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, url = %request.document_url, "Invoice download failed");
            ApiError {
                status: StatusCode::BAD_GATEWAY,
                code: "document_unavailable",
                message: e.to_string(),
            }
        })?;

    Ok(document_response(
        "application/pdf",
        rendered.document,
        rendered.status.as_str(),
    ))
}

/// Pricing context for a user.
async fn pricing_context<S, P, L, D, F>(
    State(state): State<AppState<S, P, L, D, F>>,
    Path(user_id): Path<String>,
    Query(query): Query<PricingContextQuery>,
) -> Json<PricingContext>
where
    S: PricingSourcePort + 'static,
    P: PriceSyncPort,
    L: OrderLookupPort,
    D: DocumentSourcePort,
    F: ProductFieldsPort,
{
    let role = query.role.unwrap_or(RETAIL_ROLE);
    let context = state
        .companies
        .pricing_context(&UserId::new(user_id), role)
        .await;
    Json(context)
}

/// Whether a product's price may be shown.
async fn show_price<S, P, L, D, F>(
    State(state): State<AppState<S, P, L, D, F>>,
    Path(product_id): Path<String>,
) -> Json<ShowPriceResponse>
where
    S: PricingSourcePort + 'static,
    P: PriceSyncPort,
    L: OrderLookupPort,
    D: DocumentSourcePort,
    F: ProductFieldsPort,
{
    let product_id = ProductId::new(product_id);
    let show_price = state.show_price.is_enabled(&product_id).await;
    Json(ShowPriceResponse {
        product_id,
        show_price,
    })
}
