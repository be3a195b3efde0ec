//! End-to-end tests for the HTTP API.
//!
//! Wires the production container against mock ERP, storefront and
//! document hosts and drives it through the router.

// Allow unwrap in tests - tests should panic on unexpected errors
#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pricing_engine::config::load_config_from_string;
use pricing_engine::domain::company::CompanyPricingFields;
use pricing_engine::domain::pricing::{PriceSource, ResolvedPrice};
use pricing_engine::domain::shared::{CustomerId, GroupCode, Money, UserId};
use pricing_engine::infrastructure::config::ProductionContainer;
use pricing_engine::infrastructure::http::{REWRITE_STATUS_HEADER, create_router};

// =============================================================================
// Harness
// =============================================================================

struct Harness {
    erp: MockServer,
    storefront: MockServer,
    container: ProductionContainer,
}

impl Harness {
    async fn start() -> Self {
        let erp = MockServer::start().await;
        let storefront = MockServer::start().await;

        let yaml = format!(
            r"
pricing:
  endpoint: {erp}/pricing
  cache_ttl_secs: 300
  client:
    retry:
      max_attempts: 1
reconciliation:
  endpoint: {erp}/cart-prices
  store_hash: store-1
  auth_token: secret
  settle_secs_per_item: 0
  client:
    retry:
      max_attempts: 1
orders:
  endpoint: {erp}/orders
  client:
    retry:
      max_attempts: 1
catalog:
  endpoint: {storefront}/graphql
documents:
  client:
    retry:
      max_attempts: 1
",
            erp = erp.uri(),
            storefront = storefront.uri(),
        );
        let config = load_config_from_string(&yaml).unwrap();
        let container = ProductionContainer::from_config(&config).unwrap();

        Self {
            erp,
            storefront,
            container,
        }
    }

    fn app(&self) -> Router {
        create_router(self.container.app_state("test"))
    }
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn privileged_context() -> Value {
    json!({"customer_id": "C100", "group_code": "WHOLESALE", "is_privileged": true})
}

/// One-page invoice printing `Order ID: 1001`.
fn invoice_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 10.into()]),
            Operation::new("Td", vec![482.into(), 710.into()]),
            Operation::new("Tj", vec![Object::string_literal("Order ID: 1001")]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).unwrap();
    out
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

// =============================================================================
// Pricing
// =============================================================================

#[tokio::test]
async fn privileged_price_comes_from_erp_and_is_cached() {
    let harness = Harness::start().await;
    Mock::given(method("POST"))
        .and(path("/pricing"))
        .and(body_partial_json(json!({
            "customer_id": "C100",
            "customer_group_code": "WHOLESALE",
            "product_id": "42",
            "quantity": 3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "success": true,
            "pricing": {"valid": true, "netPrice": 7.25, "currency": "USD"}
        }])))
        .expect(1)
        .mount(&harness.erp)
        .await;

    let body = json!({
        "context": privileged_context(),
        "item": {"product_id": "42", "sku": "A1", "quantity": 3, "catalog_base_price": "10.00"}
    });

    for _ in 0..2 {
        let response = harness
            .app()
            .oneshot(json_request("POST", "/api/v1/prices/resolve", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let price: ResolvedPrice = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(price.source, PriceSource::Remote);
        assert_eq!(price.unit_price, Money::new(dec!(7.25)));
        assert!(price.valid);
    }

    assert_eq!(harness.container.price_cache().len(), 1);
}

#[tokio::test]
async fn erp_refusal_falls_back_to_catalog() {
    let harness = Harness::start().await;
    Mock::given(method("POST"))
        .and(path("/pricing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "customer on hold"
        })))
        .mount(&harness.erp)
        .await;

    let body = json!({
        "context": privileged_context(),
        "item": {"product_id": "42", "sku": "A1", "quantity": 1, "catalog_base_price": "10.00"}
    });
    let response = harness
        .app()
        .oneshot(json_request("POST", "/api/v1/prices/resolve", &body))
        .await
        .unwrap();

    let price: ResolvedPrice = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(price.source, PriceSource::Fallback);
    assert_eq!(price.unit_price, Money::new(dec!(10.00)));
    assert!(harness.container.price_cache().is_empty());
}

#[tokio::test]
async fn aggregate_mixes_remote_and_fallback_prices() {
    let harness = Harness::start().await;
    Mock::given(method("POST"))
        .and(path("/pricing"))
        .and(body_partial_json(json!({"product_id": "1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "success": true,
            "pricing": {"valid": true, "netPrice": "4.50"}
        }])))
        .mount(&harness.erp)
        .await;
    Mock::given(method("POST"))
        .and(path("/pricing"))
        .and(body_partial_json(json!({"product_id": "2"})))
        .respond_with(ResponseTemplate::new(503))
        .mount(&harness.erp)
        .await;

    let body = json!({
        "context": privileged_context(),
        "items": [
            {"product_id": "1", "sku": "S1", "quantity": 2, "catalog_base_price": "5.00"},
            {"product_id": "2", "sku": "S2", "quantity": 1, "catalog_base_price": "3.00"}
        ]
    });
    let response = harness
        .app()
        .oneshot(json_request("POST", "/api/v1/prices/aggregate", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let aggregate = body_json(response).await;
    assert_eq!(aggregate["remote_count"], 1);
    assert_eq!(aggregate["fallback_count"], 1);
    let total: Money = serde_json::from_value(aggregate["total"].clone()).unwrap();
    assert_eq!(total, Money::new(dec!(12.00)));
    assert_eq!(aggregate["items"][0]["index"], 0);
    assert_eq!(aggregate["items"][1]["index"], 1);
}

#[tokio::test]
async fn numeric_storefront_ids_are_accepted() {
    let harness = Harness::start().await;
    Mock::given(method("POST"))
        .and(path("/pricing"))
        .and(body_partial_json(json!({"product_id": "42"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "pricing": {"valid": true, "netPrice": 7.25}
        })))
        .mount(&harness.erp)
        .await;

    let body = json!({
        "context": privileged_context(),
        "item": {"product_id": 42, "variant_id": 7, "sku": "A1", "quantity": 1, "catalog_base_price": "10.00"}
    });
    let response = harness
        .app()
        .oneshot(json_request("POST", "/api/v1/prices/resolve", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let price: ResolvedPrice = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(price.source, PriceSource::Remote);
    assert_eq!(price.unit_price, Money::new(dec!(7.25)));
}

#[tokio::test]
async fn preset_company_drives_pricing_context() {
    let harness = Harness::start().await;
    harness.container.preset_companies().insert(
        UserId::new("17"),
        CompanyPricingFields {
            customer_id: Some(CustomerId::new("C100")),
            group_code: Some(GroupCode::new("WHOLESALE")),
        },
    );

    let response = harness
        .app()
        .oneshot(get("/api/v1/users/17/pricing-context?role=1"))
        .await
        .unwrap();
    let context = body_json(response).await;
    assert_eq!(context["is_privileged"], true);
    assert_eq!(context["customer_id"], "C100");

    let response = harness
        .app()
        .oneshot(get("/api/v1/users/18/pricing-context?role=1"))
        .await
        .unwrap();
    let context = body_json(response).await;
    assert_eq!(context["is_privileged"], false);
}

// =============================================================================
// Cart reconciliation
// =============================================================================

#[tokio::test]
async fn reconcile_pushes_one_batch_for_matched_lines() {
    let harness = Harness::start().await;
    Mock::given(method("POST"))
        .and(path("/cart-prices"))
        .and(body_partial_json(json!({
            "action": "update_cart_prices",
            "cart_id": "cart-9",
            "store_hash": "store-1",
            "total_items": 2
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&harness.erp)
        .await;

    let body = json!({
        "items": [
            {"product_id": "1", "sku": "S1", "quantity": 1, "resolved_price": "4.50"},
            {"product_id": "2", "quantity": 2, "resolved_price": "2.00"},
            {"product_id": "3", "quantity": 1}
        ],
        "cart_lines": [
            {"line_id": "a", "product_id": "1", "sku": "S1", "quantity": 1, "current_unit_price": "5.00"},
            {"line_id": "b", "product_id": "2", "quantity": 2, "current_unit_price": "3.00"}
        ]
    });
    let response = harness
        .app()
        .oneshot(json_request("POST", "/api/v1/carts/cart-9/reconcile", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let report = body_json(response).await;
    assert_eq!(report["synced"], true);
    assert_eq!(report["matched"].as_array().unwrap().len(), 2);
    assert_eq!(report["unmatched"][0]["product_id"], "3");
}

#[tokio::test]
async fn reconcile_rejection_is_reported_not_raised() {
    let harness = Harness::start().await;
    Mock::given(method("POST"))
        .and(path("/cart-prices"))
        .respond_with(ResponseTemplate::new(400).set_body_string("unknown cart"))
        .mount(&harness.erp)
        .await;

    let body = json!({
        "items": [{"product_id": 1, "quantity": 1, "resolved_price": "4.50"}],
        "cart_lines": [{"line_id": "a", "product_id": 1, "current_unit_price": "5.00"}]
    });
    let response = harness
        .app()
        .oneshot(json_request("POST", "/api/v1/carts/cart-9/reconcile", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let report = body_json(response).await;
    assert_eq!(report["synced"], false);
    assert!(report["error"].as_str().unwrap().contains("unknown cart"));
}

// =============================================================================
// Order identifiers and documents
// =============================================================================

#[tokio::test]
async fn external_order_id_is_read_from_erp() {
    let harness = Harness::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("orderId", "1001"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "EpicorErpOrderNumber": "491655"})),
        )
        .mount(&harness.erp)
        .await;

    let response = harness
        .app()
        .oneshot(get("/api/v1/orders/1001/external-id"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["local_order_id"], "1001");
    assert_eq!(body["external_order_id"], "491655");
}

#[tokio::test]
async fn rendered_invoice_carries_erp_order_number() {
    let harness = Harness::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("orderId", "1001"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "EpicorErpOrderNumber": 491_655})),
        )
        .mount(&harness.erp)
        .await;
    Mock::given(method("GET"))
        .and(path("/invoices/1001.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(invoice_pdf()))
        .mount(&harness.storefront)
        .await;

    let body = json!({
        "document_url": format!("{}/invoices/1001.pdf", harness.storefront.uri()),
        "local_order_id": "1001"
    });
    let response = harness
        .app()
        .oneshot(json_request("POST", "/api/v1/documents/render", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[REWRITE_STATUS_HEADER], "rewritten");
    let document = body_bytes(response).await;
    assert!(Document::load_mem(&document).is_ok());
    assert!(contains(&document, b"Order ID: 491655"));
}

#[tokio::test]
async fn rendered_invoice_passes_through_without_mapping() {
    let harness = Harness::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&harness.erp)
        .await;
    let original = invoice_pdf();
    Mock::given(method("GET"))
        .and(path("/invoices/1001.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(original.clone()))
        .mount(&harness.storefront)
        .await;

    let body = json!({
        "document_url": format!("{}/invoices/1001.pdf", harness.storefront.uri()),
        "local_order_id": "1001"
    });
    let response = harness
        .app()
        .oneshot(json_request("POST", "/api/v1/documents/render", &body))
        .await
        .unwrap();

    assert_eq!(response.headers()[REWRITE_STATUS_HEADER], "passthrough");
    assert_eq!(body_bytes(response).await, original);
}

#[tokio::test]
async fn missing_invoice_is_bad_gateway() {
    let harness = Harness::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&harness.storefront)
        .await;

    let body = json!({
        "document_url": format!("{}/invoices/404.pdf", harness.storefront.uri()),
        "local_order_id": "404"
    });
    let response = harness
        .app()
        .oneshot(json_request("POST", "/api/v1/documents/render", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "document_unavailable");
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn show_price_follows_catalog_custom_field() {
    let harness = Harness::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"site": {"product": {"customFields": {"edges": [
                {"node": {"name": "show_price", "value": "Yes"}}
            ]}}}}
        })))
        .mount(&harness.storefront)
        .await;

    let response = harness
        .app()
        .oneshot(get("/api/v1/products/42/show-price"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["product_id"], "42");
    assert_eq!(body["show_price"], true);
}
