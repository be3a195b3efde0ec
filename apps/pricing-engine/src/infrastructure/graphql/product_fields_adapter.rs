//! Storefront catalog custom fields over GraphQL.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::application::ports::{ProductFieldsError, ProductFieldsPort};
use crate::domain::catalog::CustomField;
use crate::domain::shared::ProductId;
use crate::infrastructure::webhook::{WebhookClientConfig, WebhookError, WebhookHttpClient};

const PRODUCT_FIELDS_QUERY: &str = "query ProductCustomFields($productId: Int!) { site { product(entityId: $productId) { customFields { edges { node { name value } } } } } }";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductVariables {
    product_id: i64,
}

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: ProductVariables,
}

/// Reads product custom fields from the storefront GraphQL API.
#[derive(Debug, Clone)]
pub struct StorefrontProductFieldsAdapter {
    client: WebhookHttpClient,
    endpoint: String,
    token: Option<String>,
}

impl StorefrontProductFieldsAdapter {
    /// Create an adapter for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        token: Option<String>,
        config: &WebhookClientConfig,
    ) -> Result<Self, WebhookError> {
        Ok(Self {
            client: WebhookHttpClient::new(config)?,
            endpoint: endpoint.into(),
            token,
        })
    }
}

/// `site.product.customFields.edges[].node`, with or without `data`.
fn custom_field_nodes(payload: &Value) -> Vec<CustomField> {
    let site = payload
        .get("data")
        .and_then(|data| data.get("site"))
        .or_else(|| payload.get("site"));

    site.and_then(|site| site.pointer("/product/customFields/edges"))
        .and_then(Value::as_array)
        .map(|edges| {
            edges
                .iter()
                .filter_map(|edge| edge.get("node"))
                .filter_map(|node| serde_json::from_value(node.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl ProductFieldsPort for StorefrontProductFieldsAdapter {
    async fn custom_fields(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<CustomField>, ProductFieldsError> {
        let product_id_num =
            product_id
                .as_str()
                .trim()
                .parse::<i64>()
                .map_err(|e| ProductFieldsError::Decode {
                    message: format!("product id {product_id}: {e}"),
                })?;

        let request = GraphqlRequest {
            query: PRODUCT_FIELDS_QUERY,
            variables: ProductVariables {
                product_id: product_id_num,
            },
        };
        let payload = self
            .client
            .post_json(&self.endpoint, &request, self.token.as_deref())
            .await
            .map_err(ProductFieldsError::from)?;

        Ok(custom_field_nodes(&payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::webhook::RetryConfig;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter(server: &MockServer) -> StorefrontProductFieldsAdapter {
        let config = WebhookClientConfig::default().with_retry(RetryConfig::no_retry());
        StorefrontProductFieldsAdapter::new(server.uri(), None, &config).unwrap()
    }

    #[test]
    fn reads_bare_and_wrapped_payloads() {
        let node = json!({"product": {"customFields": {"edges": [
            {"node": {"name": "show_price", "value": "yes"}},
            {"node": {"name": "material", "value": "steel"}}
        ]}}});

        let wrapped = custom_field_nodes(&json!({"data": {"site": node.clone()}}));
        let bare = custom_field_nodes(&json!({"site": node}));
        assert_eq!(wrapped, bare);
        assert_eq!(wrapped[0], CustomField::new("show_price", "yes"));
    }

    #[test]
    fn unknown_product_has_no_fields() {
        assert!(custom_field_nodes(&json!({"data": {"site": {"product": null}}})).is_empty());
    }

    #[tokio::test]
    async fn queries_by_numeric_product_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"variables": {"productId": 42}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"site": {"product": {"customFields": {"edges": [
                    {"node": {"name": "show_price", "value": "Yes"}}
                ]}}}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let fields = adapter(&server).custom_fields(&ProductId::new("42")).await.unwrap();
        assert_eq!(fields, vec![CustomField::new("show_price", "Yes")]);
    }
}
