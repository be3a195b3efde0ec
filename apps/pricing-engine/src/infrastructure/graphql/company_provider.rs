//! B2B company lookup over GraphQL.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ports::{CompanyFieldProvider, CompanyLookupError};
use crate::domain::company::{CompanyPricingFields, ExtraField, extract_company_fields};
use crate::domain::shared::UserId;
use crate::infrastructure::webhook::{WebhookClientConfig, WebhookError, WebhookHttpClient};

const USER_COMPANY_QUERY: &str = "query GetCompany($userId: Int!) { userCompany(userId: $userId) { id companyName extraFields { fieldName fieldValue } } }";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserCompanyVariables {
    user_id: i64,
}

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a, V> {
    query: &'a str,
    variables: V,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserCompany {
    #[serde(default)]
    extra_fields: Vec<ExtraField>,
}

/// Reads a company's ERP identifiers from the B2B GraphQL API.
#[derive(Debug, Clone)]
pub struct GraphqlCompanyFieldProvider {
    client: WebhookHttpClient,
    endpoint: String,
    token: Option<String>,
}

impl GraphqlCompanyFieldProvider {
    /// Create a provider for `endpoint`.
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

/// `userCompany` from `{data: {userCompany}}` or `{userCompany}`.
fn user_company(payload: &Value) -> Option<&Value> {
    payload
        .get("data")
        .and_then(|data| data.get("userCompany"))
        .or_else(|| payload.get("userCompany"))
        .filter(|company| !company.is_null())
}

#[async_trait]
impl CompanyFieldProvider for GraphqlCompanyFieldProvider {
    fn name(&self) -> &'static str {
        "graphql"
    }

    async fn fields_for(
        &self,
        user_id: &UserId,
    ) -> Result<Option<CompanyPricingFields>, CompanyLookupError> {
        let Ok(numeric_id) = user_id.as_str().trim().parse::<i64>() else {
            tracing::debug!(%user_id, "User id is not numeric, skipping company lookup");
            return Ok(None);
        };

        let request = GraphqlRequest {
            query: USER_COMPANY_QUERY,
            variables: UserCompanyVariables { user_id: numeric_id },
        };
        let payload = self
            .client
            .post_json(&self.endpoint, &request, self.token.as_deref())
            .await
            .map_err(CompanyLookupError::from)?;

        let Some(company) = user_company(&payload) else {
            return Ok(None);
        };
        let company: UserCompany =
            serde_json::from_value(company.clone()).map_err(|e| CompanyLookupError::Decode {
                message: e.to_string(),
            })?;

        Ok(Some(extract_company_fields(&company.extra_fields)))
    }
}
