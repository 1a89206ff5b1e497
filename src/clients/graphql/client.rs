//! GraphQL client implementation for the Shopify Admin API.
//!
//! This module provides the [`GraphqlClient`] type, which forwards opaque
//! query documents to `/admin/api/{version}/graphql.json`.

use serde_json::{Map, Value};

use crate::clients::graphql::GraphqlError;
use crate::clients::{DataType, HttpClient, HttpError, HttpMethod, HttpRequest};
use crate::config::{ApiVersion, ProxyConfig};

/// GraphQL API client for the Shopify Admin API.
///
/// Queries are never parsed or validated locally; the document and its
/// variables are sent verbatim and the response's `data` is returned as-is.
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_graphql_proxy::clients::GraphqlClient;
/// use serde_json::json;
///
/// let client = GraphqlClient::new(&config)?;
///
/// let data = client.execute("query { shop { name } }", None, None).await?;
/// println!("Shop: {}", data["shop"]["name"]);
///
/// let data = client
///     .execute(
///         "query GetProduct($id: ID!) { product(id: $id) { title } }",
///         Some(json!({ "id": "gid://shopify/Product/123" })),
///         None,
///     )
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
    /// The API version being used.
    api_version: ApiVersion,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a new GraphQL client for the configured shop and API version.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be built.
    pub fn new(config: &ProxyConfig) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a new GraphQL client that shares `client`'s connection pool.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &ProxyConfig) -> Self {
        let api_version = config.api_version().clone();
        let base_path = format!("/admin/api/{api_version}");

        Self {
            http_client: HttpClient::with_client(client, base_path, config),
            api_version,
        }
    }

    /// Returns the API version being used by this client.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the full URL of the GraphQL endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        self.http_client.url_for("graphql.json")
    }

    /// Executes a GraphQL document against the Admin API.
    ///
    /// # Arguments
    ///
    /// * `query` - The GraphQL document, forwarded verbatim
    /// * `variables` - Optional variables for the document
    /// * `operation_name` - Optional operation to run when the document has several
    ///
    /// # Returns
    ///
    /// The response's `data` field. A response without `data` and without
    /// errors is returned whole.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Http`] for network errors and non-2xx responses,
    /// and [`GraphqlError::Execution`] when the response carries a non-empty
    /// `errors` array.
    pub async fn execute(
        &self,
        query: &str,
        variables: Option<Value>,
        operation_name: Option<&str>,
    ) -> Result<Value, GraphqlError> {
        let body = Self::request_body(query, variables, operation_name);

        let request = HttpRequest::builder(HttpMethod::Post, "graphql.json")
            .body(body)
            .body_type(DataType::Json)
            .build()
            .map_err(|e| GraphqlError::Http(e.into()))?;

        let response = self.http_client.request(request).await?;
        Self::extract_data(response.body)
    }

    fn request_body(query: &str, variables: Option<Value>, operation_name: Option<&str>) -> Value {
        let mut body = Map::new();
        body.insert("query".to_string(), Value::String(query.to_string()));
        body.insert("variables".to_string(), variables.unwrap_or(Value::Null));
        if let Some(name) = operation_name {
            body.insert("operationName".to_string(), Value::String(name.to_string()));
        }
        Value::Object(body)
    }

    fn extract_data(mut body: Value) -> Result<Value, GraphqlError> {
        if let Some(errors) = body.get("errors") {
            let has_errors = match errors {
                Value::Null => false,
                Value::Array(list) => !list.is_empty(),
                _ => true,
            };
            if has_errors {
                return Err(GraphqlError::Execution {
                    errors: errors.to_string(),
                });
            }
        }

        let data = body.get_mut("data").map(Value::take);
        match data {
            Some(data) => Ok(data),
            None => {
                tracing::warn!("GraphQL response carried neither data nor errors, returning it whole");
                Ok(body)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, ShopDomain};
    use serde_json::json;

    fn create_test_config(version: ApiVersion) -> ProxyConfig {
        ProxyConfig::builder()
            .shop(ShopDomain::new("test-shop").unwrap())
            .access_token(AccessToken::new("test-access-token").unwrap())
            .api_version(version)
            .build()
            .unwrap()
    }

    #[test]
    fn test_graphql_client_uses_configured_version() {
        let client = GraphqlClient::new(&create_test_config(ApiVersion::V2025_10)).unwrap();

        assert_eq!(client.api_version(), &ApiVersion::V2025_10);
        assert_eq!(
            client.endpoint(),
            "https://test-shop.myshopify.com/admin/api/2025-10/graphql.json"
        );
    }

    #[test]
    fn test_request_body_omits_absent_operation_name() {
        let body = GraphqlClient::request_body("query { shop { name } }", None, None);

        assert_eq!(body, json!({"query": "query { shop { name } }", "variables": null}));
    }

    #[test]
    fn test_request_body_carries_variables_and_operation_name() {
        let body = GraphqlClient::request_body(
            "query A { shop { name } } query B { shop { id } }",
            Some(json!({"first": 5})),
            Some("B"),
        );

        assert_eq!(body["variables"], json!({"first": 5}));
        assert_eq!(body["operationName"], "B");
    }

    #[test]
    fn test_extract_data_returns_data_field() {
        let data = GraphqlClient::extract_data(json!({
            "data": {"shop": {"name": "Test Shop"}},
            "extensions": {"cost": {"requestedQueryCost": 1}}
        }))
        .unwrap();

        assert_eq!(data, json!({"shop": {"name": "Test Shop"}}));
    }

    #[test]
    fn test_extract_data_fails_on_errors_even_with_data() {
        let error = GraphqlClient::extract_data(json!({
            "data": {"shop": null},
            "errors": [{"message": "Access denied for shop field."}]
        }))
        .unwrap_err();

        match error {
            GraphqlError::Execution { errors } => {
                assert_eq!(errors, r#"[{"message":"Access denied for shop field."}]"#);
            }
            other => panic!("Expected Execution error, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_data_ignores_empty_or_null_errors() {
        let data =
            GraphqlClient::extract_data(json!({"data": {"ok": true}, "errors": []})).unwrap();
        assert_eq!(data, json!({"ok": true}));

        let data =
            GraphqlClient::extract_data(json!({"data": {"ok": true}, "errors": null})).unwrap();
        assert_eq!(data, json!({"ok": true}));
    }

    #[test]
    fn test_extract_data_falls_back_to_whole_body() {
        let body = json!({"extensions": {"cost": {}}});

        assert_eq!(GraphqlClient::extract_data(body.clone()).unwrap(), body);
    }
}
