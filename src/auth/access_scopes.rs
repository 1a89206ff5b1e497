//! Scope validation against the platform's access scope endpoint.
//!
//! The [`ScopeValidator`] asks Shopify which scopes the configured access
//! token holds and reports which of the required scopes are missing.
//!
//! # Special OAuth Endpoint
//!
//! Access scopes live at `/admin/oauth/access_scopes.json`, outside the
//! versioned `/admin/api/{version}/` prefix:
//!
//! ```json
//! { "access_scopes": [ { "handle": "read_products" }, { "handle": "read_orders" } ] }
//! ```

use serde::Deserialize;

use crate::auth::{GrantedScopes, RequiredScopes};
use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest};
use crate::config::ProxyConfig;

/// Base path of the access scope endpoint.
pub const ACCESS_SCOPES_BASE_PATH: &str = "/admin/oauth";

/// An OAuth access scope associated with an access token.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct AccessScope {
    /// The scope identifier (e.g., "read_products", "write_orders").
    #[serde(default)]
    pub handle: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccessScopesResponse {
    #[serde(default)]
    access_scopes: Vec<AccessScope>,
}

/// Checks the configured access token's granted scopes.
///
/// Every call issues a fresh request; granted scopes are never cached.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_graphql_proxy::auth::ScopeValidator;
///
/// let validator = ScopeValidator::new(&config)?;
/// let missing = validator.missing_scopes(config.required_scopes()).await?;
/// if !missing.is_empty() {
///     eprintln!("Missing scopes: {}", missing.join(", "));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScopeValidator {
    http_client: HttpClient,
}

impl ScopeValidator {
    /// Creates a validator with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be built.
    pub fn new(config: &ProxyConfig) -> Result<Self, HttpError> {
        Ok(Self {
            http_client: HttpClient::new(ACCESS_SCOPES_BASE_PATH, config)?,
        })
    }

    /// Creates a validator that shares `client`'s connection pool.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &ProxyConfig) -> Self {
        Self {
            http_client: HttpClient::with_client(client, ACCESS_SCOPES_BASE_PATH, config),
        }
    }

    /// Fetches the scopes granted to the configured access token.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails, the platform answers with a
    /// non-2xx status, or the body is not a scope list.
    pub async fn granted_scopes(&self) -> Result<GrantedScopes, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, "access_scopes.json").build()?;
        let response = self.http_client.request(request).await?;

        let parsed: AccessScopesResponse = if response.body.is_null() {
            AccessScopesResponse {
                access_scopes: Vec::new(),
            }
        } else {
            serde_json::from_value(response.body.clone()).map_err(|_| HttpError::InvalidBody {
                code: response.code,
                message: response.body.to_string(),
            })?
        };

        Ok(parsed
            .access_scopes
            .into_iter()
            .filter_map(|scope| scope.handle)
            .collect())
    }

    /// Returns the required scopes the access token does not hold.
    ///
    /// The result keeps the order of `required`; an empty result is success.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the granted scopes cannot be fetched.
    pub async fn missing_scopes(
        &self,
        required: &RequiredScopes,
    ) -> Result<Vec<String>, HttpError> {
        let granted = self.granted_scopes().await?;
        let missing = required.missing_from(&granted);

        tracing::debug!(
            granted = granted.len(),
            required = required.as_slice().len(),
            missing = missing.len(),
            "Checked access scopes"
        );

        Ok(missing)
    }
}
