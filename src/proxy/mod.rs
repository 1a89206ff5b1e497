//! Validate-and-query orchestration.
//!
//! [`Proxy`] holds the resolved configuration together with the scope
//! validator and the GraphQL forwarder, and runs them in a fixed order:
//! the scope check always comes first, and a missing scope stops the call
//! before any query traffic is sent.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_graphql_proxy::config::{ProxyConfig, SystemEnvironment};
//! use shopify_graphql_proxy::proxy::{GraphqlRequest, Proxy};
//!
//! let config = ProxyConfig::resolve(&SystemEnvironment)?;
//! let proxy = Proxy::new(config)?;
//!
//! let data = proxy.run(&GraphqlRequest::new("query { shop { name } }")).await?;
//! ```

mod errors;

pub use errors::ProxyError;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::ScopeValidator;
use crate::clients::GraphqlClient;
use crate::config::ProxyConfig;

/// A GraphQL request as accepted by both adapters.
///
/// The document is opaque and forwarded verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphqlRequest {
    /// The GraphQL document.
    pub query: String,
    /// Variables for the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
    /// The operation to run when the document defines several.
    #[serde(
        default,
        rename = "operationName",
        skip_serializing_if = "Option::is_none"
    )]
    pub operation_name: Option<String>,
}

impl GraphqlRequest {
    /// Creates a request for `query` with no variables.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
            operation_name: None,
        }
    }

    /// Sets the variables for this request.
    #[must_use]
    pub fn with_variables(mut self, variables: Value) -> Self {
        self.variables = Some(variables);
        self
    }

    /// Sets the operation name for this request.
    #[must_use]
    pub fn with_operation_name(mut self, operation_name: impl Into<String>) -> Self {
        self.operation_name = Some(operation_name.into());
        self
    }
}

/// The scope check and the query forwarder bound to one configuration.
///
/// A `Proxy` is built once per process and shared read-only across requests.
/// Both outbound clients share one connection pool.
#[derive(Debug, Clone)]
pub struct Proxy {
    config: ProxyConfig,
    validator: ScopeValidator,
    forwarder: GraphqlClient,
}

// Verify Proxy is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Proxy>();
};

impl Proxy {
    /// Creates a proxy for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::UpstreamUnavailable`] if the HTTP client cannot
    /// be built.
    pub fn new(config: ProxyConfig) -> Result<Self, ProxyError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(|e| ProxyError::UpstreamUnavailable(e.into()))?;

        Ok(Self {
            validator: ScopeValidator::with_client(client.clone(), &config),
            forwarder: GraphqlClient::with_client(client, &config),
            config,
        })
    }

    /// Returns the configuration this proxy was built from.
    #[must_use]
    pub const fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Checks the required scopes, then forwards `request`.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::UpstreamUnavailable`] if either platform call fails
    /// - [`ProxyError::Authorization`] if a required scope is not granted;
    ///   the query is not sent in that case
    /// - [`ProxyError::GraphqlExecution`] if the response carries errors
    pub async fn run(&self, request: &GraphqlRequest) -> Result<Value, ProxyError> {
        let required = self.config.required_scopes();

        tracing::info!(shop = %self.config.shop(), "Validating access scopes");
        let missing = self.validator.missing_scopes(required).await?;
        if !missing.is_empty() {
            tracing::warn!(missing = %missing.join(","), "Access token is missing required scopes");
            return Err(ProxyError::Authorization { missing });
        }

        tracing::info!(
            api_version = %self.forwarder.api_version(),
            "Forwarding GraphQL query"
        );
        let data = self
            .forwarder
            .execute(
                &request.query,
                request.variables.clone(),
                request.operation_name.as_deref(),
            )
            .await?;

        Ok(data)
    }
}
