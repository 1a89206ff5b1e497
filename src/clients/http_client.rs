//! HTTP client for platform communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the Shopify Admin API.

use std::collections::HashMap;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::ProxyConfig;

/// Crate version from Cargo.toml.
pub const PROXY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the Admin API access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// HTTP client for making requests to the Shopify Admin API.
///
/// The client handles:
/// - Base URI construction from the shop domain or the `SHOPIFY_API_HOST` override
/// - Default headers including User-Agent and access token
/// - Response parsing and upstream error reporting
///
/// Requests are attempted exactly once; there is no retry policy.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_graphql_proxy::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let client = HttpClient::new("/admin/oauth", &config)?;
/// let request = HttpRequest::builder(HttpMethod::Get, "access_scopes.json").build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_uri: String,
    base_path: String,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client rooted at `base_path`.
    ///
    /// # Arguments
    ///
    /// * `base_path` - The base path for requests (e.g., "/admin/api/2025-10")
    /// * `config` - The resolved proxy configuration
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(base_path: impl Into<String>, config: &ProxyConfig) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;
        Ok(Self::with_client(client, base_path, config))
    }

    /// Creates a new HTTP client that shares an existing connection pool.
    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        base_path: impl Into<String>,
        config: &ProxyConfig,
    ) -> Self {
        let base_path = base_path.into();

        let api_host = config.api_host();
        let base_uri = api_host.map_or_else(
            || format!("https://{}", config.shop()),
            |host| host.origin().to_string(),
        );

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Shopify GraphQL Proxy v{PROXY_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        // Requests routed through an api host override still address the shop
        if api_host.is_some() {
            default_headers.insert("Host".to_string(), config.shop().as_ref().to_string());
        }

        default_headers.insert(
            ACCESS_TOKEN_HEADER.to_string(),
            config.access_token().as_ref().to_string(),
        );

        Self {
            client,
            base_uri,
            base_path,
            default_headers,
        }
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the full URL for a request path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}/{}", self.base_uri, self.base_path, path)
    }

    /// Sends an HTTP request to the platform.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`, carrying the raw body text)
    /// - A 2xx response body is not JSON (`InvalidBody`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.url_for(&request.path);

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(body_type) = &request.body_type {
            req_builder = req_builder.header("Content-Type", body_type.as_content_type());
        }
        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!(method = %request.http_method, %url, "Sending request to Shopify");

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        let mut response = HttpResponse::new(code, headers, serde_json::Value::Null);

        if !response.is_ok() {
            tracing::debug!(code, path = %request.path, "Shopify returned a non-success status");
            return Err(HttpError::Response(HttpResponseError {
                code,
                message: body_text,
                error_reference: response.request_id().map(ToString::to_string),
            }));
        }

        if !body_text.trim().is_empty() {
            response.body = serde_json::from_str(&body_text)
                .map_err(|_| HttpError::InvalidBody { code, message: body_text })?;
        }

        if let Some(reason) = response.deprecation_reason() {
            tracing::warn!(
                "Deprecated request to Shopify API at {}, received reason: {}",
                request.path,
                reason
            );
        }

        Ok(response)
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
