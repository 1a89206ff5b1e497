//! # Shopify GraphQL Proxy
//!
//! A pass-through proxy for the Shopify Admin GraphQL API that checks the
//! configured access token's scopes before forwarding any query.
//!
//! ## Overview
//!
//! This crate provides:
//! - Configuration resolved once from the environment into [`ProxyConfig`]
//! - Validated newtypes for credentials and domain values
//! - A [`ScopeValidator`] that reports which required scopes are not granted
//! - A [`GraphqlClient`] that forwards opaque query documents
//! - A [`Proxy`] that runs the scope check and then the query, in that order
//! - A one-shot command-line adapter ([`cli`]) and an HTTP adapter ([`server`])
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_graphql_proxy::{AccessToken, ProxyConfig, ShopDomain};
//!
//! let config = ProxyConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .access_token(AccessToken::new("shpat_example").unwrap())
//!     .required_scopes("read_products,read_orders".parse().unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.shop().as_ref(), "my-store.myshopify.com");
//! ```
//!
//! ## Running a Query
//!
//! ```rust,ignore
//! use shopify_graphql_proxy::config::SystemEnvironment;
//! use shopify_graphql_proxy::{GraphqlRequest, Proxy, ProxyConfig};
//!
//! let config = ProxyConfig::resolve(&SystemEnvironment)?;
//! let proxy = Proxy::new(config)?;
//!
//! let data = proxy.run(&GraphqlRequest::new("query { shop { name } }")).await?;
//! println!("{}", data["shop"]["name"]);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is resolved once and passed explicitly
//! - **Fail-fast validation**: Newtypes validate on construction
//! - **Scopes before queries**: A missing scope stops the call before any query is sent
//! - **No retries**: Every upstream failure surfaces immediately
//! - **Secrets stay secret**: Tokens are masked in debug output and never logged

pub mod auth;
pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod logging;
pub mod proxy;
pub mod server;

// Re-export public types at crate root for convenience
pub use auth::{GrantedScopes, RequiredScopes, ScopeValidator};
pub use config::{
    AccessToken, ApiVersion, HostUrl, ProxyConfig, ProxyConfigBuilder, SharedSecret, ShopDomain,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    DataType, GraphqlClient, GraphqlError, HttpClient, HttpError, HttpMethod, HttpRequest,
    HttpRequestBuilder, HttpResponse, HttpResponseError, InvalidHttpRequestError,
};

pub use proxy::{GraphqlRequest, Proxy, ProxyError};
