//! HTTP client types for platform communication.
//!
//! This module provides the outbound layer used by the scope validator and
//! the query forwarder. It handles request construction, access token
//! injection and response parsing.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST)
//! - [`DataType`]: Content types for request bodies
//! - [`graphql::GraphqlClient`]: The Admin GraphQL forwarder
//! - [`graphql::GraphqlError`]: GraphQL-specific error types
//!
//! # Retry Behavior
//!
//! Every request is attempted exactly once. A non-2xx status surfaces
//! immediately as [`HttpError::Response`].

mod errors;
pub mod graphql;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, ACCESS_TOKEN_HEADER, PROXY_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;

pub use graphql::{GraphqlClient, GraphqlError};
