//! GraphQL-specific error types.
//!
//! - [`GraphqlError::Http`]: Wraps underlying HTTP errors
//! - [`GraphqlError::Execution`]: The platform accepted the call but reported
//!   query-level errors in the response body
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_graphql_proxy::clients::graphql::{GraphqlClient, GraphqlError};
//!
//! match client.execute("query { shop { name } }", None, None).await {
//!     Ok(data) => println!("Data: {data}"),
//!     Err(GraphqlError::Execution { errors }) => println!("GraphQL errors: {errors}"),
//!     Err(GraphqlError::Http(e)) => println!("HTTP error: {e}"),
//! }
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for GraphQL API operations.
///
/// A response whose `errors` array is non-empty is always an error, even when
/// the same response also carries `data`.
///
/// # Example
///
/// ```rust
/// use shopify_graphql_proxy::clients::graphql::GraphqlError;
/// use shopify_graphql_proxy::clients::{HttpError, HttpResponseError};
///
/// let http_error = HttpError::Response(HttpResponseError {
///     code: 401,
///     message: r#"{"error":"Unauthorized"}"#.to_string(),
///     error_reference: None,
/// });
/// let graphql_error: GraphqlError = http_error.into();
/// assert!(graphql_error.to_string().contains("Unauthorized"));
/// ```
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response carried a non-empty `errors` array.
    #[error("GraphQL execution failed: {errors}")]
    Execution {
        /// The serialized `errors` array, verbatim.
        errors: String,
    },
}
