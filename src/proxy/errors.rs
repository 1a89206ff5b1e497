//! The error taxonomy surfaced by both adapters.

use thiserror::Error;

use crate::clients::{GraphqlError, HttpError};
use crate::error::ConfigError;

/// Every failure a proxy call can end in.
///
/// None of these are retried. The CLI turns them into a non-zero exit code,
/// the server into an `{errors: [{message}]}` body with
/// [`status_code`](Self::status_code).
///
/// # Example
///
/// ```rust
/// use shopify_graphql_proxy::proxy::ProxyError;
///
/// let error = ProxyError::Authorization {
///     missing: vec!["read_orders".to_string()],
/// };
/// assert!(error.to_string().contains("read_orders"));
/// assert_eq!(error.status_code(), 500);
/// ```
#[derive(Debug, Error)]
pub enum ProxyError {
    /// A required input is absent or invalid.
    #[error(transparent)]
    MissingConfiguration(#[from] ConfigError),

    /// One or more required scopes are not granted to the access token.
    #[error(
        "Missing required access scopes: {}. Reinstall the app or extend its access grant to include them.",
        .missing.join(", ")
    )]
    Authorization {
        /// The missing scopes, in configured order.
        missing: Vec<String>,
    },

    /// A platform call failed or returned a non-success status.
    #[error("Shopify API request failed: {0}")]
    UpstreamUnavailable(#[from] HttpError),

    /// The platform reported query-level errors.
    #[error("GraphQL execution failed: {errors}")]
    GraphqlExecution {
        /// The serialized `errors` array, verbatim.
        errors: String,
    },

    /// The inbound request body is not usable.
    #[error("Malformed request: {reason}")]
    MalformedRequest {
        /// What is wrong with the request.
        reason: String,
    },
}

impl ProxyError {
    /// Creates a [`ProxyError::MalformedRequest`].
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRequest {
            reason: reason.into(),
        }
    }

    /// Returns the HTTP status the server answers with for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::MalformedRequest { .. } => 400,
            Self::MissingConfiguration(_)
            | Self::Authorization { .. }
            | Self::UpstreamUnavailable(_)
            | Self::GraphqlExecution { .. } => 500,
        }
    }
}

impl From<GraphqlError> for ProxyError {
    fn from(error: GraphqlError) -> Self {
        match error {
            GraphqlError::Http(e) => Self::UpstreamUnavailable(e),
            GraphqlError::Execution { errors } => Self::GraphqlExecution { errors },
        }
    }
}
