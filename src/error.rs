//! Configuration error types for the Shopify GraphQL proxy.
//!
//! This module contains the error type returned while resolving and
//! validating proxy configuration.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable
//! and name the environment variable involved where there is one.
//!
//! # Example
//!
//! ```rust
//! use shopify_graphql_proxy::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while resolving proxy configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required configuration value is absent or empty.
    #[error("Missing configuration: '{field}' must be set to a non-empty value.")]
    MissingConfiguration {
        /// The name of the missing field (usually the environment variable).
        field: &'static str,
    },

    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid Shopify Admin API access token.")]
    EmptyAccessToken,

    /// Shared secret cannot be empty.
    #[error("Shared secret cannot be empty. Unset it to disable request authentication.")]
    EmptySharedSecret,

    /// The required scope list names no scopes.
    #[error("Required scopes '{value}' name no scopes. List them comma-separated (e.g., 'read_orders,read_products') or unset it to use the default.")]
    EmptyRequiredScopes {
        /// The value that was provided.
        value: String,
    },

    /// Shop domain is invalid.
    #[error("Invalid shop domain '{domain}'. Expected format: 'shop-name', 'shop-name.myshopify.com' or a custom host name.")]
    InvalidShopDomain {
        /// The invalid domain that was provided.
        domain: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM' (e.g., '2025-10') or 'unstable'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://proxy.example.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Server port is invalid.
    #[error("Invalid port '{value}'. Expected a number between 0 and 65535.")]
    InvalidPort {
        /// The invalid port value that was provided.
        value: String,
    },

    /// A JSON-valued configuration entry could not be used.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidJson {
        /// The name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
