//! Access scope handling.
//!
//! This module provides the types used to check that the configured access
//! token holds every scope the proxy requires.
//!
//! # Overview
//!
//! - [`RequiredScopes`]: the ordered list of scopes that must be granted
//! - [`GrantedScopes`]: the set of scopes the platform reports for the token
//! - [`ScopeValidator`]: fetches granted scopes and computes the missing ones
//!
//! # Example
//!
//! ```rust
//! use shopify_graphql_proxy::auth::{GrantedScopes, RequiredScopes};
//!
//! let required: RequiredScopes = "read_orders,read_products".parse().unwrap();
//! let granted: GrantedScopes = ["read_products"].into_iter().collect();
//!
//! assert_eq!(required.missing_from(&granted), ["read_orders"]);
//! ```

pub mod access_scopes;
mod scopes;

pub use access_scopes::{AccessScope, ScopeValidator};
pub use scopes::{GrantedScopes, RequiredScopes};
