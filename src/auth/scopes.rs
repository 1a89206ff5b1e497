//! Access scope sets.
//!
//! This module provides [`RequiredScopes`], the ordered list of scopes the
//! proxy insists on, and [`GrantedScopes`], the set the platform reports for
//! the configured access token.

use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The scopes an access token must hold before any query is forwarded.
///
/// Parsing splits on commas, trims whitespace, discards empty entries and
/// drops duplicates while keeping the first occurrence, so the order of the
/// configured list is preserved for reporting.
///
/// # Example
///
/// ```rust
/// use shopify_graphql_proxy::auth::{GrantedScopes, RequiredScopes};
///
/// let required: RequiredScopes = "read_orders, read_products,,read_orders".parse().unwrap();
/// assert_eq!(required.as_slice(), ["read_orders", "read_products"]);
///
/// let granted = GrantedScopes::from(vec!["read_products".to_string()]);
/// assert_eq!(required.missing_from(&granted), vec!["read_orders".to_string()]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RequiredScopes {
    scopes: Vec<String>,
}

impl RequiredScopes {
    /// Scopes required when `SHOPIFY_REQUIRED_SCOPES` is not set.
    pub const DEFAULT: &'static str = "read_products,read_orders";

    /// Creates an empty scope list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no scopes are required.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Returns the scopes in configured order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.scopes
    }

    /// Returns the required scopes that are not in `granted`.
    ///
    /// The result keeps the configured order. An empty result means every
    /// required scope is granted.
    #[must_use]
    pub fn missing_from(&self, granted: &GrantedScopes) -> Vec<String> {
        self.scopes
            .iter()
            .filter(|scope| !granted.contains(scope))
            .cloned()
            .collect()
    }

    fn push(&mut self, scope: &str) {
        let scope = scope.trim();
        if !scope.is_empty() && !self.scopes.iter().any(|s| s == scope) {
            self.scopes.push(scope.to_string());
        }
    }
}

impl FromStr for RequiredScopes {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut required = Self::new();
        for scope in s.split(',') {
            required.push(scope);
        }
        Ok(required)
    }
}

impl<S: AsRef<str>> FromIterator<S> for RequiredScopes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut required = Self::new();
        for scope in iter {
            required.push(scope.as_ref());
        }
        required
    }
}

impl fmt::Display for RequiredScopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.scopes.join(","))
    }
}

impl Serialize for RequiredScopes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.scopes.serialize(serializer)
    }
}

/// The scopes the platform reports as granted to the current access token.
///
/// Entries are trimmed and empty entries are discarded. No implied scopes are
/// added: a granted `write_orders` does not satisfy a required `read_orders`
/// unless the platform also lists `read_orders`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct GrantedScopes {
    scopes: HashSet<String>,
}

impl GrantedScopes {
    /// Returns `true` if `scope` was granted.
    #[must_use]
    pub fn contains(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }

    /// Returns the number of granted scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Returns `true` if nothing was granted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

impl From<Vec<String>> for GrantedScopes {
    fn from(scopes: Vec<String>) -> Self {
        scopes.into_iter().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for GrantedScopes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let scopes = iter
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self { scopes }
    }
}
