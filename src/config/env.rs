//! Configuration sources.
//!
//! Configuration is read through the [`Environment`] trait so that the
//! resolver can be driven by the process environment in the binaries and by
//! an in-memory map in tests.

use std::collections::HashMap;

pub const SHOPIFY_SHOP_DOMAIN: &str = "SHOPIFY_SHOP_DOMAIN";
pub const SHOPIFY_ACCESS_TOKEN: &str = "SHOPIFY_ACCESS_TOKEN";
pub const SHOPIFY_API_VERSION: &str = "SHOPIFY_API_VERSION";
pub const SHOPIFY_REQUIRED_SCOPES: &str = "SHOPIFY_REQUIRED_SCOPES";
pub const SHOPIFY_API_HOST: &str = "SHOPIFY_API_HOST";
pub const SHOPIFY_USER_AGENT_PREFIX: &str = "SHOPIFY_USER_AGENT_PREFIX";
pub const SHOPIFY_GRAPHQL_QUERY: &str = "SHOPIFY_GRAPHQL_QUERY";
pub const SHOPIFY_GRAPHQL_VARIABLES: &str = "SHOPIFY_GRAPHQL_VARIABLES";
pub const HOST: &str = "HOST";
pub const PORT: &str = "PORT";
pub const PROXY_SHARED_SECRET: &str = "PROXY_SHARED_SECRET";
pub const SHOPIFY_PROXY_LOG: &str = "SHOPIFY_PROXY_LOG";

/// A source of configuration values.
pub trait Environment: Send + Sync {
    /// Returns the raw value for `key`, if set.
    fn get(&self, key: &str) -> Option<String>;

    /// Returns the trimmed value for `key`, treating blank values as unset.
    fn get_non_empty(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

/// Reads configuration from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// An in-memory configuration source.
///
/// ```rust
/// use shopify_graphql_proxy::config::{Environment, MapEnvironment};
///
/// let env = MapEnvironment::from([("SHOPIFY_SHOP_DOMAIN", "  my-store  ")]);
/// assert_eq!(env.get_non_empty("SHOPIFY_SHOP_DOMAIN").as_deref(), Some("my-store"));
/// assert_eq!(env.get("PORT"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    values: HashMap<String, String>,
}

impl MapEnvironment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

impl Environment for MapEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl<const N: usize> From<[(&str, &str); N]> for MapEnvironment {
    fn from(values: [(&str, &str); N]) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}
