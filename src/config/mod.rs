//! Configuration types for the Shopify GraphQL proxy.
//!
//! This module resolves the proxy's immutable configuration once at startup.
//! The resolved [`ProxyConfig`] is then passed explicitly to every operation;
//! nothing downstream reads the environment.
//!
//! # Overview
//!
//! - [`ProxyConfig`]: shop domain, access token, API version, required scopes
//! - [`ProxyConfigBuilder`]: programmatic construction with validation
//! - [`Environment`]: the source configuration is resolved from
//! - [`ShopDomain`], [`AccessToken`], [`SharedSecret`], [`HostUrl`]: validated newtypes
//! - [`ApiVersion`]: the Admin API version to target
//!
//! # Example
//!
//! ```rust
//! use shopify_graphql_proxy::config::{MapEnvironment, ProxyConfig};
//!
//! let env = MapEnvironment::from([
//!     ("SHOPIFY_SHOP_DOMAIN", "demo.myshop.test"),
//!     ("SHOPIFY_ACCESS_TOKEN", "shpat_123"),
//!     ("SHOPIFY_REQUIRED_SCOPES", "read_orders,read_products"),
//! ]);
//!
//! let config = ProxyConfig::resolve(&env).unwrap();
//! assert_eq!(config.shop().as_ref(), "demo.myshop.test");
//! assert_eq!(config.required_scopes().as_slice(), ["read_orders", "read_products"]);
//! ```

pub mod env;
mod newtypes;
mod version;

pub use env::{Environment, MapEnvironment, SystemEnvironment};
pub use newtypes::{AccessToken, HostUrl, SharedSecret, ShopDomain};
pub use version::ApiVersion;

use crate::auth::RequiredScopes;
use crate::error::ConfigError;

/// Resolved configuration for talking to one shop.
///
/// # Thread Safety
///
/// `ProxyConfig` is `Clone`, `Send`, and `Sync`; the HTTP adapter shares one
/// instance read-only across all requests.
#[derive(Clone, Debug)]
pub struct ProxyConfig {
    shop: ShopDomain,
    access_token: AccessToken,
    api_version: ApiVersion,
    required_scopes: RequiredScopes,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
}

impl ProxyConfig {
    /// Creates a new builder for constructing a `ProxyConfig`.
    #[must_use]
    pub fn builder() -> ProxyConfigBuilder {
        ProxyConfigBuilder::new()
    }

    /// Resolves the configuration from `source`.
    ///
    /// Blank values are treated as unset. Optional values fall back to their
    /// defaults: the latest API version and [`RequiredScopes::DEFAULT`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingConfiguration`] naming the environment
    /// variable when the shop domain or access token is absent,
    /// [`ConfigError::EmptyRequiredScopes`] when the scope list is only
    /// separators, or one of the `Invalid*` variants when a value cannot be
    /// parsed.
    pub fn resolve(source: &dyn Environment) -> Result<Self, ConfigError> {
        let shop = source
            .get_non_empty(env::SHOPIFY_SHOP_DOMAIN)
            .ok_or(ConfigError::MissingConfiguration {
                field: env::SHOPIFY_SHOP_DOMAIN,
            })?;
        let access_token = source
            .get_non_empty(env::SHOPIFY_ACCESS_TOKEN)
            .ok_or(ConfigError::MissingConfiguration {
                field: env::SHOPIFY_ACCESS_TOKEN,
            })?;

        let mut builder = Self::builder()
            .shop(ShopDomain::new(shop)?)
            .access_token(AccessToken::new(access_token)?);

        if let Some(version) = source.get_non_empty(env::SHOPIFY_API_VERSION) {
            builder = builder.api_version(version.parse()?);
        }
        if let Some(value) = source.get_non_empty(env::SHOPIFY_REQUIRED_SCOPES) {
            let scopes: RequiredScopes = value.parse().unwrap_or_default();
            if scopes.is_empty() {
                return Err(ConfigError::EmptyRequiredScopes { value });
            }
            builder = builder.required_scopes(scopes);
        }
        if let Some(host) = source.get_non_empty(env::SHOPIFY_API_HOST) {
            builder = builder.api_host(HostUrl::new(host)?);
        }
        if let Some(prefix) = source.get_non_empty(env::SHOPIFY_USER_AGENT_PREFIX) {
            builder = builder.user_agent_prefix(prefix);
        }

        let config = builder.build()?;

        if config.api_version.is_deprecated() {
            tracing::warn!(
                "API version {} is outside the supported window (oldest supported: {})",
                config.api_version,
                ApiVersion::minimum_supported()
            );
        }

        Ok(config)
    }

    /// Returns the shop domain.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the scopes that must be granted before a query is forwarded.
    #[must_use]
    pub const fn required_scopes(&self) -> &RequiredScopes {
        &self.required_scopes
    }

    /// Returns the base URL override, if configured.
    #[must_use]
    pub const fn api_host(&self) -> Option<&HostUrl> {
        self.api_host.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ProxyConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ProxyConfig>();
};

/// Builder for constructing [`ProxyConfig`] instances.
///
/// Required fields are `shop` and `access_token`.
///
/// # Defaults
///
/// - `api_version`: [`ApiVersion::latest`]
/// - `required_scopes`: [`RequiredScopes::DEFAULT`]
/// - `api_host`: `None`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ProxyConfigBuilder {
    shop: Option<ShopDomain>,
    access_token: Option<AccessToken>,
    api_version: Option<ApiVersion>,
    required_scopes: Option<RequiredScopes>,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
}

impl ProxyConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shop domain (required).
    #[must_use]
    pub fn shop(mut self, shop: ShopDomain) -> Self {
        self.shop = Some(shop);
        self
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the required scopes.
    #[must_use]
    pub fn required_scopes(mut self, scopes: RequiredScopes) -> Self {
        self.required_scopes = Some(scopes);
        self
    }

    /// Routes platform calls to `host` instead of `https://<shop>`.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Sets the user agent prefix for outbound requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ProxyConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingConfiguration`] if `shop` or
    /// `access_token` is not set.
    pub fn build(self) -> Result<ProxyConfig, ConfigError> {
        let shop = self.shop.ok_or(ConfigError::MissingConfiguration {
            field: env::SHOPIFY_SHOP_DOMAIN,
        })?;
        let access_token = self
            .access_token
            .ok_or(ConfigError::MissingConfiguration {
                field: env::SHOPIFY_ACCESS_TOKEN,
            })?;

        let required_scopes = self
            .required_scopes
            .unwrap_or_else(|| RequiredScopes::DEFAULT.parse().unwrap_or_default());

        Ok(ProxyConfig {
            shop,
            access_token,
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            required_scopes,
            api_host: self.api_host,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_env() -> MapEnvironment {
        MapEnvironment::from([
            (env::SHOPIFY_SHOP_DOMAIN, "demo.myshop.test"),
            (env::SHOPIFY_ACCESS_TOKEN, "shpat_test"),
        ])
    }

    #[test]
    fn test_builder_requires_shop() {
        let result = ProxyConfigBuilder::new()
            .access_token(AccessToken::new("token").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingConfiguration {
                field: "SHOPIFY_SHOP_DOMAIN"
            })
        ));
    }

    #[test]
    fn test_builder_requires_access_token() {
        let result = ProxyConfigBuilder::new()
            .shop(ShopDomain::new("my-store").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingConfiguration {
                field: "SHOPIFY_ACCESS_TOKEN"
            })
        ));
    }

    #[test]
    fn test_builder_provides_defaults() {
        let config = ProxyConfig::builder()
            .shop(ShopDomain::new("my-store").unwrap())
            .access_token(AccessToken::new("token").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.api_version(), &ApiVersion::latest());
        assert_eq!(
            config.required_scopes().as_slice(),
            ["read_products", "read_orders"]
        );
        assert!(config.api_host().is_none());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_resolve_reads_all_values() {
        let mut env = base_env();
        env.set(env::SHOPIFY_API_VERSION, "2025-10");
        env.set(env::SHOPIFY_REQUIRED_SCOPES, "read_orders, read_products");
        env.set(env::SHOPIFY_API_HOST, "http://localhost:4000");
        env.set(env::SHOPIFY_USER_AGENT_PREFIX, "workflow/2");

        let config = ProxyConfig::resolve(&env).unwrap();

        assert_eq!(config.shop().as_ref(), "demo.myshop.test");
        assert_eq!(config.access_token().as_ref(), "shpat_test");
        assert_eq!(config.api_version(), &ApiVersion::V2025_10);
        assert_eq!(
            config.required_scopes().as_slice(),
            ["read_orders", "read_products"]
        );
        assert_eq!(config.api_host().unwrap().origin(), "http://localhost:4000");
        assert_eq!(config.user_agent_prefix(), Some("workflow/2"));
    }

    #[test]
    fn test_resolve_fails_on_missing_shop() {
        let env = MapEnvironment::from([(env::SHOPIFY_ACCESS_TOKEN, "shpat_test")]);
        let error = ProxyConfig::resolve(&env).unwrap_err();
        assert_eq!(
            error,
            ConfigError::MissingConfiguration {
                field: "SHOPIFY_SHOP_DOMAIN"
            }
        );
    }

    #[test]
    fn test_resolve_treats_blank_token_as_missing() {
        let mut env = base_env();
        env.set(env::SHOPIFY_ACCESS_TOKEN, "   ");
        let error = ProxyConfig::resolve(&env).unwrap_err();
        assert_eq!(
            error,
            ConfigError::MissingConfiguration {
                field: "SHOPIFY_ACCESS_TOKEN"
            }
        );
    }

    #[test]
    fn test_resolve_uses_defaults_for_blank_optionals() {
        let mut env = base_env();
        env.set(env::SHOPIFY_API_VERSION, "");
        env.set(env::SHOPIFY_REQUIRED_SCOPES, "  ");

        let config = ProxyConfig::resolve(&env).unwrap();
        assert_eq!(config.api_version(), &ApiVersion::latest());
        assert_eq!(
            config.required_scopes().as_slice(),
            ["read_products", "read_orders"]
        );
    }

    #[test]
    fn test_resolve_rejects_separator_only_scopes() {
        let mut env = base_env();
        env.set(env::SHOPIFY_REQUIRED_SCOPES, ",");
        assert!(matches!(
            ProxyConfig::resolve(&env),
            Err(ConfigError::EmptyRequiredScopes { .. })
        ));
    }

    #[test]
    fn test_resolve_rejects_invalid_version() {
        let mut env = base_env();
        env.set(env::SHOPIFY_API_VERSION, "latest");
        assert!(matches!(
            ProxyConfig::resolve(&env),
            Err(ConfigError::InvalidApiVersion { .. })
        ));
    }

    #[test]
    fn test_config_debug_does_not_leak_token() {
        let config = ProxyConfig::resolve(&base_env()).unwrap();
        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("ProxyConfig"));
        assert!(!debug_str.contains("shpat_test"));
    }
}
