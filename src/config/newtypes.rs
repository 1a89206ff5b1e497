//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use sha2::{Digest, Sha256};
use std::fmt;
use subtle::ConstantTimeEq;

/// A validated Shopify Admin API access token.
///
/// This newtype ensures the token is non-empty and masks its value
/// in debug output to prevent accidental exposure in logs.
///
/// # Example
///
/// ```rust
/// use shopify_graphql_proxy::AccessToken;
///
/// let token = AccessToken::new("shpat_123").unwrap();
/// assert_eq!(token.as_ref(), "shpat_123");
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// Surrounding whitespace is removed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty after trimming.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token: String = token.into();
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token.to_string()))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A static secret that callers must present to the HTTP proxy endpoint.
///
/// The secret is masked in debug output and is only ever compared through
/// [`SharedSecret::verify`], which hashes both sides and compares the digests
/// in constant time.
///
/// # Example
///
/// ```rust
/// use shopify_graphql_proxy::SharedSecret;
///
/// let secret = SharedSecret::new("s3cret").unwrap();
/// assert!(secret.verify("s3cret"));
/// assert!(!secret.verify("guess"));
/// assert_eq!(format!("{:?}", secret), "SharedSecret(*****)");
/// ```
#[derive(Clone)]
pub struct SharedSecret {
    digest: [u8; 32],
}

impl SharedSecret {
    /// Creates a new shared secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySharedSecret`] if the secret is empty after trimming.
    pub fn new(secret: impl AsRef<str>) -> Result<Self, ConfigError> {
        let secret = secret.as_ref().trim();
        if secret.is_empty() {
            return Err(ConfigError::EmptySharedSecret);
        }
        Ok(Self {
            digest: Self::digest(secret),
        })
    }

    /// Returns `true` if `candidate` matches the configured secret.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        let candidate = Self::digest(candidate);
        self.digest.ct_eq(&candidate).into()
    }

    fn digest(value: &str) -> [u8; 32] {
        Sha256::digest(value.as_bytes()).into()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(*****)")
    }
}

/// A validated shop domain.
///
/// # Accepted Formats
///
/// - `shop-name` - normalized to `shop-name.myshopify.com`
/// - `shop-name.myshopify.com` - used as-is
/// - any other host name (e.g. a custom domain such as `demo.myshop.test`)
///
/// A leading `http://` or `https://` and trailing slashes are stripped, and the
/// value is lowercased.
///
/// # Example
///
/// ```rust
/// use shopify_graphql_proxy::ShopDomain;
///
/// let domain = ShopDomain::new("my-store").unwrap();
/// assert_eq!(domain.as_ref(), "my-store.myshopify.com");
///
/// let domain = ShopDomain::new("https://Demo.MyShop.test/").unwrap();
/// assert_eq!(domain.as_ref(), "demo.myshop.test");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopDomain(String);

impl ShopDomain {
    const SUFFIX: &'static str = ".myshopify.com";

    /// Creates a new validated shop domain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShopDomain`] if the domain is empty or
    /// contains characters that cannot appear in a host name.
    pub fn new(domain: impl Into<String>) -> Result<Self, ConfigError> {
        let domain: String = domain.into();
        let domain = domain.trim().to_lowercase();
        let stripped = domain
            .strip_prefix("https://")
            .or_else(|| domain.strip_prefix("http://"))
            .unwrap_or(&domain)
            .trim_end_matches('/');

        if !Self::is_valid_host(stripped) {
            return Err(ConfigError::InvalidShopDomain { domain });
        }

        if stripped.contains('.') {
            Ok(Self(stripped.to_string()))
        } else {
            Ok(Self(format!("{stripped}{}", Self::SUFFIX)))
        }
    }

    fn is_valid_host(host: &str) -> bool {
        if host.is_empty() || host.starts_with(['-', '.']) || host.ends_with(['-', '.']) {
            return false;
        }

        host.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    }
}

impl AsRef<str> for ShopDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated base URL used in place of `https://<shop domain>`.
///
/// This is how the proxy is pointed at a local stand-in for the platform, or
/// at an egress proxy. Only the scheme, host and port are used.
///
/// # Example
///
/// ```rust
/// use shopify_graphql_proxy::HostUrl;
///
/// let url = HostUrl::new("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(url.origin(), "http://127.0.0.1:8080");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl {
    url: String,
    authority_end: usize,
}

impl HostUrl {
    /// Creates a new validated host URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url: String = url.into();
        let url = url.trim().to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidHostUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidHostUrl { url });
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);
        let authority_end = remainder
            .find(['/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidHostUrl { url });
        }

        Ok(Self { url, authority_end })
    }

    /// Returns `scheme://host[:port]`, without any path.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.url[..self.authority_end]
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}
