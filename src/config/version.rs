//! Admin API version definitions.
//!
//! This module provides the [`ApiVersion`] enum used to build the versioned
//! Admin GraphQL endpoint path (`/admin/api/{version}/graphql.json`).

use crate::error::ConfigError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Shopify Admin API version.
///
/// Shopify releases new API versions quarterly (January, April, July, October).
/// This enum provides variants for recent stable versions, plus an `Unstable`
/// variant for development and a `Custom` variant for versions this crate
/// does not know about yet.
///
/// # Example
///
/// ```rust
/// use shopify_graphql_proxy::ApiVersion;
///
/// let version: ApiVersion = "2025-10".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2025_10);
/// assert_eq!(version.to_string(), "2025-10");
///
/// let future: ApiVersion = "2027-01".parse().unwrap();
/// assert_eq!(future, ApiVersion::Custom("2027-01".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version 2025-01 (January 2025)
    V2025_01,
    /// API version 2025-04 (April 2025)
    V2025_04,
    /// API version 2025-07 (July 2025)
    V2025_07,
    /// API version 2025-10 (October 2025)
    V2025_10,
    /// API version 2026-01 (January 2026)
    V2026_01,
    /// API version 2026-04 (April 2026)
    V2026_04,
    /// API version 2026-07 (July 2026)
    V2026_07,
    /// Unstable API version for development and testing.
    Unstable,
    /// Custom version string for future or unrecognized versions.
    Custom(String),
}

impl ApiVersion {
    /// Returns the latest stable API version.
    ///
    /// This is the version used when `SHOPIFY_API_VERSION` is not set.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2026_07
    }

    /// Returns the oldest version inside Shopify's twelve month support window.
    #[must_use]
    pub const fn minimum_supported() -> Self {
        Self::V2025_10
    }

    /// Returns `true` if this version is past Shopify's support window.
    ///
    /// `Unstable` is never deprecated. A `Custom` version is compared by its
    /// release date like any other.
    ///
    /// ```rust
    /// use shopify_graphql_proxy::ApiVersion;
    ///
    /// assert!(ApiVersion::V2025_01.is_deprecated());
    /// assert!(!ApiVersion::latest().is_deprecated());
    ///
    /// let old: ApiVersion = "2024-10".parse().unwrap();
    /// assert!(old.is_deprecated());
    /// ```
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        !matches!(self, Self::Unstable) && *self < Self::minimum_supported()
    }

    /// Returns the version string used in endpoint paths.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::V2025_01 => "2025-01",
            Self::V2025_04 => "2025-04",
            Self::V2025_07 => "2025-07",
            Self::V2025_10 => "2025-10",
            Self::V2026_01 => "2026-01",
            Self::V2026_04 => "2026-04",
            Self::V2026_07 => "2026-07",
            Self::Unstable => "unstable",
            Self::Custom(s) => s,
        }
    }

    const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    fn is_valid_version_format(s: &str) -> bool {
        let Some((year, month)) = s.split_once('-') else {
            return false;
        };

        year.len() == 4
            && year.chars().all(|c| c.is_ascii_digit())
            && matches!(month, "01" | "04" | "07" | "10")
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dated versions order by release date (`YYYY-MM` sorts as text);
/// `Unstable` sorts after all of them.
impl Ord for ApiVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Unstable, Self::Unstable) => Ordering::Equal,
            (Self::Unstable, _) => Ordering::Greater,
            (_, Self::Unstable) => Ordering::Less,
            _ => self
                .as_str()
                .cmp(other.as_str())
                .then_with(|| self.is_custom().cmp(&other.is_custom())),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        match s.as_str() {
            "2025-01" => Ok(Self::V2025_01),
            "2025-04" => Ok(Self::V2025_04),
            "2025-07" => Ok(Self::V2025_07),
            "2025-10" => Ok(Self::V2025_10),
            "2026-01" => Ok(Self::V2026_01),
            "2026-04" => Ok(Self::V2026_04),
            "2026-07" => Ok(Self::V2026_07),
            "unstable" => Ok(Self::Unstable),
            _ if Self::is_valid_version_format(&s) => Ok(Self::Custom(s)),
            _ => Err(ConfigError::InvalidApiVersion { version: s }),
        }
    }
}
