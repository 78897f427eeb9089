//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CLERK_PUBLISHABLE_KEY` - Identity provider publishable key
//!   (falls back to `NEXT_PUBLIC_CLERK_PUBLISHABLE_KEY`)
//!
//! ## Optional
//! - `STRIPE_PUBLISHABLE_KEY` - Payment provider publishable key
//!   (falls back to `STRIPE_PUBLIC_KEY`)
//! - `STARK_HOST` - Bind address (default: 127.0.0.1)
//! - `STARK_PORT` - Listen port (default: 3000)
//! - `STARK_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `CATALOG_API_URL` - Catalog source base URL (default: <https://fakestoreapi.com>)
//! - `CATALOG_PAGE_SIZE` - Products fetched for the `all` category (default: 20)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use url::Url;

/// Identity provider key, as named by the hosted provider.
pub const IDENTITY_KEY_VAR: &str = "CLERK_PUBLISHABLE_KEY";

/// Older name for the identity key, still honoured.
const IDENTITY_KEY_FALLBACK_VAR: &str = "NEXT_PUBLIC_CLERK_PUBLISHABLE_KEY";

/// Payment provider key.
const PAYMENTS_KEY_VAR: &str = "STRIPE_PUBLISHABLE_KEY";

/// Older name for the payment provider key, still honoured.
const PAYMENTS_KEY_FALLBACK_VAR: &str = "STRIPE_PUBLIC_KEY";

const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";
const DEFAULT_PAGE_SIZE: &str = "20";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "your_",
    "changeme",
    "replace",
    "placeholder",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Placeholder value in {0}: contains '{1}'")]
    Placeholder(String, String),
}

impl ConfigError {
    /// The variable that was absent or unusable, if this error means
    /// "not configured" rather than "configured wrong".
    #[must_use]
    pub fn missing_key(&self) -> Option<&str> {
        match self {
            Self::MissingEnvVar(key) | Self::Placeholder(key, _) => Some(key),
            Self::InvalidEnvVar(..) => None,
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    /// Identity provider publishable key (safe to expose in browser)
    pub identity_publishable_key: String,
    /// Payment provider publishable key (safe to expose in browser)
    pub payments_publishable_key: Option<String>,
}

/// HTTP server and error tracking settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Catalog source settings.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog source
    pub base_url: Url,
    /// Number of products fetched for the `all` category
    pub page_size: u32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the identity key is missing or a variable is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the identity key is missing or a variable is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let server = ServerConfig::from_lookup(&lookup)?;
        let catalog = CatalogConfig::from_lookup(&lookup)?;
        let identity_publishable_key = get_publishable_key(&lookup)?;
        let payments_publishable_key = get_optional_env(&lookup, PAYMENTS_KEY_VAR)
            .or_else(|| get_optional_env(&lookup, PAYMENTS_KEY_FALLBACK_VAR))
            .filter(|key| find_placeholder(key).is_none());

        Ok(Self {
            server,
            catalog,
            identity_publishable_key,
            payments_publishable_key,
        })
    }
}

impl ServerConfig {
    /// Load server settings from the environment.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if host or port do not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = get_env_or_default(&lookup, "STARK_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("STARK_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default(&lookup, "STARK_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("STARK_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default(&lookup, "STARK_BASE_URL", "http://localhost:3000");

        Ok(Self {
            host,
            port,
            base_url,
            sentry_dsn: get_optional_env(&lookup, "SENTRY_DSN"),
            sentry_environment: get_optional_env(&lookup, "SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CatalogConfig {
    /// Load catalog settings from the environment.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL or page size do not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = Url::parse(&get_env_or_default(&lookup, "CATALOG_API_URL", DEFAULT_CATALOG_URL))
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_API_URL".to_string(), e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_API_URL".to_string(),
                "must be an http(s) base URL".to_string(),
            ));
        }

        let page_size = get_env_or_default(&lookup, "CATALOG_PAGE_SIZE", DEFAULT_PAGE_SIZE)
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_PAGE_SIZE".to_string(), e.to_string()))?;
        if page_size == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_PAGE_SIZE".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            page_size,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable. Blank values count as unset.
fn get_optional_env(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Get a variable with a default value.
fn get_env_or_default(lookup: impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get_optional_env(lookup, key).unwrap_or_else(|| default.to_string())
}

/// Get the identity key with fallback to its older variable name.
fn get_publishable_key(lookup: impl Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
    let value = get_optional_env(&lookup, IDENTITY_KEY_VAR)
        .or_else(|| get_optional_env(&lookup, IDENTITY_KEY_FALLBACK_VAR))
        .ok_or_else(|| ConfigError::MissingEnvVar(IDENTITY_KEY_VAR.to_string()))?;

    if let Some(pattern) = find_placeholder(&value) {
        return Err(ConfigError::Placeholder(
            IDENTITY_KEY_VAR.to_string(),
            pattern.to_string(),
        ));
    }
    Ok(value)
}

/// The first placeholder pattern found in `value`, if any.
fn find_placeholder(value: &str) -> Option<&'static str> {
    let lower = value.to_lowercase();
    PLACEHOLDER_PATTERNS
        .iter()
        .copied()
        .find(|pattern| lower.contains(*pattern))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(lookup(&[("CLERK_PUBLISHABLE_KEY", "pk_test_abc123")]))
            .unwrap();

        assert_eq!(config.identity_publishable_key, "pk_test_abc123");
        assert!(config.payments_publishable_key.is_none());
        assert_eq!(config.server.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.server.base_url, "http://localhost:3000");
        assert_eq!(config.catalog.base_url.as_str(), "https://fakestoreapi.com/");
        assert_eq!(config.catalog.page_size, 20);
        assert!(config.server.sentry_dsn.is_none());
    }

    #[test]
    fn test_identity_key_fallback() {
        let config = StorefrontConfig::from_lookup(lookup(&[(
            "NEXT_PUBLIC_CLERK_PUBLISHABLE_KEY",
            "pk_live_fallback",
        )]))
        .unwrap();
        assert_eq!(config.identity_publishable_key, "pk_live_fallback");
    }

    #[test]
    fn test_missing_identity_key() {
        let err = StorefrontConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
        assert_eq!(err.missing_key(), Some("CLERK_PUBLISHABLE_KEY"));
    }

    #[test]
    fn test_blank_identity_key_is_missing() {
        let err = StorefrontConfig::from_lookup(lookup(&[("CLERK_PUBLISHABLE_KEY", "   ")]))
            .unwrap_err();
        assert_eq!(err.missing_key(), Some("CLERK_PUBLISHABLE_KEY"));
    }

    #[test]
    fn test_placeholder_identity_key_is_missing() {
        let err = StorefrontConfig::from_lookup(lookup(&[(
            "CLERK_PUBLISHABLE_KEY",
            "your-clerk-key-here",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Placeholder(_, _)));
        assert_eq!(err.missing_key(), Some("CLERK_PUBLISHABLE_KEY"));
    }

    #[test]
    fn test_placeholder_payments_key_is_dropped() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("CLERK_PUBLISHABLE_KEY", "pk_test_abc123"),
            ("STRIPE_PUBLISHABLE_KEY", "changeme"),
        ]))
        .unwrap();
        assert!(config.payments_publishable_key.is_none());
    }

    #[test]
    fn test_payments_key_fallback() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("CLERK_PUBLISHABLE_KEY", "pk_test_abc123"),
            ("STRIPE_PUBLIC_KEY", "pk_test_stripe_legacy"),
        ]))
        .unwrap();
        assert_eq!(
            config.payments_publishable_key.as_deref(),
            Some("pk_test_stripe_legacy")
        );

        let config = StorefrontConfig::from_lookup(lookup(&[
            ("CLERK_PUBLISHABLE_KEY", "pk_test_abc123"),
            ("STRIPE_PUBLISHABLE_KEY", "pk_test_stripe_current"),
            ("STRIPE_PUBLIC_KEY", "pk_test_stripe_legacy"),
        ]))
        .unwrap();
        assert_eq!(
            config.payments_publishable_key.as_deref(),
            Some("pk_test_stripe_current")
        );
    }

    #[test]
    fn test_invalid_port() {
        let err = StorefrontConfig::from_lookup(lookup(&[
            ("CLERK_PUBLISHABLE_KEY", "pk_test_abc123"),
            ("STARK_PORT", "http"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "STARK_PORT"));
        assert!(err.missing_key().is_none());
    }

    #[test]
    fn test_invalid_catalog_settings() {
        let bad_url = CatalogConfig::from_lookup(lookup(&[("CATALOG_API_URL", "not a url")]));
        assert!(bad_url.is_err());

        let zero_page = CatalogConfig::from_lookup(lookup(&[("CATALOG_PAGE_SIZE", "0")]));
        assert!(zero_page.is_err());
    }

    #[test]
    fn test_catalog_overrides() {
        let catalog = CatalogConfig::from_lookup(lookup(&[
            ("CATALOG_API_URL", "http://127.0.0.1:9000/api"),
            ("CATALOG_PAGE_SIZE", "5"),
        ]))
        .unwrap();
        assert_eq!(catalog.base_url.as_str(), "http://127.0.0.1:9000/api");
        assert_eq!(catalog.page_size, 5);
    }
}
