//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_LOW_STOCK_THRESHOLD` - Dashboard low-stock cutoff (default: 10)
//! - `STOREFRONT_FEATURED_LIMIT` - Featured products shown on the home surface (default: 8)
//! - `STOREFRONT_RECENT_ACTIVITY_LIMIT` - Recent orders on the dashboard (default: 5)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// A product whose total stock is in `1..=low_stock_threshold` is low stock
    pub low_stock_threshold: u32,
    /// How many featured products the browsing surface requests
    pub featured_limit: usize,
    /// How many recent orders the dashboard activity feed shows
    pub recent_activity_limit: usize,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = parse_env_or_default("STOREFRONT_PORT", 3000)?;
        let low_stock_threshold = parse_env_or_default("STOREFRONT_LOW_STOCK_THRESHOLD", 10)?;
        let featured_limit = parse_env_or_default("STOREFRONT_FEATURED_LIMIT", 8)?;
        let recent_activity_limit = parse_env_or_default("STOREFRONT_RECENT_ACTIVITY_LIMIT", 5)?;

        Ok(Self {
            host,
            port,
            low_stock_threshold,
            featured_limit,
            recent_activity_limit,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// The socket address to bind the server to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            low_stock_threshold: 10,
            featured_limit: 8,
            recent_activity_limit: 5,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

/// Get an environment variable with a default fallback.
fn get_env_or_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Get an optional environment variable, treating empty values as absent.
fn get_optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Parse an environment variable into `T`, falling back to `default` when unset.
fn parse_env_or_default<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(name.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.low_stock_threshold, 10);
        assert_eq!(config.recent_activity_limit, 5);
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
    }
}
