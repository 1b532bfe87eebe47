//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `STORECART_DATA_DIR` - Directory for persisted keys (default: ./data)
//! - `STORECART_CART_KEY` - Storage key for the cart (default: cart)
//! - `STORECART_CATALOG_FILE` - Catalog snapshot file (default: ./catalog.json)
//! - `STORECART_RELATED_LIMIT` - Related products per detail view (default: 3)
//! - `STORECART_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//!
//! Log filtering itself is controlled by `RUST_LOG`.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::catalog::DEFAULT_RELATED_LIMIT;
use crate::persistence::DEFAULT_CART_KEY;
use crate::storage::validate_key;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Cart application configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Directory the file store writes under
    pub data_dir: PathBuf,
    /// Key the cart array is stored under
    pub cart_key: String,
    /// Local catalog snapshot
    pub catalog_file: PathBuf,
    /// Related products shown per product
    pub related_limit: usize,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            cart_key: DEFAULT_CART_KEY.to_string(),
            catalog_file: PathBuf::from("./catalog.json"),
            related_limit: DEFAULT_RELATED_LIMIT,
            log_format: LogFormat::default(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let cart_key = lookup("STORECART_CART_KEY").unwrap_or(defaults.cart_key);
        validate_key(&cart_key).map_err(|e| {
            ConfigError::InvalidEnvVar("STORECART_CART_KEY".to_string(), e.to_string())
        })?;

        Ok(Self {
            data_dir: lookup("STORECART_DATA_DIR").map_or(defaults.data_dir, PathBuf::from),
            cart_key,
            catalog_file: lookup("STORECART_CATALOG_FILE")
                .map_or(defaults.catalog_file, PathBuf::from),
            related_limit: parse_optional(&lookup, "STORECART_RELATED_LIMIT")?
                .unwrap_or(defaults.related_limit),
            log_format: parse_optional(&lookup, "STORECART_LOG_FORMAT")?
                .unwrap_or(defaults.log_format),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable, reporting the variable name on failure.
fn parse_optional<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CartConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.cart_key, "cart");
        assert_eq!(config.related_limit, 3);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = CartConfig::from_lookup(lookup_from(&[
            ("STORECART_DATA_DIR", "/tmp/shop"),
            ("STORECART_CART_KEY", "cart_v2"),
            ("STORECART_CATALOG_FILE", "/tmp/catalog.json"),
            ("STORECART_RELATED_LIMIT", " 5 "),
            ("STORECART_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/shop"));
        assert_eq!(config.cart_key, "cart_v2");
        assert_eq!(config.catalog_file, PathBuf::from("/tmp/catalog.json"));
        assert_eq!(config.related_limit, 5);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_related_limit() {
        let err = CartConfig::from_lookup(lookup_from(&[("STORECART_RELATED_LIMIT", "many")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "STORECART_RELATED_LIMIT"));
    }

    #[test]
    fn test_invalid_cart_key() {
        let err = CartConfig::from_lookup(lookup_from(&[("STORECART_CART_KEY", "../cart")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "STORECART_CART_KEY"));
    }

    #[test]
    fn test_invalid_log_format() {
        assert!(
            CartConfig::from_lookup(lookup_from(&[("STORECART_LOG_FORMAT", "xml")])).is_err()
        );
    }
}
