//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; defaults suit a local catalog service.
//!
//! - `DRIFTWOOD_CATALOG_URL` - Base URL of the catalog API (default: `http://localhost:3333`)
//! - `DRIFTWOOD_CATALOG_TOKEN` - Bearer token for the catalog API, if it requires one
//! - `DRIFTWOOD_CATALOG_TIMEOUT_SECS` - Per-request timeout in seconds (default: 10)
//! - `DRIFTWOOD_PRODUCT_CACHE_TTL_SECS` - Product metadata cache TTL in seconds (default: 300)
//! - `DRIFTWOOD_PRODUCT_CACHE_CAPACITY` - Product metadata cache capacity (default: 1000)
//! - `DRIFTWOOD_STORAGE_DIR` - Directory for persisted cart snapshots (default: `.driftwood`)
//! - `DRIFTWOOD_CART_KEY` - Storage key for the cart snapshot (default: `driftwood:cart`)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG_URL: &str = "http://localhost:3333";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_CACHE_CAPACITY: u64 = 1000;
const DEFAULT_STORAGE_DIR: &str = ".driftwood";
const DEFAULT_CART_KEY: &str = "driftwood:cart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart store configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// Directory holding persisted cart snapshots
    pub storage_dir: PathBuf,
    /// Key the cart snapshot is stored under
    pub storage_key: String,
}

/// Catalog API configuration.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API
    pub base_url: Url,
    /// Bearer token, if the catalog requires authentication
    pub api_token: Option<SecretString>,
    /// Per-request timeout
    pub timeout: Duration,
    /// How long product metadata may be served from cache
    pub product_cache_ttl: Duration,
    /// Maximum number of cached product entries
    pub product_cache_capacity: u64,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .field("product_cache_ttl", &self.product_cache_ttl)
            .field("product_cache_capacity", &self.product_cache_capacity)
            .finish()
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog = CatalogConfig::from_env()?;
        let storage_dir = PathBuf::from(get_env_or_default(
            "DRIFTWOOD_STORAGE_DIR",
            DEFAULT_STORAGE_DIR,
        ));
        let storage_key = get_env_or_default("DRIFTWOOD_CART_KEY", DEFAULT_CART_KEY);

        Ok(Self {
            catalog,
            storage_dir,
            storage_key,
        })
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = parse_url(
            "DRIFTWOOD_CATALOG_URL",
            &get_env_or_default("DRIFTWOOD_CATALOG_URL", DEFAULT_CATALOG_URL),
        )?;
        let api_token = get_optional_env("DRIFTWOOD_CATALOG_TOKEN").map(SecretString::from);
        let timeout = Duration::from_secs(parse_u64_env(
            "DRIFTWOOD_CATALOG_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
        )?);
        let product_cache_ttl = Duration::from_secs(parse_u64_env(
            "DRIFTWOOD_PRODUCT_CACHE_TTL_SECS",
            DEFAULT_CACHE_TTL_SECS,
        )?);
        let product_cache_capacity =
            parse_u64_env("DRIFTWOOD_PRODUCT_CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY)?;

        Ok(Self {
            base_url,
            api_token,
            timeout,
            product_cache_ttl,
            product_cache_capacity,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a raw value as `u64`, naming the offending variable on failure.
fn parse_u64(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Get a `u64` environment variable, falling back to a default when unset.
fn parse_u64_env(key: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => parse_u64(key, &raw),
        Err(_) => Ok(default),
    }
}

/// Parse a raw value as a URL, naming the offending variable on failure.
fn parse_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
