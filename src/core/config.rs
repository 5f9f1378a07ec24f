//! core::config
//!
//! Configuration schema and validation.
//!
//! # Scope
//!
//! The host constructs an [`AppConfig`] once, at startup, and hands it to
//! the view-model. There is no config file, no CLI, and no environment
//! lookup in the core; the schema derives serde so hosts that do load
//! configuration from disk can parse straight into it.
//!
//! # Validation
//!
//! Values are validated after construction/parsing to ensure they conform
//! to expected formats (e.g. the result limit must fit the provider's
//! cap).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::Coordinates;

/// Errors from configuration validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A configuration value is invalid.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Side-channel namespace under which the master list is persisted.
pub const DEFAULT_CACHE_KEY: &str = "venues-map";

/// Default search center: Manhattan, New York.
const DEFAULT_CENTER: (f64, f64) = (40.7413549, -73.9980244);

/// Default search radius in meters.
const DEFAULT_RADIUS_M: u32 = 2000;

/// Default maximum number of seed results.
const DEFAULT_LIMIT: u32 = 10;

/// Default free-text seed query.
const DEFAULT_QUERY: &str = "rehearsal studios";

/// Provider result-limit cap; requests above this are rejected upstream.
const MAX_LIMIT: u32 = 50;

/// Top-level configuration for the view-model.
///
/// # Example
///
/// ```
/// use venuemap::core::config::AppConfig;
///
/// let mut config = AppConfig::default();
/// config.provider.client_id = "CLIENT_ID".into();
/// config.provider.client_secret = "CLIENT_SECRET".into();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Seed-search parameters for the initial place list.
    pub search: SearchConfig,

    /// Places-provider credentials and endpoint.
    pub provider: ProviderConfig,

    /// Side-channel key the master list is persisted under.
    pub cache_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            provider: ProviderConfig::default(),
            cache_key: DEFAULT_CACHE_KEY.to_string(),
        }
    }
}

impl AppConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_key.is_empty() {
            return Err(ConfigError::InvalidValue(
                "cache_key cannot be empty".into(),
            ));
        }
        self.search.validate()?;
        self.provider.validate()?;
        Ok(())
    }
}

/// Parameters for the bulk seed search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Geographic center of the search.
    pub center: Coordinates,

    /// Search radius in meters.
    pub radius_m: u32,

    /// Maximum number of results to seed the store with.
    pub limit: u32,

    /// Free-text query (e.g. a venue category).
    pub query: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            center: Coordinates::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1)
                .expect("default center is in range"),
            radius_m: DEFAULT_RADIUS_M,
            limit: DEFAULT_LIMIT,
            query: DEFAULT_QUERY.to_string(),
        }
    }
}

impl SearchConfig {
    /// Validate the search parameters.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the radius is zero or the
    /// limit is zero or above the provider cap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.radius_m == 0 {
            return Err(ConfigError::InvalidValue(
                "search radius must be positive".into(),
            ));
        }
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(ConfigError::InvalidValue(format!(
                "result limit must be within 1..={}, got {}",
                MAX_LIMIT, self.limit
            )));
        }
        Ok(())
    }
}

/// Places-provider credentials and endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    /// API client id.
    pub client_id: String,

    /// API client secret. Never logged.
    pub client_secret: String,

    /// API base URL override. `None` uses the provider's public endpoint;
    /// tests point this at a local mock server.
    pub api_base: Option<String>,
}

impl ProviderConfig {
    /// Validate the provider settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if either credential is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client_id.is_empty() {
            return Err(ConfigError::InvalidValue(
                "provider client_id cannot be empty".into(),
            ));
        }
        if self.client_secret.is_empty() {
            return Err(ConfigError::InvalidValue(
                "provider client_secret cannot be empty".into(),
            ));
        }
        Ok(())
    }
}
