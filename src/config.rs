//! Configuration system for the KeyWarden client.
//!
//! Configuration is loaded from multiple sources with the following precedence:
//! 1. Environment variables (highest priority)
//! 2. `keywarden.toml` file
//! 3. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! - `KEYWARDEN_API_BASE_URL` - Base URL of the licensing service
//! - `KEYWARDEN_HTTP_TIMEOUT_SECS` - Per-request timeout in seconds
//! - `KEYWARDEN_UPDATE_CONTRACT` - `legacy-message` or `status-only`
//! - `KEYWARDEN_LOGGING_ENABLED` - Enable logging in the demo binary
//! - `KEYWARDEN_LOG_LEVEL` - Log level (trace, debug, info, warn, error)

use std::env;
use std::sync::OnceLock;

use config::Config;
use serde::Deserialize;

use crate::client::app_key::UpdateContract;
use crate::errors::{ApiError, ApiResult};

/// Global configuration singleton.
static CONFIG: OnceLock<ClientConfig> = OnceLock::new();

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Service endpoint configuration
    pub api: ApiConfig,
    /// Wire-compatibility switches
    pub compat: CompatConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Service endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every request path is resolved against
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.keywarden.dev".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Wire-compatibility configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompatConfig {
    /// Success contract for `update_app_key`: "legacy-message" or
    /// "status-only"
    pub update_contract: String,
}

impl Default for CompatConfig {
    fn default() -> Self {
        Self {
            update_contract: "legacy-message".to_string(),
        }
    }
}

impl CompatConfig {
    /// The parsed update contract. Call `validate()` first; an unknown name
    /// falls back to the legacy contract here.
    pub fn update_contract(&self) -> UpdateContract {
        UpdateContract::from_config_name(&self.update_contract).unwrap_or_default()
    }
}

/// Logging configuration (consumed by the demo binary).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging
    pub enabled: bool,
    /// Log level: trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from file and environment.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. `keywarden.toml` file (optional)
    /// 3. Environment variables
    pub fn load() -> ApiResult<Self> {
        let builder = Config::builder()
            // Start with defaults
            .set_default("api.base_url", "https://api.keywarden.dev")
            .map_err(|e| ApiError::Config(e.to_string()))?
            .set_default("api.timeout_secs", 30)
            .map_err(|e| ApiError::Config(e.to_string()))?
            .set_default("compat.update_contract", "legacy-message")
            .map_err(|e| ApiError::Config(e.to_string()))?
            .set_default("logging.enabled", false)
            .map_err(|e| ApiError::Config(e.to_string()))?
            .set_default("logging.level", "info")
            .map_err(|e| ApiError::Config(e.to_string()))?
            // Load from keywarden.toml (optional)
            .add_source(config::File::with_name("keywarden").required(false))
            // Override with environment variables
            .set_override_option("api.base_url", env::var("KEYWARDEN_API_BASE_URL").ok())
            .map_err(|e| ApiError::Config(e.to_string()))?
            .set_override_option(
                "api.timeout_secs",
                env::var("KEYWARDEN_HTTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse::<i64>().ok()),
            )
            .map_err(|e| ApiError::Config(e.to_string()))?
            .set_override_option(
                "compat.update_contract",
                env::var("KEYWARDEN_UPDATE_CONTRACT").ok(),
            )
            .map_err(|e| ApiError::Config(e.to_string()))?
            .set_override_option(
                "logging.enabled",
                env::var("KEYWARDEN_LOGGING_ENABLED")
                    .ok()
                    .and_then(|v| v.parse::<bool>().ok()),
            )
            .map_err(|e| ApiError::Config(e.to_string()))?
            .set_override_option("logging.level", env::var("KEYWARDEN_LOG_LEVEL").ok())
            .map_err(|e| ApiError::Config(e.to_string()))?;

        let settings = builder
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build config: {e}")))?;

        settings
            .try_deserialize()
            .map_err(|e| ApiError::Config(format!("failed to deserialize config: {e}")))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ApiResult<()> {
        if self.api.base_url.is_empty() {
            return Err(ApiError::Config(
                "api.base_url cannot be empty".to_string(),
            ));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(ApiError::Config(format!(
                "api.base_url must start with http:// or https://, got '{}'",
                self.api.base_url
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(ApiError::Config(
                "api.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if UpdateContract::from_config_name(&self.compat.update_contract).is_none() {
            return Err(ApiError::Config(format!(
                "compat.update_contract must be 'legacy-message' or 'status-only', got '{}'",
                self.compat.update_contract
            )));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ApiError::Config(format!(
                    "logging.level must be one of: trace, debug, info, warn, error. Got '{other}'"
                )));
            }
        }

        Ok(())
    }
}

/// Get the global configuration.
///
/// This loads the configuration on first access and caches it.
/// Returns an error if configuration loading or validation fails.
pub fn get_config() -> ApiResult<&'static ClientConfig> {
    // Check if already initialized
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }

    // Load and validate configuration
    let config = ClientConfig::load()?;
    config.validate()?;

    // Try to set it (ignore if another thread beat us)
    let _ = CONFIG.set(config.clone());

    // Return the stored config (either ours or another thread's)
    Ok(CONFIG.get().expect("config was just set"))
}

/// Initialize configuration explicitly.
///
/// Call this early in your application to catch configuration errors.
/// Returns the validated configuration.
pub fn init_config() -> ApiResult<&'static ClientConfig> {
    get_config()
}
