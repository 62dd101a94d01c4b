//! # Client Configuration
//!
//! Configuration for the API layer.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     TOKO_API_URL=https://shop.example.com/api                           │
//! │     TOKO_TIMEOUT_SECS=10                                                │
//! │     TOKO_PAYMENT_POLICY=gateway_only                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/shop/client.toml (Linux)                                  │
//! │     ~/Library/Application Support/com.toko.shop/client.toml (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     http://localhost:8000/api, 30s timeout, self-service payment        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # client.toml
//! [api]
//! base_url = "https://shop.example.com/api"
//! timeout_secs = 30
//!
//! [storefront]
//! payment_policy = "self_service"  # self_service | gateway_only
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use toko_core::CustomerPaymentPolicy;

use crate::error::{ApiError, ApiResult};

// =============================================================================
// API Settings
// =============================================================================

/// Connection settings for the storefront backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the storefront REST API.
    /// All endpoint paths are resolved relative to this.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds). A request that exceeds this fails
    /// with a timeout error and is never retried automatically.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// =============================================================================
// Storefront Settings
// =============================================================================

/// Storefront behavior settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontSettings {
    /// Whether customers may confirm their own pending payments.
    #[serde(default)]
    pub payment_policy: CustomerPaymentPolicy,
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
///
/// ## Example Config File
/// ```toml
/// [api]
/// base_url = "https://shop.example.com/api"
/// timeout_secs = 30
///
/// [storefront]
/// payment_policy = "self_service"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend connection settings.
    #[serde(default)]
    pub api: ApiSettings,

    /// Storefront behavior settings.
    #[serde(default)]
    pub storefront: StorefrontSettings,
}

impl ApiConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (client.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ApiResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ApiError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ApiResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ApiError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ApiError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ApiError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ApiResult<()> {
        let url = url::Url::parse(&self.api.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.api.base_url, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ApiError::InvalidUrl(format!(
                "Base URL must use http or https, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ApiError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("TOKO_API_URL") {
            debug!(url = %url, "Overriding base URL from environment");
            self.api.base_url = url;
        }

        if let Ok(secs) = std::env::var("TOKO_TIMEOUT_SECS") {
            if let Ok(parsed) = secs.parse::<u64>() {
                self.api.timeout_secs = parsed;
            }
        }

        if let Ok(policy) = std::env::var("TOKO_PAYMENT_POLICY") {
            match policy.parse::<CustomerPaymentPolicy>() {
                Ok(parsed) => self.storefront.payment_policy = parsed,
                Err(_) => warn!(policy = %policy, "Unknown payment policy in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "toko", "shop")
            .map(|dirs| dirs.config_dir().join("client.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Returns the customer payment policy.
    pub fn payment_policy(&self) -> CustomerPaymentPolicy {
        self.storefront.payment_policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url(), "http://localhost:8000/api");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.payment_policy(), CustomerPaymentPolicy::SelfService);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ApiConfig::default();

        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "ftp://shop.example.com".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "https://shop.example.com/api".to_string();
        assert!(config.validate().is_ok());

        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_config_file() {
        let toml_str = r#"
            [api]
            base_url = "https://shop.example.com/api"
            timeout_secs = 10

            [storefront]
            payment_policy = "gateway_only"
        "#;
        let config: ApiConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.base_url(), "https://shop.example.com/api");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.payment_policy(), CustomerPaymentPolicy::GatewayOnly);
    }

    #[test]
    fn test_partial_config_gets_defaults() {
        let toml_str = r#"
            [api]
            base_url = "https://shop.example.com/api"
        "#;
        let config: ApiConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.payment_policy(), CustomerPaymentPolicy::SelfService);
    }

    #[test]
    fn test_toml_serialization() {
        let config = ApiConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[api]"));
        assert!(toml_str.contains("[storefront]"));
        assert!(toml_str.contains("payment_policy = \"self_service\""));
    }
}
