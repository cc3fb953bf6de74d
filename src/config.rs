//! Configuration management for Vigil
//!
//! Loads configuration from YAML files and environment variables.
//! Environment variables override YAML values.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Result cache settings
    #[serde(default)]
    pub cache: CacheConfig,
    /// Upstream provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Screener orchestration settings
    #[serde(default)]
    pub screener: ScreenerConfig,
}

/// Result cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Default TTL for cached screening results, in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
    /// Maximum number of cached results (LRU eviction beyond this)
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Interval between background sweeps of expired entries, in seconds
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_seconds: u64,
}

fn default_cache_ttl() -> u64 {
    300
}

fn default_max_entries() -> usize {
    1000
}

fn default_cleanup_interval() -> u64 {
    60
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_cache_ttl(),
            max_entries: default_max_entries(),
            cleanup_interval_seconds: default_cleanup_interval(),
        }
    }
}

/// Upstream provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the security metadata service
    #[serde(default = "default_security_url")]
    pub security_base_url: String,
    /// Base URL of the market overview service
    #[serde(default = "default_overview_url")]
    pub overview_base_url: String,
    /// Per-call timeout in milliseconds
    #[serde(default = "default_provider_timeout")]
    pub timeout_ms: u64,
}

fn default_security_url() -> String {
    "https://api.rugcheck.xyz/v1".to_string()
}

fn default_overview_url() -> String {
    "https://api.dexscreener.com/latest".to_string()
}

fn default_provider_timeout() -> u64 {
    2000
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            security_base_url: default_security_url(),
            overview_base_url: default_overview_url(),
            timeout_ms: default_provider_timeout(),
        }
    }
}

/// Screener orchestration configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScreenerConfig {
    /// Overall budget for one screening pass, in milliseconds.
    /// Must be strictly greater than the per-provider timeout.
    #[serde(default = "default_deadline")]
    pub deadline_ms: u64,
}

fn default_deadline() -> u64 {
    8000
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            deadline_ms: default_deadline(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (VIGIL_*)
    /// 2. config/vigil.yaml (if exists)
    /// 3. vigil.yaml (if exists)
    /// 4. Default values
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("cache.ttl_seconds", default_cache_ttl())?
            .set_default("cache.max_entries", default_max_entries() as u64)?
            .set_default("cache.cleanup_interval_seconds", default_cleanup_interval())?
            .set_default("provider.security_base_url", default_security_url())?
            .set_default("provider.overview_base_url", default_overview_url())?
            .set_default("provider.timeout_ms", default_provider_timeout())?
            .set_default("screener.deadline_ms", default_deadline())?
            .add_source(File::with_name("vigil").required(false))
            .add_source(File::with_name("config/vigil").required(false))
            // VIGIL_CACHE__TTL_SECONDS=120 -> cache.ttl_seconds = 120
            .add_source(
                Environment::with_prefix("VIGIL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.max_entries == 0 {
            return Err(ConfigError::Message(
                "cache.max_entries must be greater than zero".to_string(),
            ));
        }

        if self.cache.ttl_seconds == 0 {
            return Err(ConfigError::Message(
                "cache.ttl_seconds must be greater than zero".to_string(),
            ));
        }

        // Provider timeouts must leave headroom inside the overall deadline,
        // otherwise a single slow call consumes the whole screening budget.
        if self.provider.timeout_ms >= self.screener.deadline_ms {
            return Err(ConfigError::Message(
                "provider.timeout_ms must be strictly less than screener.deadline_ms".to_string(),
            ));
        }

        if self.provider.security_base_url.is_empty() || self.provider.overview_base_url.is_empty()
        {
            return Err(ConfigError::Message(
                "provider base URLs must be set".to_string(),
            ));
        }

        Ok(())
    }
}
