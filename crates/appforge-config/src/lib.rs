//! Configuration model, loading, and validation for appforge
//!
//! Configuration is a TOML document with four sections, all optional:
//!
//! ```toml
//! [llm]
//! provider = "anthropic"
//!
//! [llm.anthropic]
//! api_key_env = "ANTHROPIC_API_KEY"
//! model = "claude-haiku-4-5"
//!
//! [cache]
//! capacity = 1000
//! ttl_secs = 3600
//!
//! [rate_limit]
//! max_requests = 50
//! window_secs = 60
//!
//! [generation]
//! batch_size = 6
//! basic_file_cap = 6
//! request_timeout_secs = 120
//! ```
//!
//! Every value has a default, so an absent file yields a working (if
//! backend-less) configuration. Capacity, TTL, and rate-limit policy are
//! configuration because the cache and rate limiter live for the whole
//! process; the batch size bounds peak concurrency against the generative
//! backend.

use serde::{Deserialize, Serialize};
use std::path::Path;

use appforge_utils::error::ConfigError;

/// Top-level configuration for the appforge service and pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Generative backend selection and provider settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider name; defaults to "anthropic" when unset
    pub provider: Option<String>,
    /// Anthropic Messages API settings
    pub anthropic: Option<AnthropicConfig>,
}

/// Anthropic provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicConfig {
    /// Override for the Messages API endpoint
    pub base_url: Option<String>,
    /// Environment variable holding the API key (default ANTHROPIC_API_KEY)
    pub api_key_env: Option<String>,
    /// Model to use for file generation
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// Content cache sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl_secs(),
        }
    }
}

/// Fixed-window admission policy for the tiered operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

/// Pipeline execution knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Files generated concurrently within one batch. Bounds peak
    /// concurrency against the backend; batches are awaited fully before
    /// the next one starts.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Dynamic-file cap for the legacy basic operation
    #[serde(default = "default_basic_file_cap")]
    pub basic_file_cap: usize,
    /// Per-call transport timeout. The orchestrator has no timeout of its
    /// own; this is the only latency bound per file.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            basic_file_cap: default_basic_file_cap(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_cache_capacity() -> usize {
    1000
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

fn default_max_requests() -> u32 {
    50
}

fn default_window_secs() -> u64 {
    60
}

fn default_batch_size() -> usize {
    6
}

fn default_basic_file_cap() -> usize {
    6
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist,
    /// `ConfigError::InvalidFile` if it is not valid TOML, or
    /// `ConfigError::InvalidValue` if a value fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::NotFound {
            path: path.display().to_string(),
        })?;

        let config: Self =
            toml::from_str(&raw).map_err(|e| ConfigError::InvalidFile(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generation.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "generation.batch_size".to_string(),
                value: "0".to_string(),
            });
        }
        if self.cache.capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "cache.capacity".to_string(),
                value: "0".to_string(),
            });
        }
        if self.rate_limit.max_requests == 0 {
            return Err(ConfigError::InvalidValue {
                key: "rate_limit.max_requests".to_string(),
                value: "0".to_string(),
            });
        }
        if self.rate_limit.window_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "rate_limit.window_secs".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    /// Minimal configuration for tests: defaults everywhere, no provider.
    #[cfg(any(test, feature = "test-utils"))]
    #[must_use]
    pub fn minimal_for_testing() -> Self {
        Self::default()
    }
}
