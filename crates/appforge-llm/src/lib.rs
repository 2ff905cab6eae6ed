//! Generative backend abstraction for appforge
//!
//! Provides a trait-based system for invoking generative models over HTTP.
//! Providers implement the [`LlmBackend`] trait, so the file generator and
//! orchestrator never know which provider is behind a call. Every
//! invocation is a single attempt: failures are converted to deterministic
//! fallback content by the caller, never retried here.

mod anthropic_backend;
pub(crate) mod http_client;
mod response;
mod types;

pub use response::strip_code_fences;
pub use types::{LlmBackend, LlmInvocation, LlmResult, Message, Role};

pub use appforge_config as config;
pub use appforge_utils::error::LlmError;

pub(crate) use anthropic_backend::AnthropicBackend;

use crate::config::Config;

/// Create a generative backend from configuration.
///
/// The provider defaults to `anthropic` when unset.
///
/// # Errors
///
/// Returns `LlmError::Unsupported` if the provider is unknown, or
/// `LlmError::Misconfiguration` if provider-specific configuration is
/// invalid (missing API key or model). Callers treat a construction error
/// as "capability unavailable": the tiered operation fails fast on it and
/// the basic operation degrades to placeholders.
pub fn from_config(config: &Config) -> Result<Box<dyn LlmBackend>, LlmError> {
    let provider = config.llm.provider.as_deref().unwrap_or("anthropic");

    match provider {
        "anthropic" => {
            let backend = AnthropicBackend::new_from_config(config)?;
            Ok(Box::new(backend))
        }
        unknown => Err(LlmError::Unsupported(format!(
            "Unknown generative provider '{unknown}'. Supported providers: anthropic."
        ))),
    }
}

#[cfg(test)]
mod factory_tests {
    use super::*;

    #[test]
    fn test_unknown_provider_fails_cleanly() {
        let mut config = Config::minimal_for_testing();
        config.llm.provider = Some("invalid-provider".to_string());

        let result = from_config(&config);
        match result {
            Err(LlmError::Unsupported(msg)) => {
                assert!(msg.contains("invalid-provider"));
                assert!(msg.contains("Unknown generative provider"));
            }
            _ => panic!("Expected LlmError::Unsupported for invalid-provider"),
        }
    }

    #[test]
    fn test_default_provider_is_anthropic() {
        // No provider configured: the factory should attempt Anthropic and
        // fail with Misconfiguration when no model/API key is present.
        let mut config = Config::minimal_for_testing();
        config.llm.provider = None;
        config.llm.anthropic = None;

        let result = from_config(&config);
        match result {
            Err(LlmError::Misconfiguration(_)) => {
                // Construction went through the Anthropic path and failed on
                // the missing model/key, not on an unknown provider.
            }
            Err(e) => panic!("Expected Misconfiguration for empty config, got {e:?}"),
            Ok(_) => panic!("Expected Misconfiguration for empty config, got a backend"),
        }
    }
}
