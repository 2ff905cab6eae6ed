//! Error taxonomy for appforge
//!
//! The taxonomy mirrors the propagation policy of the pipeline: failures
//! below the file boundary (`LlmError`) are always absorbed into fallback
//! content and never reach the caller, while failures above it — a missing
//! backend, a missing architecture, an unexpected orchestration error —
//! always propagate as `ServiceError`/`AppForgeError`.

use std::time::Duration;
use thiserror::Error;

/// Per-call failures from the generative backend.
///
/// These are recovered locally inside the file generator and replaced with
/// marked fallback content; they never fail a batch or a pipeline run.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Transport-level failure (HTTP connectivity, malformed response)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Provider authentication failure (401, 403, missing API key)
    #[error("Provider authentication error: {0}")]
    ProviderAuth(String),

    /// Provider quota/rate limit exceeded (429)
    #[error("Provider quota exceeded: {0}")]
    ProviderQuota(String),

    /// Provider service outage (5xx errors)
    #[error("Provider outage: {0}")]
    ProviderOutage(String),

    /// Invocation timed out at the transport layer
    #[error("Timeout after {duration:?}")]
    Timeout { duration: Duration },

    /// Configuration error
    #[error("Misconfiguration: {0}")]
    Misconfiguration(String),

    /// Unsupported feature or provider
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Configuration file or value errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration file: {0}")]
    InvalidFile(String),

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found at {path}")]
    NotFound { path: String },
}

/// Admission-control rejection from the fixed-window rate limiter.
///
/// This is a signal at the request boundary, not a pipeline failure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Rate limit exceeded; retry after {retry_after_secs}s")]
pub struct RateLimitError {
    /// Seconds until the client's current window expires
    pub retry_after_secs: u64,
}

/// Fatal failures inside the generation pipeline itself.
///
/// Per-file generation failures never surface here; this is reserved for
/// unexpected internal errors, in which case no partial bundle is returned.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Orchestration failure: {0}")]
    Orchestration(String),
}

/// Errors surfaced by the exposed service operations.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Generative capability not configured; surfaced before any file work
    /// begins (tiered operation only — the basic operation degrades
    /// silently to placeholders instead).
    #[error("Generative backend is not configured")]
    Unavailable,

    /// The request carried no architecture document
    #[error("Request is missing the project architecture")]
    MissingArchitecture,

    /// Admission rejected by the rate limiter
    #[error(transparent)]
    RateLimited(#[from] RateLimitError),

    /// Fatal pipeline failure
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Top-level error type for library consumers and the CLI.
#[derive(Error, Debug)]
pub enum AppForgeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Invalid architecture document: {0}")]
    InvalidArchitecture(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI exit codes.
pub mod exit_codes {
    /// Input or configuration error
    pub const USAGE: i32 = 2;
    /// Generative backend unavailable
    pub const UNAVAILABLE: i32 = 69;
    /// Any other failure
    pub const FAILURE: i32 = 1;
}

impl AppForgeError {
    /// Map this error to a CLI exit code.
    #[must_use]
    pub fn to_exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::InvalidArchitecture(_) => exit_codes::USAGE,
            Self::Service(ServiceError::MissingArchitecture) => exit_codes::USAGE,
            Self::Service(ServiceError::Unavailable) => exit_codes::UNAVAILABLE,
            _ => exit_codes::FAILURE,
        }
    }
}
