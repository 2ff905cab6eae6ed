//! Shared primitives for the appforge workspace
//!
//! This crate holds the pieces every other crate leans on: the error
//! taxonomy, tracing initialization, the bounded TTL content cache, and
//! the fixed-window rate limiter. The cache and rate limiter are the only
//! state shared across concurrent pipeline runs, so both synchronize
//! internally and are meant to be constructed once per process and passed
//! in explicitly.

pub mod cache;
pub mod error;
pub mod logging;
pub mod rate_limit;

pub use cache::{CacheStats, ContentCache};
pub use error::{
    AppForgeError, ConfigError, EngineError, LlmError, RateLimitError, ServiceError,
};
pub use rate_limit::RateLimiter;
