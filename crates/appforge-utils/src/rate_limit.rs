//! Fixed-window rate limiter for the externally reachable service surface
//!
//! Each client key gets a counting window of fixed duration. The window is
//! started by the first admitted request and never extends on activity;
//! once it expires, the next request starts a fresh window with count 1.
//! This gates request admission only — the internal pipeline is bounded by
//! batch size, not by this limiter.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::warn;

use crate::error::RateLimitError;

/// Default maximum admitted requests per window
pub const DEFAULT_MAX_REQUESTS: u32 = 50;

/// Default window duration (1 minute)
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy)]
struct WindowRecord {
    count: u32,
    window_expires_at: Instant,
}

/// Per-client fixed-window request counter.
///
/// Shared across all requests for the process lifetime; internal state is
/// mutex-guarded and held only for the duration of a single admission check.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<String, WindowRecord>>,
}

impl RateLimiter {
    /// Create a limiter admitting `max_requests` per `window` per client.
    #[must_use]
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests: max_requests.max(1),
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Create a limiter with the default policy (50 requests / 60 s).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW)
    }

    /// Admit or reject one request from `client_key`.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError`] with the seconds remaining in the
    /// client's window when the request count has reached the maximum.
    pub fn check(&self, client_key: &str) -> Result<(), RateLimitError> {
        let now = Instant::now();
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match windows.get_mut(client_key) {
            Some(record) if record.window_expires_at > now => {
                if record.count >= self.max_requests {
                    let retry_after = record.window_expires_at.duration_since(now);
                    warn!(
                        client = %client_key,
                        count = record.count,
                        max = self.max_requests,
                        retry_after_secs = retry_after.as_secs(),
                        "Rate limit exceeded"
                    );
                    return Err(RateLimitError {
                        retry_after_secs: retry_after.as_secs().max(1),
                    });
                }
                record.count += 1;
                Ok(())
            }
            _ => {
                // No record, or the window expired: start a fresh window
                windows.insert(
                    client_key.to_string(),
                    WindowRecord {
                        count: 1,
                        window_expires_at: now + self.window,
                    },
                );
                Ok(())
            }
        }
    }

    /// Current request count inside the client's live window, if any.
    #[must_use]
    pub fn current_count(&self, client_key: &str) -> Option<u32> {
        let windows = self
            .windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        windows
            .get(client_key)
            .filter(|record| record.window_expires_at > Instant::now())
            .map(|record| record.count)
    }
}
