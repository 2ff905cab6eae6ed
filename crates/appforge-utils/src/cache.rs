//! Bounded, TTL-based content cache
//!
//! Memoizes generated file content and external-lookup results so repeated
//! pipeline runs over the same architecture do not re-issue backend calls.
//! Keys are stable BLAKE3 signatures of the generation inputs (see
//! [`content_signature`]).
//!
//! Eviction is size-triggered and strictly insertion-ordered: once the
//! store holds `capacity` entries, inserting a new key removes the
//! oldest-inserted live entry. This is not an LRU and does not consider
//! remaining TTL; the behavior is documented and pinned by tests, so keep
//! it when touching this module. Re-`set` of a live key updates its value
//! and expiry but keeps its original insertion slot.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Default maximum number of entries held before eviction begins
pub const DEFAULT_CAPACITY: usize = 1000;

/// Default entry time-to-live (1 hour)
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Cache hit/miss statistics for verbose logging
#[derive(Debug, Default, Clone, Copy)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub writes: u64,
}

impl CacheStats {
    /// Calculate cache hit ratio
    #[must_use]
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, CacheEntry>,
    /// Keys in insertion order; may contain keys whose entries have already
    /// expired out of `entries`, which eviction skips over.
    insertion_order: VecDeque<String>,
    stats: CacheStats,
}

/// Bounded key/value store with per-entry TTL and insertion-order eviction.
///
/// Safe to share across concurrent pipeline runs; all state lives behind a
/// single mutex and every operation holds it only briefly.
#[derive(Debug)]
pub struct ContentCache {
    capacity: usize,
    ttl: Duration,
    state: Mutex<CacheState>,
}

impl ContentCache {
    /// Create a cache with the given entry capacity and TTL.
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            ttl,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Create a cache with the default capacity (1000) and TTL (1 hour).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TTL)
    }

    /// Store `value` under `key` with expiry `now + ttl`.
    ///
    /// Inserting a new key while the store is at capacity evicts the
    /// oldest-inserted live entry first. Re-setting an existing key only
    /// refreshes that key's value and expiry.
    pub fn set(&self, key: &str, value: impl Into<String>) {
        let mut state = self.lock();
        let expires_at = Instant::now() + self.ttl;

        if let Some(entry) = state.entries.get_mut(key) {
            entry.value = value.into();
            entry.expires_at = expires_at;
            state.stats.writes += 1;
            return;
        }

        while state.entries.len() >= self.capacity {
            let Some(oldest) = state.insertion_order.pop_front() else {
                break;
            };
            if state.entries.remove(&oldest).is_some() {
                state.stats.evictions += 1;
            }
        }

        state.entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.into(),
                expires_at,
            },
        );
        state.insertion_order.push_back(key.to_string());
        state.stats.writes += 1;
    }

    /// Return the value for `key` if present and unexpired.
    ///
    /// Expired entries are deleted on observation and report a miss.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut state = self.lock();
        let now = Instant::now();

        let expired = matches!(state.entries.get(key), Some(entry) if entry.expires_at <= now);
        if expired {
            state.entries.remove(key);
            state.stats.misses += 1;
            return None;
        }

        match state.entries.get(key) {
            Some(entry) => {
                let value = entry.value.clone();
                state.stats.hits += 1;
                Some(value)
            }
            None => {
                state.stats.misses += 1;
                None
            }
        }
    }

    /// Number of live entries currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of hit/miss/eviction statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Calculate a stable BLAKE3 signature over an ordered set of input parts.
///
/// Parts are length-prefixed before hashing so `["ab", "c"]` and
/// `["a", "bc"]` produce distinct signatures.
#[must_use]
pub fn content_signature(parts: &[&str]) -> String {
    let mut hasher = blake3::Hasher::new();
    for part in parts {
        hasher.update(&(part.len() as u64).to_le_bytes());
        hasher.update(part.as_bytes());
    }
    hasher.finalize().to_hex().to_string()
}
