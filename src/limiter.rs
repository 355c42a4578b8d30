//! Per-identity fixed-window rate limiting.
//!
//! Tracks request counts per client identity over a rolling window and
//! admits or rejects. State is process-wide and in-memory: nothing survives
//! a restart, nothing is shared across instances, and entries for idle
//! identities are never evicted. A multi-instance deployment that needs a
//! global guarantee has to move the counters into a shared store with
//! native expiry; that is outside this type's contract.
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Rate limiter tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Admitted requests per identity per window.
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Window length in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            window_secs: default_window_secs(),
        }
    }
}

fn default_limit() -> u32 {
    10
}

fn default_window_secs() -> u64 {
    60
}

/// Fixed-window request counter keyed by client identity.
///
/// Entries hold `(count, window_reset_at)`. The read-modify-write for one
/// identity runs under the map's entry lock, so two concurrent requests
/// from the same identity cannot both observe `count < limit` and slip past
/// the cap together. Distinct identities only contend on the shard level.
///
/// # Examples
///
/// ```rust
/// use feedbackd::RateLimiter;
/// use std::time::Duration;
///
/// let limiter = RateLimiter::new(2, Duration::from_secs(60));
/// assert!(limiter.admit("203.0.113.9"));
/// assert!(limiter.admit("203.0.113.9"));
/// assert!(!limiter.admit("203.0.113.9"));
/// // Other identities have their own budget.
/// assert!(limiter.admit("198.51.100.7"));
/// ```
pub struct RateLimiter {
    entries: DashMap<String, (u32, Instant)>,
    limit: u32,
    window: Duration,
}

impl RateLimiter {
    /// Creates a limiter admitting `limit` requests per `window` per identity.
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            limit,
            window,
        }
    }

    /// Creates a limiter from config.
    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.limit, Duration::from_secs(config.window_secs))
    }

    /// Admits or rejects one request from `identity`.
    ///
    /// Fixed-window counting: a missing entry or an elapsed window resets to
    /// `(1, now + window)` and admits; a full window rejects without
    /// mutation; otherwise the count increments and the request is admitted.
    pub fn admit(&self, identity: &str) -> bool {
        let now = Instant::now();

        let mut entry = self
            .entries
            .entry(identity.to_string())
            .or_insert((0, now));
        let (count, window_reset_at) = entry.value_mut();

        if *count == 0 || now > *window_reset_at {
            *count = 1;
            *window_reset_at = now + self.window;
            return true;
        }

        if *count >= self.limit {
            return false;
        }

        *count += 1;
        true
    }

    /// Number of identities currently tracked. Grows without bound; see the
    /// module docs.
    pub fn tracked_identities(&self) -> usize {
        self.entries.len()
    }
}
