//! Keyed fixed-window rate limiting.
//!
//! Each key gets its own bucket counting requests in the current window.
//! The limiter owns its bucket map; callers share it however suits them
//! (for example behind a `Mutex`).

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for rate limiting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Window length in seconds
    pub window_secs: u64,

    /// Maximum requests per key per window
    pub max_requests: u32,

    /// Bucket count at which expired buckets are pruned
    pub max_entries: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: 60,
            max_requests: 30,
            max_entries: 10_000,
        }
    }
}

impl RateLimitConfig {
    /// Window duration.
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

/// Outcome of an accepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    /// Requests left in the current window
    pub remaining: u32,

    /// Time until the window resets
    pub reset_in: Duration,
}

#[derive(Debug, Clone)]
struct Bucket {
    count: u32,
    window_start: Instant,
}

impl Bucket {
    fn is_expired(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.window_start) >= window
    }

    fn reset_in(&self, now: Instant, window: Duration) -> Duration {
        window.saturating_sub(now.saturating_duration_since(self.window_start))
    }
}

/// Fixed-window rate limiter keyed by string.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    buckets: HashMap<String, Bucket>,
}

impl RateLimiter {
    /// Create a new rate limiter.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            buckets: HashMap::new(),
        }
    }

    /// Limiter configuration.
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Number of tracked buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether no bucket is tracked.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Count a request for `key` now.
    pub fn check(&mut self, key: &str) -> Result<RateLimitStatus> {
        self.check_at(key, Instant::now())
    }

    /// Count a request for `key` at `now`.
    pub fn check_at(&mut self, key: &str, now: Instant) -> Result<RateLimitStatus> {
        let window = self.config.window();

        if self.buckets.len() >= self.config.max_entries && !self.buckets.contains_key(key) {
            self.prune(now);
        }

        let bucket = self.buckets.entry(key.to_string()).or_insert(Bucket {
            count: 0,
            window_start: now,
        });

        if bucket.is_expired(now, window) {
            bucket.count = 0;
            bucket.window_start = now;
        }

        if bucket.count >= self.config.max_requests {
            let retry_after = bucket.reset_in(now, window);
            log::debug!("Rate limit hit for '{}', retry in {:?}", key, retry_after);
            return Err(Error::RateLimited {
                key: key.to_string(),
                retry_after,
            });
        }

        bucket.count += 1;
        Ok(RateLimitStatus {
            remaining: self.config.max_requests - bucket.count,
            reset_in: bucket.reset_in(now, window),
        })
    }

    /// Drop buckets whose window has passed.
    pub fn prune(&mut self, now: Instant) -> usize {
        let window = self.config.window();
        let before = self.buckets.len();
        self.buckets.retain(|_, bucket| !bucket.is_expired(now, window));
        let removed = before - self.buckets.len();
        if removed > 0 {
            log::debug!("Pruned {} expired rate-limit buckets", removed);
        }
        removed
    }

    /// Forget all buckets.
    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}
