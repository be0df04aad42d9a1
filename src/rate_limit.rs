use axum::http::HeaderMap;
use dashmap::DashMap;
use std::time::{Duration, Instant};

use crate::config::RateLimitConfig;

// Key used when the request carries no client address headers
pub const UNKNOWN_CLIENT: &str = "unknown";

// Check-and-record admission for a client key.
// Implementations must make the check and the record a single step per key,
// so two concurrent requests cannot both take the last slot.
pub trait RateLimiter: Send + Sync {
    // Returns `true` and records `now` if the key is under its limit,
    // `false` otherwise.
    fn check_and_record(&self, key: &str, now: Instant) -> bool;

    fn max_requests(&self) -> usize;

    fn window(&self) -> Duration;
}

// Sliding window limiter kept in process memory. Keys are never evicted,
// only their timestamps are pruned when the key is checked again.
pub struct InMemoryRateLimiter {
    entries: DashMap<String, Vec<Instant>>, // client key -> recent request times
    max_requests: usize,
    window: Duration,
}

impl InMemoryRateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            entries: DashMap::new(),
            max_requests: config.max_requests,
            window: config.window,
        }
    }

    #[cfg(test)]
    fn recorded(&self, key: &str) -> usize {
        self.entries.get(key).map_or(0, |e| e.len())
    }
}

impl RateLimiter for InMemoryRateLimiter {
    fn check_and_record(&self, key: &str, now: Instant) -> bool {
        // the entry guard holds the shard lock until we return
        let mut timestamps = self.entries.entry(key.to_string()).or_default();

        let window = self.window;
        timestamps.retain(|&t| now.saturating_duration_since(t) < window);

        if timestamps.len() >= self.max_requests {
            return false;
        }

        timestamps.push(now);
        true
    }

    fn max_requests(&self) -> usize {
        self.max_requests
    }

    fn window(&self) -> Duration {
        self.window
    }
}

// First non-empty of x-forwarded-for / client-ip, else "unknown"
pub fn client_identifier(headers: &HeaderMap) -> String {
    ["x-forwarded-for", "client-ip"]
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|value| value.to_str().ok())
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}
