//! Time-to-live freshness policy

use serde::{Deserialize, Serialize};

use crate::storage::CacheEntry;

/// Default cache duration: five minutes
pub const DEFAULT_CACHE_DURATION_MS: u64 = 300_000;

/// Time-to-live (TTL) freshness policy
///
/// An entry fetched at `t` is fresh while `now - t < ttl`. At exactly
/// `t + ttl` it is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtlPolicy {
    ttl_millis: u64,
}

impl TtlPolicy {
    /// Create new TTL policy
    pub fn new(ttl_millis: u64) -> Self {
        Self { ttl_millis }
    }

    /// Create TTL policy with seconds
    pub fn with_seconds(seconds: u64) -> Self {
        Self::new(seconds.saturating_mul(1_000))
    }

    /// Create TTL policy with minutes
    pub fn with_minutes(minutes: u64) -> Self {
        Self::with_seconds(minutes.saturating_mul(60))
    }

    /// Configured TTL in milliseconds
    pub fn ttl_millis(&self) -> u64 {
        self.ttl_millis
    }

    /// Whether an entry fetched at `fetched_at_millis` is still fresh at `now_millis`
    pub fn is_fresh_at(&self, fetched_at_millis: u64, now_millis: u64) -> bool {
        // A clock that moved backwards counts as zero elapsed time
        now_millis.saturating_sub(fetched_at_millis) < self.ttl_millis
    }

    /// Whether `entry` is still fresh at `now_millis`
    pub fn is_fresh<T>(&self, entry: &CacheEntry<T>, now_millis: u64) -> bool {
        self.is_fresh_at(entry.fetched_at_millis, now_millis)
    }
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_DURATION_MS)
    }
}
