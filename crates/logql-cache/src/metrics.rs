//! Cache hit/miss counters

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use serde::{Deserialize, Serialize};

/// Point-in-time cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Reads answered from a fresh entry
    pub hits: u64,
    /// Reads with no entry at all
    pub misses: u64,
    /// Reads that found an expired entry
    pub stale_hits: u64,
    /// Writes after a successful fetch
    pub stores: u64,
}

impl CacheStats {
    /// Calculate hit rate as a percentage (0.0 to 100.0)
    ///
    /// Stale reads count against the hit rate.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses + self.stale_hits;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Thread-safe cache metrics tracker
#[derive(Debug, Clone, Default)]
pub struct CacheMetrics {
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    stale_hits: Arc<AtomicU64>,
    stores: Arc<AtomicU64>,
}

impl CacheMetrics {
    /// Create new cache metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cache hit
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cache miss
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a read that found only an expired record
    pub fn record_stale(&self) {
        self.stale_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a store
    pub fn record_store(&self) {
        self.stores.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot the counters
    pub fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stale_hits: self.stale_hits.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.stale_hits.store(0, Ordering::Relaxed);
        self.stores.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate_calculation() {
        let metrics = CacheMetrics::new();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_miss();

        let stats = metrics.snapshot();
        assert_eq!(stats.hits, 3);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_rate(), 75.0);
    }

    #[test]
    fn test_empty_hit_rate() {
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }

    #[test]
    fn test_clones_share_counters() {
        let metrics = CacheMetrics::new();
        let other = metrics.clone();
        other.record_store();
        other.record_stale();

        let stats = metrics.snapshot();
        assert_eq!(stats.stores, 1);
        assert_eq!(stats.stale_hits, 1);

        metrics.reset();
        assert_eq!(other.snapshot(), CacheStats::default());
    }
}
