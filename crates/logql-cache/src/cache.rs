//! Label and label-value caches scoped to a Loki source

use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;
use tracing::trace;

use crate::{
    clock::{Clock, SystemClock},
    metrics::{CacheMetrics, CacheStats},
    storage::{Lookup, TtlCache},
    strategy::TtlPolicy,
};

type Values = Vec<String>;

struct Namespaces {
    /// source -> label names
    labels: TtlCache<String, Values>,
    /// source -> label -> values
    values: HashMap<String, TtlCache<String, Values>>,
}

/// Session-owned cache of label names and label values
///
/// Two independent namespaces live behind one lock: label names keyed by
/// source identity (the Loki base URL) and label values keyed by source then
/// label name. The lock is only held for the duration of a single read or
/// write, so a read followed by a fetch and a write is not atomic: parallel
/// fetches for the same key race and the last write wins.
pub struct LabelCache {
    inner: Mutex<Namespaces>,
    policy: TtlPolicy,
    clock: Arc<dyn Clock>,
    metrics: CacheMetrics,
}

impl LabelCache {
    /// Create a cache using the wall clock
    pub fn new(policy: TtlPolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    /// Create a cache with a custom clock
    pub fn with_clock(policy: TtlPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(Namespaces {
                labels: TtlCache::with_clock(policy, clock.clone()),
                values: HashMap::new(),
            }),
            policy,
            clock,
            metrics: CacheMetrics::new(),
        }
    }

    /// Freshness policy shared by both namespaces
    pub fn policy(&self) -> TtlPolicy {
        self.policy
    }

    /// Counter snapshot
    pub fn stats(&self) -> CacheStats {
        self.metrics.snapshot()
    }

    /// Fresh label names for `source`
    pub fn labels(&self, source: &str) -> Option<Values> {
        let inner = self.inner.lock();
        let found = self.observe(inner.labels.lookup(source));
        trace!(source, hit = found.is_some(), "label cache read");
        found
    }

    /// Store label names for `source`, replacing any previous entry
    pub fn store_labels(&self, source: &str, labels: Values) {
        self.inner.lock().labels.set(source.to_string(), labels);
        self.metrics.record_store();
    }

    /// Fresh values of `label` for `source`
    pub fn values(&self, source: &str, label: &str) -> Option<Values> {
        let inner = self.inner.lock();
        let lookup = inner
            .values
            .get(source)
            .map_or(Lookup::Missing, |by_label| by_label.lookup(label));
        let found = self.observe(lookup);
        trace!(source, label, hit = found.is_some(), "value cache read");
        found
    }

    /// Store values of `label` for `source`, replacing any previous entry
    pub fn store_values(&self, source: &str, label: &str, values: Values) {
        let mut inner = self.inner.lock();
        inner
            .values
            .entry(source.to_string())
            .or_insert_with(|| TtlCache::with_clock(self.policy, self.clock.clone()))
            .set(label.to_string(), values);
        self.metrics.record_store();
    }

    /// Drop everything in both namespaces
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.labels.clear();
        inner.values.clear();
    }

    /// Drop cached label names for `source`, or for every source when `None`
    pub fn clear_labels(&self, source: Option<&str>) {
        let mut inner = self.inner.lock();
        match source {
            Some(source) => {
                inner.labels.delete(source);
            }
            None => inner.labels.clear(),
        }
    }

    /// Drop cached values
    ///
    /// - known `source` and `label`: only that label's values
    /// - known `source`, no label: every label of that source
    /// - no source, or a source with nothing cached: all values of all sources
    pub fn clear_values(&self, source: Option<&str>, label: Option<&str>) {
        let mut inner = self.inner.lock();
        match (source, label) {
            (Some(source), Some(label)) if inner.values.contains_key(source) => {
                if let Some(by_label) = inner.values.get_mut(source) {
                    by_label.delete(label);
                }
            }
            (Some(source), None) if inner.values.contains_key(source) => {
                inner.values.remove(source);
            }
            _ => inner.values.clear(),
        }
    }

    /// Raw fetch time of the label entry for `source`, fresh or stale
    pub fn labels_fetched_at(&self, source: &str) -> Option<u64> {
        self.inner
            .lock()
            .labels
            .entry(source)
            .map(|entry| entry.fetched_at_millis)
    }

    /// Raw fetch time of the value entry for `source`/`label`, fresh or stale
    pub fn values_fetched_at(&self, source: &str, label: &str) -> Option<u64> {
        self.inner
            .lock()
            .values
            .get(source)
            .and_then(|by_label| by_label.entry(label))
            .map(|entry| entry.fetched_at_millis)
    }

    fn observe(&self, lookup: Lookup<'_, Values>) -> Option<Values> {
        match lookup {
            Lookup::Fresh(values) => {
                self.metrics.record_hit();
                Some(values.clone())
            }
            Lookup::Stale => {
                self.metrics.record_stale();
                None
            }
            Lookup::Missing => {
                self.metrics.record_miss();
                None
            }
        }
    }
}

impl Default for LabelCache {
    fn default() -> Self {
        Self::new(TtlPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    const A: &str = "http://loki-a:3100";
    const B: &str = "http://loki-b:3100";

    fn strings(items: &[&str]) -> Values {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn cache() -> (Arc<ManualClock>, LabelCache) {
        let clock = Arc::new(ManualClock::new(1_000));
        let cache = LabelCache::with_clock(TtlPolicy::new(300_000), clock.clone());
        (clock, cache)
    }

    fn seeded() -> LabelCache {
        let (_clock, cache) = cache();
        cache.store_values(A, "job", strings(&["api"]));
        cache.store_values(A, "env", strings(&["prod"]));
        cache.store_values(B, "job", strings(&["worker"]));
        cache
    }

    #[test]
    fn test_labels_expire_lazily() {
        let (clock, cache) = cache();
        cache.store_labels(A, strings(&["job", "env"]));
        assert_eq!(cache.labels(A), Some(strings(&["job", "env"])));

        clock.advance(300_000);
        assert_eq!(cache.labels(A), None);
        assert_eq!(cache.labels_fetched_at(A), Some(1_000));
    }

    #[test]
    fn test_label_namespace_is_per_source() {
        let (_clock, cache) = cache();
        cache.store_labels(A, strings(&["job"]));
        assert_eq!(cache.labels(B), None);

        cache.clear_labels(Some(A));
        assert_eq!(cache.labels(A), None);
    }

    #[test]
    fn test_clear_one_label_keeps_siblings_and_other_sources() {
        let cache = seeded();
        cache.clear_values(Some(A), Some("job"));

        assert_eq!(cache.values(A, "job"), None);
        assert_eq!(cache.values(A, "env"), Some(strings(&["prod"])));
        assert_eq!(cache.values(B, "job"), Some(strings(&["worker"])));
    }

    #[test]
    fn test_clear_source_values_keeps_other_sources() {
        let cache = seeded();
        cache.clear_values(Some(A), None);

        assert_eq!(cache.values(A, "job"), None);
        assert_eq!(cache.values(A, "env"), None);
        assert_eq!(cache.values(B, "job"), Some(strings(&["worker"])));
    }

    #[test]
    fn test_clear_values_without_known_source_clears_all() {
        let cache = seeded();
        cache.clear_values(Some("http://unknown"), Some("job"));
        assert_eq!(cache.values(B, "job"), None);

        let cache = seeded();
        cache.clear_values(None, None);
        assert_eq!(cache.values(A, "env"), None);
    }

    #[test]
    fn test_clear_values_leaves_labels() {
        let cache = seeded();
        cache.store_labels(A, strings(&["job"]));
        cache.clear_values(None, None);
        assert_eq!(cache.labels(A), Some(strings(&["job"])));

        cache.clear();
        assert_eq!(cache.labels(A), None);
    }

    #[test]
    fn test_last_write_wins() {
        let (_clock, cache) = cache();
        cache.store_values(A, "job", strings(&["first"]));
        cache.store_values(A, "job", strings(&["second"]));
        assert_eq!(cache.values(A, "job"), Some(strings(&["second"])));
    }

    #[test]
    fn test_stats_track_reads() {
        let (clock, cache) = cache();
        assert_eq!(cache.labels(A), None);
        cache.store_labels(A, Vec::new());
        assert_eq!(cache.labels(A), Some(Vec::new()));
        clock.advance(300_000);
        assert_eq!(cache.labels(A), None);

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.stale_hits, 1);
        assert_eq!(stats.stores, 1);
    }
}
