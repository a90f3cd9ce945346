//! In-memory TTL storage

use std::{
    borrow::Borrow,
    collections::HashMap,
    fmt,
    hash::Hash,
    sync::Arc,
};

use serde::{Deserialize, Serialize};

use crate::{
    clock::{Clock, SystemClock},
    strategy::TtlPolicy,
};

/// Cached data plus the time it was fetched
///
/// Entries are immutable once stored. A refresh replaces the whole entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The cached data
    pub data: T,
    /// When the data was fetched (milliseconds since the Unix epoch)
    pub fetched_at_millis: u64,
}

impl<T> CacheEntry<T> {
    /// Create a new cache entry
    pub fn new(data: T, fetched_at_millis: u64) -> Self {
        Self {
            data,
            fetched_at_millis,
        }
    }

    /// Age of the entry at `now_millis`
    pub fn age_millis(&self, now_millis: u64) -> u64 {
        now_millis.saturating_sub(self.fetched_at_millis)
    }
}

/// Outcome of a cache read
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup<'a, V> {
    /// Present and within TTL
    Fresh(&'a V),
    /// Present but expired; the record is kept
    Stale,
    /// Never stored or removed
    Missing,
}

impl<'a, V> Lookup<'a, V> {
    /// The fresh value, if any
    pub fn fresh(self) -> Option<&'a V> {
        match self {
            Lookup::Fresh(value) => Some(value),
            Lookup::Stale | Lookup::Missing => None,
        }
    }
}

/// Key-scoped, time-expiring cache
///
/// Expiry is evaluated lazily on every read. Nothing is evicted in the
/// background and a stale record stays in place until it is overwritten or
/// explicitly removed.
pub struct TtlCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    policy: TtlPolicy,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
{
    /// Create a cache using the wall clock
    pub fn new(policy: TtlPolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    /// Create a cache with a custom clock
    pub fn with_clock(policy: TtlPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            policy,
            clock,
        }
    }

    /// Freshness policy in effect
    pub fn policy(&self) -> TtlPolicy {
        self.policy
    }

    /// Classify the entry under `key`
    pub fn lookup<Q>(&self, key: &Q) -> Lookup<'_, V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        match self.entries.get(key) {
            None => Lookup::Missing,
            Some(entry) if self.policy.is_fresh(entry, self.clock.now_millis()) => {
                Lookup::Fresh(&entry.data)
            }
            Some(_) => Lookup::Stale,
        }
    }

    /// Fresh value under `key`, treating stale entries as a miss
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.lookup(key).fresh()
    }

    /// Whether `key` holds an entry younger than `ttl_millis`
    pub fn has_fresh<Q>(&self, key: &Q, ttl_millis: u64) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let now = self.clock.now_millis();
        self.entries
            .get(key)
            .is_some_and(|entry| TtlPolicy::new(ttl_millis).is_fresh(entry, now))
    }

    /// Raw record under `key`, fresh or stale
    pub fn entry<Q>(&self, key: &Q) -> Option<&CacheEntry<V>>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.get(key)
    }

    /// Store `data` under `key`, stamped with the current time
    ///
    /// Any previous entry is replaced (last write wins).
    pub fn set(&mut self, key: K, data: V) {
        let entry = CacheEntry::new(data, self.clock.now_millis());
        self.entries.insert(key, entry);
    }

    /// Remove the entry under `key`, returning whether one existed
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.remove(key).is_some()
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored records, including stale ones
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no records are stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> fmt::Debug for TtlCache<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache")
            .field("entries", &self.entries)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
