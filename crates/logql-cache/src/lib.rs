//! # LogQL Cache
//!
//! Time-expiring caches for label names and per-label values fetched from a
//! Loki endpoint.
//!
//! ## Features
//!
//! - **Lazy expiry**: freshness is checked at read time, stale records stay until overwritten
//! - **Two namespaces**: labels keyed by source, values keyed by source then label
//! - **Injectable clock**: [`ManualClock`] drives expiry in tests
//! - **Hit/miss counters**: [`CacheStats`] snapshots for diagnostics

pub mod cache;
pub mod clock;
pub mod metrics;
pub mod storage;
pub mod strategy;

pub use cache::LabelCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use metrics::{CacheMetrics, CacheStats};
pub use storage::{CacheEntry, TtlCache};
pub use strategy::{TtlPolicy, DEFAULT_CACHE_DURATION_MS};
