//! Lookup and fetch counters
//!
//! Reported by `GET /stats`. Lookup counters are bumped by the store, fetch
//! counters by the coordinator.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache and fetch metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that found no entry
    pub misses: u64,
    /// Responses written to the cache
    pub stores: u64,
    /// Fetches issued to the backend
    pub fetches: u64,
    /// Fetches that ended in an error
    pub failures: u64,
    /// Requests that joined a fetch already in flight
    pub joined: u64,
    /// Completed fetches discarded because a newer one was issued for the same key
    pub superseded: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of lookups served from the cache; 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            lookups => self.hits as f64 / lookups as f64,
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_store(&mut self) {
        self.stores += 1;
    }

    pub fn record_fetch(&mut self) {
        self.fetches += 1;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    pub fn record_join(&mut self) {
        self.joined += 1;
    }

    pub fn record_superseded(&mut self) {
        self.superseded += 1;
    }

    pub(crate) fn set_total_entries(&mut self, entries: usize) {
        self.total_entries = entries;
    }
}
