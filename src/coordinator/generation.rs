//! Request generation tracking
//!
//! Every fetch gets a sequence number; only the latest one issued for a key
//! may write its result.

use std::collections::HashMap;

use crate::cache::CacheKey;

#[derive(Debug, Default)]
pub struct GenerationTracker {
    /// Last generation handed out, across all keys
    last_issued: u64,
    /// Latest generation issued per key
    latest: HashMap<CacheKey, u64>,
}

impl GenerationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps a new request for `key` and returns its generation.
    pub fn issue(&mut self, key: &CacheKey) -> u64 {
        self.last_issued += 1;
        self.latest.insert(key.clone(), self.last_issued);
        self.last_issued
    }

    /// Whether `generation` is still the newest request issued for `key`.
    pub fn is_latest(&self, key: &CacheKey, generation: u64) -> bool {
        self.latest.get(key) == Some(&generation)
    }
}
