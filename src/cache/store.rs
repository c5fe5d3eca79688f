//! Response Cache Module
//!
//! Keyed store of the last successful response per canonical descriptor.

use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::{CacheKey, CacheStats, CachedResponse, Descriptor, ResourceType};
use crate::error::{CacheError, Result};
use crate::models::Payload;

// == Response Cache ==
/// Map from `(resource type, canonical descriptor)` to the last stored response.
///
/// Entries live until the cache is dropped; a write to an existing key
/// replaces it regardless of what was there (last write wins).
#[derive(Debug, Default)]
pub struct ResponseCache {
    /// Stored responses
    entries: HashMap<CacheKey, Arc<CachedResponse>>,
    /// Performance statistics
    stats: CacheStats,
}

impl ResponseCache {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Returns the cached response for a descriptor, recording a hit or miss.
    pub fn get(
        &mut self,
        resource: ResourceType,
        descriptor: &Descriptor,
    ) -> Option<Arc<CachedResponse>> {
        self.lookup(&CacheKey::new(resource, descriptor))
    }

    /// Like [`ResponseCache::get`] for an already built key.
    pub fn lookup(&mut self, key: &CacheKey) -> Option<Arc<CachedResponse>> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(Arc::clone(entry))
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Reads an entry without touching statistics.
    pub fn peek(&self, key: &CacheKey) -> Option<Arc<CachedResponse>> {
        self.entries.get(key).cloned()
    }

    // == Set ==
    /// Stores a payload for a descriptor, replacing any previous entry.
    pub fn set(
        &mut self,
        resource: ResourceType,
        descriptor: &Descriptor,
        payload: Payload,
    ) -> Result<()> {
        self.insert(
            CacheKey::new(resource, descriptor),
            CachedResponse::new(payload, 0),
        )
    }

    /// Stores a prepared entry under `key`.
    ///
    /// The payload must belong to the key's resource type.
    pub fn insert(&mut self, key: CacheKey, entry: CachedResponse) -> Result<()> {
        if entry.payload.resource() != key.resource() {
            return Err(CacheError::InvalidRequest(format!(
                "Payload of type {} cannot be stored under {}",
                entry.payload.resource(),
                key
            )));
        }

        self.entries.insert(key, Arc::new(entry));
        self.stats.record_store();
        self.stats.set_total_entries(self.entries.len());
        Ok(())
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Counters updated by the request coordinator.
    pub(crate) fn stats_mut(&mut self) -> &mut CacheStats {
        &mut self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
