//! Cache Entry Module
//!
//! Defines the immutable record stored for each cache key.

use chrono::{DateTime, Utc};

use crate::models::Payload;

// == Cached Response ==
/// Last successful response for one cache key.
///
/// Never mutated after insertion; a refetch replaces the whole entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedResponse {
    /// The response body
    pub payload: Payload,
    /// When the fetch that produced this entry completed
    pub fetched_at: DateTime<Utc>,
    /// Generation of the request that produced this entry
    pub generation: u64,
}

impl CachedResponse {
    // == Constructor ==
    /// Creates an entry stamped with the current time.
    pub fn new(payload: Payload, generation: u64) -> Self {
        Self {
            payload,
            fetched_at: Utc::now(),
            generation,
        }
    }

    // == Age ==
    /// Milliseconds since the entry was fetched.
    pub fn age_ms(&self) -> i64 {
        (Utc::now() - self.fetched_at).num_milliseconds().max(0)
    }
}
