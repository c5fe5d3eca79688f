//! Loading / error status
//!
//! Status is kept per cache key. The per-resource view aggregates it: loading
//! while any key of the resource is in flight, and the error of whichever key
//! of the resource settled last. A key starting a new fetch clears its own
//! error, not the aggregate one.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::{CacheKey, ResourceType};

/// Status of one cache key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestStatus {
    pub loading: bool,
    pub error: Option<String>,
    /// Generation of the most recent request for this key (0 = never requested)
    pub generation: u64,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Status of one key, as listed in a [`ResourceStatus`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyStatus {
    pub key: CacheKey,
    #[serde(flatten)]
    pub status: RequestStatus,
}

/// Aggregate status of a resource type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceStatus {
    pub resource: ResourceType,
    pub loading: bool,
    pub error: Option<String>,
    pub keys: Vec<KeyStatus>,
}

#[derive(Debug, Default)]
pub struct StatusBoard {
    entries: HashMap<CacheKey, RequestStatus>,
    /// Outcome of the most recent settle per resource
    last_settled_error: HashMap<ResourceType, Option<String>>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A request with `generation` started for `key`. Clears any previous error.
    pub fn mark_loading(&mut self, key: &CacheKey, generation: u64) {
        let status = self.entries.entry(key.clone()).or_default();
        status.loading = true;
        status.error = None;
        status.generation = generation;
        status.updated_at = Some(Utc::now());
    }

    pub fn mark_ready(&mut self, key: &CacheKey) {
        self.settle(key, None);
    }

    pub fn mark_failed(&mut self, key: &CacheKey, message: impl Into<String>) {
        self.settle(key, Some(message.into()));
    }

    fn settle(&mut self, key: &CacheKey, error: Option<String>) {
        let status = self.entries.entry(key.clone()).or_default();
        status.loading = false;
        status.error = error.clone();
        status.updated_at = Some(Utc::now());
        self.last_settled_error.insert(key.resource(), error);
    }

    /// Status of `key`; idle if it was never requested.
    pub fn get(&self, key: &CacheKey) -> RequestStatus {
        self.entries.get(key).cloned().unwrap_or_default()
    }

    pub fn resource(&self, resource: ResourceType) -> ResourceStatus {
        let mut keys: Vec<KeyStatus> = self
            .entries
            .iter()
            .filter(|(key, _)| key.resource() == resource)
            .map(|(key, status)| KeyStatus {
                key: key.clone(),
                status: status.clone(),
            })
            .collect();
        keys.sort_by_cached_key(|entry| entry.key.to_string());

        let loading = keys.iter().any(|entry| entry.status.loading);
        let error = self.last_settled_error.get(&resource).cloned().flatten();

        ResourceStatus {
            resource,
            loading,
            error,
            keys,
        }
    }
}
