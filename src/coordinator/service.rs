//! Request coordinator
//!
//! Decides between serving a cached response and fetching from the backend,
//! coalesces concurrent misses for the same key, and drops results of
//! fetches that a newer request for the same key has superseded.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::cache::{CacheKey, CacheStats, CachedResponse, Descriptor, ResourceType, ResponseCache};
use crate::coordinator::{GenerationTracker, RequestStatus, ResourceStatus, StatusBoard};
use crate::error::{CacheError, Result};
use crate::fetch::{FetchClient, FetchError};
use crate::models::{Payload, SearchKind, Suggestion};

/// Outcomes `load` waits for before giving up on a key whose fetches keep
/// getting superseded.
const MAX_LOAD_ATTEMPTS: usize = 3;

type PendingFetch = Shared<BoxFuture<'static, Outcome>>;

/// Result of an `ensure` or `refresh` call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Already cached, nothing fetched
    Hit,
    /// Fetched and stored (possibly by a request this one joined)
    Fetched,
    /// The fetch failed; the error is also recorded in the key's status
    Failed(FetchError),
    /// The fetch completed after a newer one was issued for the same key and was discarded
    Superseded,
}

/// Where a loaded response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Network,
}

/// A cached response ready to be rendered.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub key: CacheKey,
    pub entry: Arc<CachedResponse>,
    pub source: Source,
}

/// State guarded together so status, generations and in-flight fetches agree.
#[derive(Default)]
struct Tracking {
    generations: GenerationTracker,
    status: StatusBoard,
    in_flight: HashMap<CacheKey, PendingFetch>,
}

/// Owns the response cache and coordinates fetches into it.
///
/// Cheap to clone; clones share state. Locks are always taken in the order
/// tracking, then cache.
#[derive(Clone)]
pub struct Coordinator {
    fetcher: Arc<dyn FetchClient>,
    cache: Arc<RwLock<ResponseCache>>,
    tracking: Arc<Mutex<Tracking>>,
}

impl Coordinator {
    pub fn new(fetcher: Arc<dyn FetchClient>) -> Self {
        Self {
            fetcher,
            cache: Arc::new(RwLock::new(ResponseCache::new())),
            tracking: Arc::new(Mutex::new(Tracking::default())),
        }
    }

    // == Ensure ==
    /// Makes sure a response for the descriptor is cached.
    ///
    /// A hit issues no fetch. A miss joins the fetch already in flight for the
    /// same key, or starts one.
    pub async fn ensure(&self, resource: ResourceType, descriptor: &Descriptor) -> Outcome {
        self.ensure_key(CacheKey::new(resource, descriptor)).await
    }

    async fn ensure_key(&self, key: CacheKey) -> Outcome {
        let pending = {
            let mut tracking = self.tracking.lock().await;

            if self.cache.write().await.lookup(&key).is_some() {
                debug!("Cache hit for {}", key);
                return Outcome::Hit;
            }

            if let Some(pending) = tracking.in_flight.get(&key).cloned() {
                debug!("Joining in-flight fetch for {}", key);
                self.cache.write().await.stats_mut().record_join();
                pending
            } else {
                self.start_fetch(&mut tracking, key).await
            }
        };

        pending.await
    }

    // == Refresh ==
    /// Fetches the descriptor again even if it is cached.
    ///
    /// Any fetch still in flight for the key is superseded: its result will
    /// be discarded when it arrives.
    pub async fn refresh(&self, resource: ResourceType, descriptor: &Descriptor) -> Outcome {
        self.refresh_key(CacheKey::new(resource, descriptor)).await
    }

    async fn refresh_key(&self, key: CacheKey) -> Outcome {
        let pending = {
            let mut tracking = self.tracking.lock().await;
            self.start_fetch(&mut tracking, key).await
        };
        pending.await
    }

    /// Issues a new generation for `key` and spawns its fetch.
    ///
    /// The fetch runs in its own task so it settles even if every caller
    /// waiting on it goes away.
    async fn start_fetch(&self, tracking: &mut Tracking, key: CacheKey) -> PendingFetch {
        let generation = tracking.generations.issue(&key);
        tracking.status.mark_loading(&key, generation);
        self.cache.write().await.stats_mut().record_fetch();
        debug!("Fetching {} (generation {})", key, generation);

        let task = {
            let fetcher = Arc::clone(&self.fetcher);
            let cache = Arc::clone(&self.cache);
            let tracking = Arc::clone(&self.tracking);
            let key = key.clone();
            tokio::spawn(async move {
                let result = fetcher.fetch(&key).await;
                settle(&cache, &tracking, key, generation, result).await
            })
        };

        let pending = {
            let cache = Arc::clone(&self.cache);
            let tracking = Arc::clone(&self.tracking);
            let key = key.clone();
            async move {
                match task.await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        let err = FetchError::Transport(format!("fetch task failed: {}", e));
                        settle(&cache, &tracking, key, generation, Err(err)).await
                    }
                }
            }
            .boxed()
            .shared()
        };

        tracking.in_flight.insert(key, pending.clone());
        pending
    }

    // == Load ==
    /// Ensures (or refreshes) a descriptor and returns its cached entry.
    ///
    /// Fetch failures come back as errors. A superseded fetch is followed by
    /// another `ensure`, which joins the newer request.
    pub async fn load(
        &self,
        resource: ResourceType,
        descriptor: &Descriptor,
        refresh: bool,
    ) -> Result<Loaded> {
        let key = CacheKey::new(resource, descriptor);
        if key.company_id().is_empty() {
            return Err(CacheError::InvalidRequest(
                "Company id cannot be empty".to_string(),
            ));
        }

        let mut outcome = if refresh {
            self.refresh_key(key.clone()).await
        } else {
            self.ensure_key(key.clone()).await
        };

        let mut attempts = 1;
        loop {
            let source = match outcome {
                Outcome::Hit => Some(Source::Cache),
                Outcome::Fetched => Some(Source::Network),
                Outcome::Failed(err) => return Err(err.into()),
                Outcome::Superseded => None,
            };

            if let Some(source) = source {
                if let Some(entry) = self.cache.read().await.peek(&key) {
                    return Ok(Loaded { key, entry, source });
                }
            }
            if attempts == MAX_LOAD_ATTEMPTS {
                break;
            }
            attempts += 1;
            debug!("Retrying load of {} (attempt {})", key, attempts);
            outcome = self.ensure_key(key.clone()).await;
        }

        warn!("Gave up loading {} after {} attempts", key, MAX_LOAD_ATTEMPTS);
        Err(CacheError::Internal(format!(
            "Gave up loading {} after {} superseded attempts",
            key, MAX_LOAD_ATTEMPTS
        )))
    }

    // == Reads ==
    /// Cached entry for a descriptor, without fetching or counting a lookup.
    pub async fn peek(
        &self,
        resource: ResourceType,
        descriptor: &Descriptor,
    ) -> Option<Arc<CachedResponse>> {
        self.cache
            .read()
            .await
            .peek(&CacheKey::new(resource, descriptor))
    }

    pub async fn status(&self, resource: ResourceType, descriptor: &Descriptor) -> RequestStatus {
        self.tracking
            .lock()
            .await
            .status
            .get(&CacheKey::new(resource, descriptor))
    }

    pub async fn resource_status(&self, resource: ResourceType) -> ResourceStatus {
        self.tracking.lock().await.status.resource(resource)
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    // == Search ==
    /// Search-as-you-type pass-through. Results are never cached.
    pub async fn search(&self, kind: SearchKind, query: &str) -> Result<Vec<Suggestion>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Searching {} for '{}'", kind, query);
        self.fetcher.search(kind, query).await.map_err(|e| {
            warn!("Search {} for '{}' failed: {}", kind, query, e);
            CacheError::from(e)
        })
    }
}

/// Applies a finished fetch, unless a newer generation was issued for the key.
async fn settle(
    cache: &RwLock<ResponseCache>,
    tracking: &Mutex<Tracking>,
    key: CacheKey,
    generation: u64,
    result: std::result::Result<Payload, FetchError>,
) -> Outcome {
    let mut tracking = tracking.lock().await;
    let mut cache = cache.write().await;

    if !tracking.generations.is_latest(&key, generation) {
        cache.stats_mut().record_superseded();
        debug!(
            "Discarding superseded response for {} (generation {})",
            key, generation
        );
        return Outcome::Superseded;
    }

    tracking.in_flight.remove(&key);

    let stored = result.and_then(|payload| {
        cache
            .insert(key.clone(), CachedResponse::new(payload, generation))
            .map_err(|e| FetchError::Decode(e.to_string()))
    });

    match stored {
        Ok(()) => {
            tracking.status.mark_ready(&key);
            info!("Cached {} (generation {})", key, generation);
            Outcome::Fetched
        }
        Err(err) => {
            cache.stats_mut().record_failure();
            tracking.status.mark_failed(&key, err.to_string());
            warn!("Fetch for {} failed: {}", key, err);
            Outcome::Failed(err)
        }
    }
}
