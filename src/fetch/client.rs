//! Fetch client abstraction
//!
//! The seam between the request coordinator and whatever talks to the backend.

use async_trait::async_trait;
use thiserror::Error;

use crate::cache::CacheKey;
use crate::models::{Payload, SearchKind, Suggestion};

/// Failure at the fetch boundary.
///
/// `Clone` so a single failed fetch can be handed to every request that joined it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The backend has no such record
    #[error("Not found: {0}")]
    NotFound(String),

    /// The body did not match the expected payload shape
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// A request URL could not be built from the base URL and key
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Issues backend requests for one cache key or search query.
#[async_trait]
pub trait FetchClient: Send + Sync {
    /// Fetches the payload for a key. The payload must match `key.resource()`.
    async fn fetch(&self, key: &CacheKey) -> Result<Payload, FetchError>;

    /// Runs a search-as-you-type query.
    async fn search(&self, kind: SearchKind, query: &str) -> Result<Vec<Suggestion>, FetchError>;
}
