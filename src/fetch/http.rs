//! HTTP fetch client
//!
//! reqwest-backed [`FetchClient`] for the company data JSON API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};
use url::Url;

use crate::cache::{CacheKey, ResourceType};
use crate::fetch::{FetchClient, FetchError};
use crate::models::{Payload, SearchKind, Suggestion};

/// Longest error body kept in a [`FetchError::Status`] message.
const MAX_ERROR_BODY: usize = 200;

/// Fetch client talking to the backend over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFetchClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpFetchClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Arguments
    /// * `base_url` - e.g. `http://localhost:8080/api`
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Backend URL serving `key`.
    pub fn endpoint(&self, key: &CacheKey) -> Result<Url, FetchError> {
        let id = key.company_id();
        // Dot segments would be resolved away and address another endpoint
        if id.is_empty() || id == "." || id == ".." {
            return Err(FetchError::InvalidUrl(format!("company id '{}'", id)));
        }
        let segments = match key.resource() {
            ResourceType::Overview => vec!["companies", id],
            ResourceType::Reviews => vec!["companies", id, "reviews"],
            ResourceType::Salaries => vec!["companies", id, "salaries"],
            ResourceType::Stocks => vec!["companies", id, "stock"],
            ResourceType::Taxes => vec!["companies", id, "taxes"],
        };
        self.build_url(&segments, &key.query_pairs())
    }

    /// Backend URL for a search-as-you-type query.
    pub fn search_endpoint(&self, kind: SearchKind, query: &str) -> Result<Url, FetchError> {
        self.build_url(&["search", kind.as_str()], &[("q", query.to_string())])
    }

    fn build_url(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(name, value)| (*name, value.as_str())));
        }
        Ok(url)
    }

    /// GETs `url` and returns the body of a 2xx response.
    async fn get_body(&self, url: Url) -> Result<Vec<u8>, FetchError> {
        debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!("Request to {} failed: {}", url, e);
            FetchError::Transport(e.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.path().to_string()));
        }
        if !status.is_success() {
            let mut message = response.text().await.unwrap_or_default();
            if message.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !message.is_char_boundary(cut) {
                    cut -= 1;
                }
                message.truncate(cut);
            }
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl FetchClient for HttpFetchClient {
    async fn fetch(&self, key: &CacheKey) -> Result<Payload, FetchError> {
        let url = self.endpoint(key)?;
        let body = self.get_body(url).await?;
        Payload::decode(key.resource(), &body)
            .map_err(|e| FetchError::Decode(format!("{}: {}", key, e)))
    }

    async fn search(&self, kind: SearchKind, query: &str) -> Result<Vec<Suggestion>, FetchError> {
        let url = self.search_endpoint(kind, query)?;
        let body = self.get_body(url).await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(format!("search {}: {}", kind, e)))
    }
}
