//! API Handlers
//!
//! HTTP request handlers for each cache service endpoint. Each data handler
//! plays the part of a company-details view: it asks the coordinator for its
//! descriptor and renders whatever ends up in the cache.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;

use super::extract::{ApiPath, ApiQuery};
use crate::cache::{Descriptor, ResourceType};
use crate::config::Config;
use crate::coordinator::{Coordinator, ResourceStatus};
use crate::error::{CacheError, Result};
use crate::fetch::{FetchClient, HttpFetchClient};
use crate::models::requests::company_descriptor;
use crate::models::{
    DataResponse, HealthResponse, PageLimits, RefreshQuery, ReviewsQuery, SalariesQuery,
    SearchKind, SearchQuery, SearchResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// The coordinator owns the cache; clones share it.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Coordinator,
    pub limits: PageLimits,
}

impl AppState {
    /// Creates a new AppState around a fetch client.
    pub fn new(fetcher: Arc<dyn FetchClient>, limits: PageLimits) -> Self {
        Self {
            coordinator: Coordinator::new(fetcher),
            limits,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds an HTTP fetch client for the configured backend.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpFetchClient::new(&config.backend_url, config.fetch_timeout())?;
        info!("Using backend at {}", fetcher.base_url());
        Ok(Self::new(Arc::new(fetcher), PageLimits::from(config)))
    }
}

async fn load(
    state: &AppState,
    resource: ResourceType,
    descriptor: &Descriptor,
    refresh: bool,
) -> Result<Json<DataResponse>> {
    let loaded = state.coordinator.load(resource, descriptor, refresh).await?;
    Ok(Json(DataResponse::from(loaded)))
}

/// Handler for GET /companies/:id/overview
pub async fn overview_handler(
    State(state): State<AppState>,
    ApiPath(company_id): ApiPath<String>,
    ApiQuery(query): ApiQuery<RefreshQuery>,
) -> Result<Json<DataResponse>> {
    let descriptor = company_descriptor(&company_id)?;
    load(&state, ResourceType::Overview, &descriptor, query.refresh).await
}

/// Handler for GET /companies/:id/reviews
pub async fn reviews_handler(
    State(state): State<AppState>,
    ApiPath(company_id): ApiPath<String>,
    ApiQuery(query): ApiQuery<ReviewsQuery>,
) -> Result<Json<DataResponse>> {
    let descriptor = query.to_descriptor(&company_id, state.limits)?;
    load(&state, ResourceType::Reviews, &descriptor, query.refresh).await
}

/// Handler for GET /companies/:id/salaries
pub async fn salaries_handler(
    State(state): State<AppState>,
    ApiPath(company_id): ApiPath<String>,
    ApiQuery(query): ApiQuery<SalariesQuery>,
) -> Result<Json<DataResponse>> {
    let descriptor = query.to_descriptor(&company_id, state.limits)?;
    load(&state, ResourceType::Salaries, &descriptor, query.refresh).await
}

/// Handler for GET /companies/:id/stocks
pub async fn stocks_handler(
    State(state): State<AppState>,
    ApiPath(company_id): ApiPath<String>,
    ApiQuery(query): ApiQuery<RefreshQuery>,
) -> Result<Json<DataResponse>> {
    let descriptor = company_descriptor(&company_id)?;
    load(&state, ResourceType::Stocks, &descriptor, query.refresh).await
}

/// Handler for GET /companies/:id/taxes
pub async fn taxes_handler(
    State(state): State<AppState>,
    ApiPath(company_id): ApiPath<String>,
    ApiQuery(query): ApiQuery<RefreshQuery>,
) -> Result<Json<DataResponse>> {
    let descriptor = company_descriptor(&company_id)?;
    load(&state, ResourceType::Taxes, &descriptor, query.refresh).await
}

/// Handler for GET /status/:resource
///
/// Aggregate loading/error status of a resource type plus every key's own status.
pub async fn status_handler(
    State(state): State<AppState>,
    ApiPath(resource): ApiPath<String>,
) -> Result<Json<ResourceStatus>> {
    let resource: ResourceType = resource.parse()?;
    Ok(Json(state.coordinator.resource_status(resource).await))
}

/// Handler for GET /search/:kind
pub async fn search_handler(
    State(state): State<AppState>,
    ApiPath(kind): ApiPath<String>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<SearchResponse>> {
    let kind: SearchKind = kind.parse()?;
    if let Some(error_msg) = query.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let results = state.coordinator.search(kind, &query.q).await?;
    Ok(Json(SearchResponse {
        kind,
        query: query.q.trim().to_string(),
        results,
    }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.coordinator.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
