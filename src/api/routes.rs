//! API Routes
//!
//! Configures the Axum router with all cache service endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    health_handler, overview_handler, reviews_handler, salaries_handler, search_handler,
    stats_handler, status_handler, stocks_handler, taxes_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /companies/:id/overview` - Company overview
/// - `GET /companies/:id/reviews` - Paginated, filtered reviews
/// - `GET /companies/:id/salaries` - Paginated, filtered salaries
/// - `GET /companies/:id/stocks` - Stock snapshot
/// - `GET /companies/:id/taxes` - Tax history
/// - `GET /status/:resource` - Loading/error status of a resource type
/// - `GET /search/:kind` - Search-as-you-type pass-through
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (front ends are served from elsewhere)
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/companies/:id/overview", get(overview_handler))
        .route("/companies/:id/reviews", get(reviews_handler))
        .route("/companies/:id/salaries", get(salaries_handler))
        .route("/companies/:id/stocks", get(stocks_handler))
        .route("/companies/:id/taxes", get(taxes_handler))
        .route("/status/:resource", get(status_handler))
        .route("/search/:kind", get(search_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
