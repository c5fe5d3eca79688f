//! API Module
//!
//! HTTP handlers and routing for the company data cache REST API.
//!
//! # Endpoints
//! - `GET /companies/:id/{overview,reviews,salaries,stocks,taxes}` - Cached company data
//! - `GET /status/:resource` - Loading/error status
//! - `GET /search/:kind` - Search-as-you-type pass-through
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod extract;
pub mod handlers;
pub mod routes;

pub use extract::{ApiPath, ApiQuery};
pub use handlers::*;
pub use routes::create_router;
