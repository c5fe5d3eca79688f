//! Company Cache - Keyed response cache for company-details data
//!
//! Serves company overview, reviews, salaries, stock and tax data from a
//! per-descriptor cache, fetching from the backend on misses.

pub mod api;
pub mod cache;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod fetch;
pub mod models;

pub use api::AppState;
pub use config::Config;
pub use coordinator::Coordinator;
