//! Fetch Module
//!
//! Backend access for cache misses and search queries.

mod client;
mod http;

pub use client::{FetchClient, FetchError};
pub use http::HttpFetchClient;
