//! Coordinator Module
//!
//! Request coordination on top of the response cache: hit/miss decisions,
//! in-flight coalescing, request generations and per-key status.

mod generation;
mod service;
mod status;

pub use generation::GenerationTracker;
pub use service::{Coordinator, Loaded, Outcome, Source};
pub use status::{KeyStatus, RequestStatus, ResourceStatus, StatusBoard};
