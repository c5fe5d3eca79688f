//! Request, response and payload models
//!
//! This module defines the DTOs used for serializing/deserializing HTTP
//! bodies, both towards front ends and from the backend.

pub mod payloads;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use payloads::{
    CompanyOverview, Payload, Review, ReviewPage, Salary, SalaryPage, SalarySummary, SearchKind,
    StockSnapshot, Suggestion, TaxHistory, TaxRecord,
};
pub use requests::{PageLimits, RefreshQuery, ReviewsQuery, SalariesQuery, SearchQuery};
pub use responses::{DataResponse, ErrorResponse, HealthResponse, SearchResponse, StatsResponse};
