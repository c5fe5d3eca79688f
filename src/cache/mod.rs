//! Cache Module
//!
//! Keyed response cache for company data, with the descriptor types used as keys.

mod descriptor;
mod entry;
mod resource;
mod stats;
mod store;


// Re-export public types
pub use descriptor::{
    normalize_search, CacheKey, Descriptor, ExperienceBracket, RatingFilter, ReviewSort,
    SalarySort,
};
pub use entry::CachedResponse;
pub use resource::ResourceType;
pub use stats::CacheStats;
pub use store::ResponseCache;
