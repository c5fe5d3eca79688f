//! Resource Type Module
//!
//! The kinds of company data the cache keeps apart.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CacheError;

// == Resource Type ==
/// One of the company-details data sets.
///
/// Loading and error status are aggregated at this granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Overview,
    Reviews,
    Salaries,
    Stocks,
    Taxes,
}

impl ResourceType {
    /// Every resource type, in display order.
    pub const ALL: [ResourceType; 5] = [
        ResourceType::Overview,
        ResourceType::Reviews,
        ResourceType::Salaries,
        ResourceType::Stocks,
        ResourceType::Taxes,
    ];

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Overview => "overview",
            ResourceType::Reviews => "reviews",
            ResourceType::Salaries => "salaries",
            ResourceType::Stocks => "stocks",
            ResourceType::Taxes => "taxes",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceType::ALL
            .into_iter()
            .find(|resource| resource.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CacheError::InvalidRequest(format!("Unknown resource type: {}", s)))
    }
}
