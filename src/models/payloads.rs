//! Payload models returned by the company data backend
//!
//! Backend bodies are camelCase JSON; the same shapes are re-served to
//! front ends unchanged.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::ResourceType;
use crate::error::CacheError;

/// Company overview record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyOverview {
    pub id: String,
    pub name: String,
    pub industry: Option<String>,
    pub headquarters: Option<String>,
    pub website: Option<String>,
    pub employee_count: Option<u64>,
    pub average_rating: Option<f64>,
    pub description: Option<String>,
}

/// A single employee review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub title: String,
    pub rating: u8,
    pub job_title: Option<String>,
    pub pros: Option<String>,
    pub cons: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One page of reviews with the company-wide rating distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPage {
    pub reviews: Vec<Review>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub average_rating: Option<f64>,
    /// Star count -> number of reviews
    #[serde(default)]
    pub rating_distribution: BTreeMap<u8, u64>,
}

/// A single reported salary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    pub id: String,
    pub job_title: String,
    pub location: Option<String>,
    pub base_salary: f64,
    pub bonus: Option<f64>,
    pub stock_grant: Option<f64>,
    pub years_of_experience: Option<u32>,
    pub currency: String,
    pub reported_at: Option<DateTime<Utc>>,
}

/// Summary statistics over every salary matching the filters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalarySummary {
    pub count: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub median: Option<f64>,
    pub average: Option<f64>,
}

/// One page of salaries with summary statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryPage {
    pub salaries: Vec<Salary>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    #[serde(default)]
    pub summary: SalarySummary,
}

/// Latest stock quote for a listed company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSnapshot {
    pub symbol: String,
    pub price: f64,
    pub currency: String,
    pub change_percent: Option<f64>,
    pub market_cap: Option<f64>,
    pub as_of: DateTime<Utc>,
}

/// One fiscal year of tax data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRecord {
    pub year: i32,
    pub income_tax: f64,
    pub effective_rate: Option<f64>,
}

/// Tax history of a company, oldest year first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxHistory {
    pub currency: String,
    #[serde(default)]
    pub records: Vec<TaxRecord>,
}

// == Payload ==
/// A cached response body, one variant per resource type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Overview(CompanyOverview),
    Reviews(ReviewPage),
    Salaries(SalaryPage),
    Stocks(StockSnapshot),
    Taxes(TaxHistory),
}

impl Payload {
    /// The resource type this payload belongs to.
    pub fn resource(&self) -> ResourceType {
        match self {
            Payload::Overview(_) => ResourceType::Overview,
            Payload::Reviews(_) => ResourceType::Reviews,
            Payload::Salaries(_) => ResourceType::Salaries,
            Payload::Stocks(_) => ResourceType::Stocks,
            Payload::Taxes(_) => ResourceType::Taxes,
        }
    }

    /// Decodes a backend body as the payload shape of `resource`.
    pub fn decode(resource: ResourceType, body: &[u8]) -> serde_json::Result<Payload> {
        Ok(match resource {
            ResourceType::Overview => Payload::Overview(serde_json::from_slice(body)?),
            ResourceType::Reviews => Payload::Reviews(serde_json::from_slice(body)?),
            ResourceType::Salaries => Payload::Salaries(serde_json::from_slice(body)?),
            ResourceType::Stocks => Payload::Stocks(serde_json::from_slice(body)?),
            ResourceType::Taxes => Payload::Taxes(serde_json::from_slice(body)?),
        })
    }
}

// == Search ==
/// Search-as-you-type endpoints exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Companies,
    Jobs,
    Locations,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Companies => "companies",
            SearchKind::Jobs => "jobs",
            SearchKind::Locations => "locations",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [SearchKind::Companies, SearchKind::Jobs, SearchKind::Locations]
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CacheError::InvalidRequest(format!("Unknown search kind: {}", s)))
    }
}

/// One search-as-you-type suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: Option<String>,
    pub name: String,
}
