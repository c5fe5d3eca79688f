//! Request DTOs for the cache service API
//!
//! Query-string parameters accepted by the data endpoints, and their
//! conversion into cache descriptors.

use serde::Deserialize;

use crate::cache::Descriptor;
use crate::config::Config;
use crate::error::{CacheError, Result};

/// Maximum accepted company id length in bytes
pub const MAX_COMPANY_ID_LENGTH: usize = 128;

/// Maximum accepted search text length in bytes
pub const MAX_SEARCH_LENGTH: usize = 256;

/// Page size bounds applied to paginated queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl From<&Config> for PageLimits {
    fn from(config: &Config) -> Self {
        Self {
            default_page_size: config.default_page_size,
            max_page_size: config.max_page_size,
        }
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        PageLimits::from(&Config::default())
    }
}

/// Query for the non-paginated resources (overview, stocks, taxes)
///
/// # Fields
/// - `refresh`: refetch even if cached
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshQuery {
    #[serde(default)]
    pub refresh: bool,
}

/// Query for GET /companies/:id/reviews
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsQuery {
    pub page: Option<u32>,
    #[serde(alias = "page_size")]
    pub page_size: Option<u32>,
    pub rating: Option<String>,
    pub sort: Option<String>,
    #[serde(default)]
    pub refresh: bool,
}

impl ReviewsQuery {
    /// Validates the query and builds the descriptor for `company_id`.
    pub fn to_descriptor(&self, company_id: &str, limits: PageLimits) -> Result<Descriptor> {
        let (page, page_size) = page_params(self.page, self.page_size, limits)?;
        Ok(company_descriptor(company_id)?
            .with_page(page, page_size)
            .with_rating(self.rating.as_deref().unwrap_or_default().parse()?)
            .with_review_sort(self.sort.as_deref().unwrap_or_default().parse()?))
    }
}

/// Query for GET /companies/:id/salaries
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalariesQuery {
    pub page: Option<u32>,
    #[serde(alias = "page_size")]
    pub page_size: Option<u32>,
    pub experience: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    #[serde(default)]
    pub refresh: bool,
}

impl SalariesQuery {
    /// Validates the query and builds the descriptor for `company_id`.
    pub fn to_descriptor(&self, company_id: &str, limits: PageLimits) -> Result<Descriptor> {
        let (page, page_size) = page_params(self.page, self.page_size, limits)?;
        let search = self.search.clone().unwrap_or_default();
        if search.len() > MAX_SEARCH_LENGTH {
            return Err(CacheError::InvalidRequest(format!(
                "Search text exceeds maximum length of {} bytes",
                MAX_SEARCH_LENGTH
            )));
        }

        Ok(company_descriptor(company_id)?
            .with_page(page, page_size)
            .with_experience(self.experience.as_deref().unwrap_or_default().parse()?)
            .with_search(search)
            .with_salary_sort(self.sort.as_deref().unwrap_or_default().parse()?))
    }
}

/// Query for GET /search/:kind
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

impl SearchQuery {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.q.len() > MAX_SEARCH_LENGTH {
            return Some(format!(
                "Search text exceeds maximum length of {} bytes",
                MAX_SEARCH_LENGTH
            ));
        }
        None
    }
}

/// Descriptor scoped to a validated company id.
pub fn company_descriptor(company_id: &str) -> Result<Descriptor> {
    let company_id = company_id.trim();
    if company_id.is_empty() {
        return Err(CacheError::InvalidRequest(
            "Company id cannot be empty".to_string(),
        ));
    }
    if company_id == "." || company_id == ".." {
        return Err(CacheError::InvalidRequest(format!(
            "Company id '{}' is not allowed",
            company_id
        )));
    }
    if company_id.len() > MAX_COMPANY_ID_LENGTH {
        return Err(CacheError::InvalidRequest(format!(
            "Company id exceeds maximum length of {} bytes",
            MAX_COMPANY_ID_LENGTH
        )));
    }
    Ok(Descriptor::new(company_id))
}

fn page_params(page: Option<u32>, page_size: Option<u32>, limits: PageLimits) -> Result<(u32, u32)> {
    let page_size = page_size.unwrap_or(limits.default_page_size);
    if page_size == 0 || page_size > limits.max_page_size {
        return Err(CacheError::InvalidRequest(format!(
            "Page size must be between 1 and {}",
            limits.max_page_size
        )));
    }
    Ok((page.unwrap_or(0), page_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ExperienceBracket, RatingFilter, ReviewSort, SalarySort};

    #[test]
    fn test_reviews_query_deserialize() {
        let query: ReviewsQuery =
            serde_json::from_str(r#"{"page": 2, "pageSize": 10, "rating": "4"}"#).unwrap();
        assert_eq!(query.page, Some(2));
        assert_eq!(query.page_size, Some(10));
        assert!(!query.refresh);
    }

    #[test]
    fn test_reviews_query_defaults() {
        let descriptor = ReviewsQuery::default()
            .to_descriptor("42", PageLimits::default())
            .unwrap();
        assert_eq!(descriptor.company_id, "42");
        assert_eq!(descriptor.page, 0);
        assert_eq!(descriptor.page_size, 5);
        assert_eq!(descriptor.rating, RatingFilter::All);
        assert_eq!(descriptor.review_sort, ReviewSort::Newest);
    }

    #[test]
    fn test_reviews_query_rejects_bad_values() {
        let limits = PageLimits::default();
        let bad_rating = ReviewsQuery {
            rating: Some("9".to_string()),
            ..Default::default()
        };
        assert!(bad_rating.to_descriptor("42", limits).is_err());

        let bad_size = ReviewsQuery {
            page_size: Some(limits.max_page_size + 1),
            ..Default::default()
        };
        assert!(bad_size.to_descriptor("42", limits).is_err());

        let zero_size = ReviewsQuery {
            page_size: Some(0),
            ..Default::default()
        };
        assert!(zero_size.to_descriptor("42", limits).is_err());
    }

    #[test]
    fn test_salaries_query_to_descriptor() {
        let query = SalariesQuery {
            page: Some(1),
            page_size: Some(20),
            experience: Some("2-4".to_string()),
            search: Some("Engineer".to_string()),
            sort: Some("highest".to_string()),
            refresh: false,
        };
        let descriptor = query.to_descriptor("7", PageLimits::default()).unwrap();
        assert_eq!(descriptor.page, 1);
        assert_eq!(descriptor.page_size, 20);
        assert_eq!(descriptor.experience, ExperienceBracket::TwoToFour);
        assert_eq!(descriptor.search, "Engineer");
        assert_eq!(descriptor.salary_sort, SalarySort::Highest);
    }

    #[test]
    fn test_salaries_query_search_too_long() {
        let query = SalariesQuery {
            search: Some("x".repeat(MAX_SEARCH_LENGTH + 1)),
            ..Default::default()
        };
        assert!(query.to_descriptor("7", PageLimits::default()).is_err());
    }

    #[test]
    fn test_company_descriptor_validation() {
        assert!(company_descriptor("").is_err());
        assert!(company_descriptor("   ").is_err());
        assert!(company_descriptor(&"9".repeat(MAX_COMPANY_ID_LENGTH + 1)).is_err());
        assert_eq!(company_descriptor(" 42 ").unwrap().company_id, "42");
    }

    #[test]
    fn test_company_descriptor_rejects_dot_segments() {
        assert!(matches!(
            company_descriptor("."),
            Err(CacheError::InvalidRequest(_))
        ));
        assert!(matches!(
            company_descriptor(" .. "),
            Err(CacheError::InvalidRequest(_))
        ));
        assert_eq!(company_descriptor("...").unwrap().company_id, "...");

        let reviews = ReviewsQuery::default().to_descriptor("..", PageLimits::default());
        assert!(reviews.is_err());
    }

    #[test]
    fn test_search_query_validate() {
        let ok = SearchQuery {
            q: "acme".to_string(),
        };
        assert!(ok.validate().is_none());

        let too_long = SearchQuery {
            q: "x".repeat(MAX_SEARCH_LENGTH + 1),
        };
        assert!(too_long.validate().is_some());
    }
}
