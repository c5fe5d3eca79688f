//! Descriptor Module
//!
//! Filter and pagination parameters that identify one cacheable query,
//! plus the canonical cache key built from them.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::cache::ResourceType;
use crate::error::CacheError;

// == Review Filters ==
/// Star rating filter applied to the reviews list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RatingFilter {
    #[default]
    All,
    /// Only reviews with exactly this many stars (1..=5)
    Stars(u8),
}

impl fmt::Display for RatingFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatingFilter::All => f.write_str("all"),
            RatingFilter::Stars(stars) => write!(f, "{}", stars),
        }
    }
}

impl FromStr for RatingFilter {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(RatingFilter::All);
        }
        match s.parse::<u8>() {
            Ok(stars @ 1..=5) => Ok(RatingFilter::Stars(stars)),
            _ => Err(CacheError::InvalidRequest(format!(
                "Rating filter must be 'all' or 1-5, got '{}'",
                s
            ))),
        }
    }
}

/// Sort order of the reviews list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReviewSort {
    #[default]
    Newest,
    Oldest,
    Highest,
    Lowest,
}

impl ReviewSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewSort::Newest => "newest",
            ReviewSort::Oldest => "oldest",
            ReviewSort::Highest => "highest",
            ReviewSort::Lowest => "lowest",
        }
    }
}

impl FromStr for ReviewSort {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "newest" => Ok(ReviewSort::Newest),
            "oldest" => Ok(ReviewSort::Oldest),
            "highest" => Ok(ReviewSort::Highest),
            "lowest" => Ok(ReviewSort::Lowest),
            other => Err(CacheError::InvalidRequest(format!(
                "Unknown review sort order: '{}'",
                other
            ))),
        }
    }
}

// == Salary Filters ==
/// Years-of-experience bracket applied to the salaries list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExperienceBracket {
    #[default]
    All,
    ZeroToOne,
    TwoToFour,
    FiveToNine,
    TenPlus,
}

impl ExperienceBracket {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceBracket::All => "all",
            ExperienceBracket::ZeroToOne => "0-1",
            ExperienceBracket::TwoToFour => "2-4",
            ExperienceBracket::FiveToNine => "5-9",
            ExperienceBracket::TenPlus => "10+",
        }
    }
}

impl FromStr for ExperienceBracket {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(ExperienceBracket::All),
            "0-1" => Ok(ExperienceBracket::ZeroToOne),
            "2-4" => Ok(ExperienceBracket::TwoToFour),
            "5-9" => Ok(ExperienceBracket::FiveToNine),
            "10+" => Ok(ExperienceBracket::TenPlus),
            other => Err(CacheError::InvalidRequest(format!(
                "Unknown experience bracket: '{}'",
                other
            ))),
        }
    }
}

/// Sort order of the salaries list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SalarySort {
    #[default]
    Newest,
    Highest,
    Lowest,
}

impl SalarySort {
    pub fn as_str(&self) -> &'static str {
        match self {
            SalarySort::Newest => "newest",
            SalarySort::Highest => "highest",
            SalarySort::Lowest => "lowest",
        }
    }
}

impl FromStr for SalarySort {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "newest" => Ok(SalarySort::Newest),
            "highest" => Ok(SalarySort::Highest),
            "lowest" => Ok(SalarySort::Lowest),
            other => Err(CacheError::InvalidRequest(format!(
                "Unknown salary sort order: '{}'",
                other
            ))),
        }
    }
}

// == Descriptor ==
/// Filter and pagination parameters for one query.
///
/// Fields that a resource type does not use are reset when the descriptor
/// is turned into a [`CacheKey`], so `Descriptor::new("42")` and
/// `Descriptor::new("42").with_page(3, 10)` name the same overview entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Descriptor {
    pub company_id: String,
    pub page: u32,
    pub page_size: u32,
    pub rating: RatingFilter,
    pub review_sort: ReviewSort,
    pub experience: ExperienceBracket,
    pub search: String,
    pub salary_sort: SalarySort,
}

impl Descriptor {
    // == Constructor ==
    /// Creates a descriptor scoped to a company with every filter at its default.
    pub fn new(company_id: impl Into<String>) -> Self {
        Self {
            company_id: company_id.into(),
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    pub fn with_rating(mut self, rating: RatingFilter) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_review_sort(mut self, sort: ReviewSort) -> Self {
        self.review_sort = sort;
        self
    }

    pub fn with_experience(mut self, experience: ExperienceBracket) -> Self {
        self.experience = experience;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_salary_sort(mut self, sort: SalarySort) -> Self {
        self.salary_sort = sort;
        self
    }

    // == Canonicalize ==
    /// Returns the descriptor with only the fields `resource` uses.
    ///
    /// Search text is trimmed, whitespace-collapsed and lowercased.
    pub fn canonical_for(&self, resource: ResourceType) -> Descriptor {
        let company_id = self.company_id.trim().to_string();
        match resource {
            ResourceType::Overview | ResourceType::Stocks | ResourceType::Taxes => {
                Descriptor::new(company_id)
            }
            ResourceType::Reviews => Descriptor::new(company_id)
                .with_page(self.page, self.page_size)
                .with_rating(self.rating)
                .with_review_sort(self.review_sort),
            ResourceType::Salaries => Descriptor::new(company_id)
                .with_page(self.page, self.page_size)
                .with_experience(self.experience)
                .with_search(normalize_search(&self.search))
                .with_salary_sort(self.salary_sort),
        }
    }
}

/// Trims, collapses inner whitespace and lowercases search text.
pub fn normalize_search(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// == Cache Key ==
/// A resource type paired with a canonical descriptor.
///
/// Only constructible through [`CacheKey::new`], which canonicalizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    resource: ResourceType,
    descriptor: Descriptor,
}

impl CacheKey {
    pub fn new(resource: ResourceType, descriptor: &Descriptor) -> Self {
        Self {
            resource,
            descriptor: descriptor.canonical_for(resource),
        }
    }

    pub fn resource(&self) -> ResourceType {
        self.resource
    }

    pub fn company_id(&self) -> &str {
        &self.descriptor.company_id
    }

    /// Query parameters this key sends to the backend, in a fixed order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let d = &self.descriptor;
        match self.resource {
            ResourceType::Reviews => vec![
                ("page", d.page.to_string()),
                ("pageSize", d.page_size.to_string()),
                ("rating", d.rating.to_string()),
                ("sort", d.review_sort.as_str().to_string()),
            ],
            ResourceType::Salaries => vec![
                ("page", d.page.to_string()),
                ("pageSize", d.page_size.to_string()),
                ("experience", d.experience.as_str().to_string()),
                ("search", d.search.clone()),
                ("sort", d.salary_sort.as_str().to_string()),
            ],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource, self.descriptor.company_id)?;
        let pairs = self.query_pairs();
        for (i, (name, value)) in pairs.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, name, value)?;
        }
        Ok(())
    }
}

impl Serialize for CacheKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
