//! Request extractors
//!
//! Wrap axum's `Path` and `Query` so malformed input is reported through
//! [`CacheError`] and gets the same JSON error body as every other failure.

use async_trait::async_trait;
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        FromRequestParts, Path, Query,
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::CacheError;

/// `Path` extractor rejecting with [`CacheError::InvalidRequest`].
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

/// `Query` extractor rejecting with [`CacheError::InvalidRequest`].
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

impl From<PathRejection> for CacheError {
    fn from(rejection: PathRejection) -> Self {
        CacheError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for CacheError {
    fn from(rejection: QueryRejection) -> Self {
        CacheError::InvalidRequest(rejection.body_text())
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = CacheError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(ApiPath(value))
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = CacheError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(ApiQuery(value))
    }
}
