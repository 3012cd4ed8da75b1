//! Recommendation backend abstraction
//!
//! The backend owns the catalog and the similarity model. This crate only
//! talks to it over HTTP, so everything behind this trait is an external
//! collaborator and can be swapped for a fake in tests.

use crate::{
    error::AppResult,
    models::{RecommendResponse, Title},
};

pub mod http;

pub use http::HttpBackend;

/// Trait for recommendation backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationBackend: Send + Sync {
    /// Fetch every title the backend knows about, in backend order
    async fn fetch_catalog(&self) -> AppResult<Vec<Title>>;

    /// Ask for recommendations for a single title
    ///
    /// Returns the raw response; pairing and validation of the two lists
    /// happens in the workflow.
    async fn fetch_recommendations(&self, title: &Title) -> AppResult<RecommendResponse>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}
