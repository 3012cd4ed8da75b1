use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum_test::TestServer;

use cinematch::{
    api::{create_router, AppState},
    error::{AppError, AppResult},
    models::{RecommendResponse, Title},
    services::RecommendationBackend,
    workflow::WorkflowPolicy,
};

/// In-memory backend with canned answers
#[derive(Default)]
pub struct FakeBackend {
    catalog: Option<Vec<Title>>,
    answers: HashMap<String, RecommendResponse>,
    pub catalog_calls: AtomicUsize,
    pub recommend_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn with_catalog(names: &[&str]) -> Self {
        Self {
            catalog: Some(names.iter().copied().map(Title::from).collect()),
            ..Self::default()
        }
    }

    /// Catalog endpoint answers with a server error
    pub fn failing_catalog() -> Self {
        Self::default()
    }

    pub fn answer(mut self, movie: &str, titles: &[&str], posters: &[&str]) -> Self {
        self.answers.insert(
            movie.to_string(),
            RecommendResponse::new(
                titles.iter().copied().map(Title::from).collect(),
                posters.iter().map(|p| p.to_string()).collect(),
            ),
        );
        self
    }
}

#[async_trait::async_trait]
impl RecommendationBackend for FakeBackend {
    async fn fetch_catalog(&self) -> AppResult<Vec<Title>> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        self.catalog
            .clone()
            .ok_or_else(|| AppError::ExternalApi("API returned status 500".to_string()))
    }

    async fn fetch_recommendations(&self, title: &Title) -> AppResult<RecommendResponse> {
        self.recommend_calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .get(title.as_str())
            .cloned()
            .ok_or_else(|| AppError::ExternalApi("API returned status 404".to_string()))
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

pub fn test_server(backend: Arc<FakeBackend>) -> TestServer {
    let state = AppState::new(backend, WorkflowPolicy::default());
    TestServer::new(create_router(state)).unwrap()
}
