//! Recommendation backend reached over HTTP

use std::time::Duration;

use reqwest::{Client as HttpClient, Response};

use crate::{
    error::{AppError, AppResult},
    models::{MoviesResponse, RecommendRequest, RecommendResponse, Title},
    services::backend::RecommendationBackend,
};

#[derive(Clone)]
pub struct HttpBackend {
    http_client: HttpClient,
    api_url: String,
}

impl HttpBackend {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn ensure_success(response: Response) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::ExternalApi(format!(
            "API returned status {}: {}",
            status, body
        )))
    }
}

#[async_trait::async_trait]
impl RecommendationBackend for HttpBackend {
    async fn fetch_catalog(&self) -> AppResult<Vec<Title>> {
        let url = format!("{}/movies", self.api_url);
        let response = self.http_client.get(&url).send().await?;
        let response = Self::ensure_success(response).await?;

        let body: MoviesResponse = response.json().await?;

        tracing::info!(
            titles = body.movies.len(),
            backend = self.name(),
            "Catalog fetched"
        );

        Ok(body.movies)
    }

    async fn fetch_recommendations(&self, title: &Title) -> AppResult<RecommendResponse> {
        let url = format!("{}/recommend", self.api_url);
        let response = self
            .http_client
            .post(&url)
            .json(&RecommendRequest {
                movie: title.clone(),
            })
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        let body: RecommendResponse = response.json().await?;

        tracing::info!(
            title = %title,
            recommended = body.recommended_movies.as_ref().map_or(0, Vec::len),
            backend = self.name(),
            "Recommendations fetched"
        );

        Ok(body)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
