use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

use super::Title;

// ============================================================================
// Recommendation Backend Wire Types
// ============================================================================

/// Body of `GET /movies`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MoviesResponse {
    #[serde(default)]
    pub movies: Vec<Title>,
}

/// Body of `POST /recommend`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub movie: Title,
}

/// Raw answer of `POST /recommend`
///
/// Both lists are optional on the wire; the backend omits them when it has
/// nothing to say about the requested movie.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RecommendResponse {
    #[serde(default)]
    pub recommended_movies: Option<Vec<Title>>,
    #[serde(default)]
    pub recommended_posters: Option<Vec<String>>,
}

impl RecommendResponse {
    pub fn new(movies: Vec<Title>, posters: Vec<String>) -> Self {
        Self {
            recommended_movies: Some(movies),
            recommended_posters: Some(posters),
        }
    }
}

// ============================================================================
// Validated Result
// ============================================================================

/// A recommended title paired with its poster URL
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    pub title: Title,
    pub poster: String,
}

/// Recommendations in backend order
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct RecommendationResult {
    items: Vec<Recommendation>,
}

impl RecommendationResult {
    /// Pairs titles with posters positionally; extra entries on either side
    /// are dropped.
    pub fn zip(titles: Vec<Title>, posters: Vec<String>) -> Self {
        let items = titles
            .into_iter()
            .zip(posters)
            .map(|(title, poster)| Recommendation { title, poster })
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[Recommendation] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl TryFrom<RecommendResponse> for RecommendationResult {
    type Error = WorkflowError;

    fn try_from(response: RecommendResponse) -> Result<Self, Self::Error> {
        let (Some(titles), Some(posters)) =
            (response.recommended_movies, response.recommended_posters)
        else {
            return Err(WorkflowError::EmptyResult);
        };

        if titles.is_empty() || titles.len() != posters.len() {
            tracing::debug!(
                titles = titles.len(),
                posters = posters.len(),
                "Rejecting unpaired recommendation lists"
            );
            return Err(WorkflowError::EmptyResult);
        }

        Ok(Self::zip(titles, posters))
    }
}
