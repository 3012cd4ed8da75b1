use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tokio::task::JoinHandle;

use crate::{
    error::{AppError, AppResult},
    models::Title,
};

use super::{html, AppState};

#[derive(Debug, Deserialize)]
pub struct SearchPageQuery {
    /// Search text typed so far
    pub q: Option<String>,
    /// Suggestion the user clicked
    pub pick: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    pub movie: Option<String>,
}

async fn settle(task: Option<JoinHandle<()>>) -> AppResult<()> {
    if let Some(task) = task {
        task.await.map_err(|e| AppError::Internal(e.to_string()))?;
    }
    Ok(())
}

/// Search page: each render is one page view
pub async fn search_page(
    State(state): State<AppState>,
    Query(query): Query<SearchPageQuery>,
) -> AppResult<Html<String>> {
    let controller = state.new_view();
    settle(controller.mount().await).await?;

    if let Some(text) = query.q.filter(|q| !q.is_empty()) {
        controller.set_search(text).await;
    }
    if let Some(pick) = query.pick {
        controller.choose(Title::from(pick)).await;
    }

    let view = controller.view().await;
    controller.teardown().await;

    tracing::debug!(
        suggestions = view.search.suggestions.as_ref().map_or(0, |s| s.items.len()),
        selected = ?view.selected,
        "Rendered search page"
    );

    Ok(Html(html::search_page(&view)?))
}

/// Results page for the title carried in the `movie` query parameter
pub async fn recommendations_page(
    State(state): State<AppState>,
    Query(query): Query<RecommendationsQuery>,
) -> AppResult<Response> {
    let Some(movie) = query.movie.filter(|m| !m.trim().is_empty()) else {
        return Ok(Redirect::to("/").into_response());
    };

    let controller = state.new_view();
    controller.navigate_to(Title::from(movie.as_str())).await;
    settle(controller.request_recommendations().await).await?;

    let view = controller.view().await;
    controller.teardown().await;

    Ok(Html(html::recommendations_page(&movie, &view)?).into_response())
}
