use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::Title,
    workflow::{PageView, PointerDown, WorkflowController},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub view_id: Uuid,
    pub view: PageView,
}

impl ViewResponse {
    async fn of(view_id: Uuid, controller: &WorkflowController) -> Json<Self> {
        Json(Self {
            view_id,
            view: controller.view().await,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub title: Title,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Open a page view and start its catalog load
pub async fn create_view(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> (StatusCode, Json<ViewResponse>) {
    let (view_id, controller) = state.open_view().await;
    // The load finishes in the background; clients poll the view.
    let _ = controller.mount().await;

    let open_views = state.open_views().await;
    tracing::info!(
        request_id = %request_id,
        view_id = %view_id,
        open_views,
        "View opened"
    );

    (StatusCode::CREATED, ViewResponse::of(view_id, &controller).await)
}

/// Get the projected view
pub async fn get_view(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
) -> AppResult<Json<ViewResponse>> {
    let controller = state.view(view_id).await?;
    Ok(ViewResponse::of(view_id, &controller).await)
}

/// Replace the search text
pub async fn update_search(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
    Json(request): Json<SearchRequest>,
) -> AppResult<Json<ViewResponse>> {
    let controller = state.view(view_id).await?;
    controller.set_search(request.text).await;
    Ok(ViewResponse::of(view_id, &controller).await)
}

/// Reset search, selection and results
pub async fn clear_search(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
) -> AppResult<Json<ViewResponse>> {
    let controller = state.view(view_id).await?;
    controller.clear_search().await;
    Ok(ViewResponse::of(view_id, &controller).await)
}

/// Choose one of the current suggestions
pub async fn select_title(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
    Json(request): Json<SelectionRequest>,
) -> AppResult<Json<ViewResponse>> {
    let controller = state.view(view_id).await?;

    if !controller.choose(request.title.clone()).await {
        return Err(AppError::InvalidInput(format!(
            "'{}' is not a current suggestion",
            request.title
        )));
    }

    Ok(ViewResponse::of(view_id, &controller).await)
}

/// Press the "get recommendations" trigger
pub async fn request_recommendations(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<(StatusCode, Json<ViewResponse>)> {
    let controller = state.view(view_id).await?;
    let started = controller.request_recommendations().await.is_some();

    tracing::info!(
        request_id = %request_id,
        view_id = %view_id,
        started,
        "Recommendations requested"
    );

    Ok((StatusCode::ACCEPTED, ViewResponse::of(view_id, &controller).await))
}

/// Deliver a pointer-down event
pub async fn pointer_down(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
    Json(pointer): Json<PointerDown>,
) -> AppResult<Json<ViewResponse>> {
    let controller = state.view(view_id).await?;
    controller.pointer_down(&pointer).await;
    Ok(ViewResponse::of(view_id, &controller).await)
}

/// Tear the view down
pub async fn close_view(
    State(state): State<AppState>,
    Path(view_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.close_view(view_id).await?;
    let open_views = state.open_views().await;
    tracing::info!(
        view_id = %view_id,
        open_views,
        "View closed"
    );
    Ok(StatusCode::NO_CONTENT)
}
