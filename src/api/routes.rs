use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::{handlers, pages, AppState};

/// Creates the main router with pages, the view API and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Pages
        .route("/", get(pages::search_page))
        .route("/recommendations", get(pages::recommendations_page))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// View session routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/views", post(handlers::create_view))
        .route(
            "/views/:view_id",
            get(handlers::get_view).delete(handlers::close_view),
        )
        .route(
            "/views/:view_id/search",
            put(handlers::update_search).delete(handlers::clear_search),
        )
        .route("/views/:view_id/selection", post(handlers::select_title))
        .route(
            "/views/:view_id/recommendations",
            post(handlers::request_recommendations),
        )
        .route("/views/:view_id/pointer", post(handlers::pointer_down))
        .layer(CorsLayer::permissive())
}
