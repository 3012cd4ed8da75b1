mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use common::{test_server, FakeBackend};

/// Polls the view until `done` holds
async fn wait_for_view(server: &TestServer, view_id: &str, done: impl Fn(&Value) -> bool) -> Value {
    for _ in 0..100 {
        let response = server.get(&format!("/api/v1/views/{view_id}")).await;
        response.assert_status_ok();
        let body: Value = response.json();
        if done(&body["view"]) {
            return body["view"].clone();
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("view {view_id} never settled");
}

async fn open_view(server: &TestServer) -> String {
    let response = server.post("/api/v1/views").await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    let view_id = body["view_id"].as_str().unwrap().to_string();

    wait_for_view(server, &view_id, |view| view["search"]["disabled"] == false).await;
    view_id
}

#[tokio::test]
async fn test_health_check() {
    let server = test_server(Arc::new(FakeBackend::with_catalog(&[])));
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = test_server(Arc::new(FakeBackend::with_catalog(&[])));
    let id = "6f1c1a8e-8d7a-4c55-9d2e-2f0a4a1f9b10";
    let response = server.get("/health").add_header(
        axum::http::HeaderName::from_static("x-request-id"),
        axum::http::HeaderValue::from_static(id),
    ).await;
    assert_eq!(response.header("x-request-id"), id);
}

#[tokio::test]
async fn test_view_search_filters_catalog() {
    let server = test_server(Arc::new(FakeBackend::with_catalog(&[
        "Inception",
        "Interstellar",
        "Up",
    ])));
    let view_id = open_view(&server).await;

    let response = server
        .put(&format!("/api/v1/views/{view_id}/search"))
        .json(&json!({ "text": "in" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();

    assert_eq!(
        body["view"]["search"]["suggestions"]["items"],
        json!(["Inception", "Interstellar"])
    );
}

#[tokio::test]
async fn test_view_select_and_recommend() {
    let backend = Arc::new(
        FakeBackend::with_catalog(&["Inception", "Interstellar", "Up"]).answer(
            "Up",
            &["Cars"],
            &["http://x/cars.jpg"],
        ),
    );
    let server = test_server(backend.clone());
    let view_id = open_view(&server).await;

    server
        .put(&format!("/api/v1/views/{view_id}/search"))
        .json(&json!({ "text": "up" }))
        .await
        .assert_status_ok();

    let response = server
        .post(&format!("/api/v1/views/{view_id}/selection"))
        .json(&json!({ "title": "Up" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["view"]["selected"], "Up");
    assert_eq!(body["view"]["search"]["text"], "");
    assert!(body["view"]["search"]["suggestions"].is_null());

    server
        .post(&format!("/api/v1/views/{view_id}/recommendations"))
        .await
        .assert_status(StatusCode::ACCEPTED);

    let view = wait_for_view(&server, &view_id, |view| view["panel"]["kind"] != "loading").await;
    assert_eq!(view["panel"]["kind"], "populated");
    assert_eq!(view["panel"]["cards"].as_array().unwrap().len(), 1);
    assert_eq!(view["panel"]["cards"][0]["title"], "Cars");
    assert_eq!(view["panel"]["cards"][0]["poster"], "http://x/cars.jpg");
    assert_eq!(backend.recommend_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_view_recommend_without_selection() {
    let backend = Arc::new(FakeBackend::with_catalog(&["Up"]));
    let server = test_server(backend.clone());
    let view_id = open_view(&server).await;

    let response = server
        .post(&format!("/api/v1/views/{view_id}/recommendations"))
        .await;
    response.assert_status(StatusCode::ACCEPTED);
    let body: Value = response.json();

    assert_eq!(body["view"]["panel"]["kind"], "error");
    assert_eq!(body["view"]["panel"]["message"], "select a movie first");
    assert_eq!(backend.recommend_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_view_selection_must_be_a_suggestion() {
    let server = test_server(Arc::new(FakeBackend::with_catalog(&["Inception", "Up"])));
    let view_id = open_view(&server).await;

    server
        .put(&format!("/api/v1/views/{view_id}/search"))
        .json(&json!({ "text": "in" }))
        .await
        .assert_status_ok();

    let response = server
        .post(&format!("/api/v1/views/{view_id}/selection"))
        .json(&json!({ "title": "Up" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_view_reselecting_current_title_is_rejected() {
    let server = test_server(Arc::new(FakeBackend::with_catalog(&["Inception", "Up"])));
    let view_id = open_view(&server).await;

    server
        .put(&format!("/api/v1/views/{view_id}/search"))
        .json(&json!({ "text": "up" }))
        .await
        .assert_status_ok();

    server
        .post(&format!("/api/v1/views/{view_id}/selection"))
        .json(&json!({ "title": "Up" }))
        .await
        .assert_status_ok();

    let response = server
        .post(&format!("/api/v1/views/{view_id}/selection"))
        .json(&json!({ "title": "Up" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_view_catalog_failure() {
    let server = test_server(Arc::new(FakeBackend::failing_catalog()));
    let view_id = open_view(&server).await;

    let view = wait_for_view(&server, &view_id, |view| !view["banner"].is_null()).await;
    assert_eq!(view["banner"], "failed to load movies");
    assert_eq!(view["search"]["disabled"], false);
}

#[tokio::test]
async fn test_view_outside_pointer_and_clear() {
    let server = test_server(Arc::new(FakeBackend::with_catalog(&["Inception", "Up"])));
    let view_id = open_view(&server).await;

    server
        .put(&format!("/api/v1/views/{view_id}/search"))
        .json(&json!({ "text": "in" }))
        .await
        .assert_status_ok();

    let response = server
        .post(&format!("/api/v1/views/{view_id}/pointer"))
        .json(&json!({ "target": ["page", "header"] }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["view"]["search"]["suggestions"].is_null());
    assert_eq!(body["view"]["search"]["text"], "in");

    let response = server
        .delete(&format!("/api/v1/views/{view_id}/search"))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["view"]["search"]["text"], "");
    assert_eq!(body["view"]["panel"]["kind"], "idle");
}

#[tokio::test]
async fn test_view_close() {
    let server = test_server(Arc::new(FakeBackend::with_catalog(&["Up"])));
    let view_id = open_view(&server).await;

    server
        .delete(&format!("/api/v1/views/{view_id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/api/v1/views/{view_id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_view_is_not_found() {
    let server = test_server(Arc::new(FakeBackend::with_catalog(&["Up"])));
    let response = server
        .get("/api/v1/views/00000000-0000-0000-0000-000000000000")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_search_page_renders_suggestions() {
    let backend = Arc::new(FakeBackend::with_catalog(&["Inception", "Interstellar", "Up"]));
    let server = test_server(backend.clone());

    let response = server.get("/").add_query_param("q", "in").await;
    response.assert_status_ok();
    let html = response.text();

    assert!(html.contains("pick=Inception"));
    assert!(html.contains("pick=Interstellar"));
    assert!(!html.contains("pick=Up"));
    assert_eq!(backend.catalog_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_search_page_pick_links_to_results() {
    let server = test_server(Arc::new(FakeBackend::with_catalog(&["Inception", "Up"])));

    let response = server
        .get("/")
        .add_query_param("q", "up")
        .add_query_param("pick", "Up")
        .await;
    response.assert_status_ok();
    let html = response.text();

    assert!(html.contains("Selected:"));
    assert!(html.contains(r#"recommendations?movie=Up""#));
}

#[tokio::test]
async fn test_search_page_with_failed_catalog() {
    let server = test_server(Arc::new(FakeBackend::failing_catalog()));

    let response = server.get("/").await;
    response.assert_status_ok();
    let html = response.text();

    assert!(html.contains("failed to load movies"));
    assert!(html.contains(r#"placeholder="Search for a movie...">"#));
}

#[tokio::test]
async fn test_recommendations_page_without_movie_redirects() {
    let server = test_server(Arc::new(FakeBackend::with_catalog(&["Up"])));

    let response = server.get("/recommendations").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/");

    let response = server
        .get("/recommendations")
        .add_query_param("movie", "  ")
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_recommendations_page_renders_grid() {
    let backend = Arc::new(FakeBackend::with_catalog(&["Up"]).answer(
        "Up",
        &["Cars", "Coco"],
        &["http://x/cars.jpg", "http://x/coco.jpg"],
    ));
    let server = test_server(backend.clone());

    let response = server
        .get("/recommendations")
        .add_query_param("movie", "Up")
        .await;
    response.assert_status_ok();
    let html = response.text();

    assert_eq!(html.matches("<article").count(), 2);
    assert!(html.contains(r#"cars.jpg" alt="Cars""#));
    assert!(html.contains(r#"coco.jpg" alt="Coco""#));
    assert_eq!(backend.catalog_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_recommendations_page_backend_error() {
    let server = test_server(Arc::new(FakeBackend::with_catalog(&["Up"])));

    let response = server
        .get("/recommendations")
        .add_query_param("movie", "Unknown")
        .await;
    response.assert_status_ok();
    let html = response.text();

    assert!(html.contains("failed to get recommendations"));
    assert!(!html.contains("<article"));
}
