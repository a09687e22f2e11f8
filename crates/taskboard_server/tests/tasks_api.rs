use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::routing::get;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::path::Path;
use taskboard_core::RepoResult;
use taskboard_server::error::INTERNAL_ERROR_MESSAGE;
use taskboard_server::{build_router, panic_response, ApiError, AppState, TASKS_PATH};
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;

fn app() -> Router {
    build_router(AppState::open(Path::new(":memory:")).expect("in-memory store should open"))
}

async fn send(app: &Router, method: Method, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(TASKS_PATH);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .expect("request should build");
    send_request(app, request).await
}

async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).expect("body should be JSON");
    (status, value)
}

async fn create(app: &Router, title: &str) -> Value {
    let (status, body) = send(app, Method::POST, Some(json!({ "title": title }))).await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    body
}

async fn list(app: &Router) -> Vec<Value> {
    let (status, body) = send(app, Method::GET, None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().expect("list should be an array").clone()
}

#[tokio::test]
async fn list_starts_empty() {
    let app = app();
    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn create_returns_trimmed_incomplete_task_with_id() {
    let app = app();

    let task = create(&app, "  Buy milk  ").await;
    assert_eq!(task["title"], "Buy milk");
    assert_eq!(task["completed"], false);
    assert!(task["id"].as_i64().is_some());

    assert_eq!(list(&app).await, vec![task]);
}

#[tokio::test]
async fn list_is_ordered_by_ascending_id() {
    let app = app();
    for title in ["c", "a", "b"] {
        create(&app, title).await;
    }

    let ids: Vec<i64> = list(&app)
        .await
        .iter()
        .map(|task| task["id"].as_i64().unwrap())
        .collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[tokio::test]
async fn create_rejects_invalid_titles_without_writing() {
    let app = app();

    for body in [
        json!({}),
        json!({ "title": "" }),
        json!({ "title": "   " }),
        json!({ "title": 42 }),
        json!({ "title": null }),
        json!(["title"]),
    ] {
        let (status, response) = send(&app, Method::POST, Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body} was accepted");
        assert_eq!(response, json!({ "error": "Invalid title" }));
    }

    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn malformed_json_is_reported_as_generic_internal_error() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri(TASKS_PATH)
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": INTERNAL_ERROR_MESSAGE }));
}

#[tokio::test]
async fn update_flips_only_the_target_task() {
    let app = app();
    let target = create(&app, "target").await;
    let other = create(&app, "other").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        Some(json!({ "id": target["id"], "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "updated" }));

    let tasks = list(&app).await;
    assert_eq!(tasks[0]["completed"], true);
    assert_eq!(tasks[1], other);

    send(
        &app,
        Method::PUT,
        Some(json!({ "id": target["id"], "completed": false })),
    )
    .await;
    assert_eq!(list(&app).await[0], target);
}

#[tokio::test]
async fn update_and_delete_accept_bodies_without_content_type() {
    let app = app();
    let task = create(&app, "plain body").await;

    let request = Request::builder()
        .method(Method::PUT)
        .uri(TASKS_PATH)
        .body(Body::from(
            json!({ "id": task["id"], "completed": true }).to_string(),
        ))
        .unwrap();
    let (status, _) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::OK);

    let request = Request::builder()
        .method(Method::DELETE)
        .uri(TASKS_PATH)
        .body(Body::from(json!({ "id": task["id"] }).to_string()))
        .unwrap();
    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "deleted" }));
    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn update_and_delete_of_unknown_id_still_succeed() {
    let app = app();
    let task = create(&app, "survivor").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        Some(json!({ "id": 9_999, "completed": true })),
    )
    .await;
    assert_eq!((status, body), (StatusCode::OK, json!({ "message": "updated" })));

    let (status, body) = send(&app, Method::DELETE, Some(json!({ "id": 9_999 }))).await;
    assert_eq!((status, body), (StatusCode::OK, json!({ "message": "deleted" })));

    assert_eq!(list(&app).await, vec![task]);
}

#[tokio::test]
async fn wrongly_shaped_update_and_delete_bodies_fail_like_the_store() {
    let app = app();
    let task = create(&app, "untouched").await;

    for (method, body) in [
        (Method::PUT, json!({ "id": "one", "completed": "yes" })),
        (Method::PUT, json!({ "id": task["id"] })),
        (Method::DELETE, json!({ "id": "1" })),
        (Method::DELETE, json!({})),
    ] {
        let (status, response) = send(&app, method.clone(), Some(body.clone())).await;
        assert_eq!(
            status,
            StatusCode::INTERNAL_SERVER_ERROR,
            "{method} {body} was not a 500"
        );
        let message = response["error"].as_str().expect("error should be a string");
        assert!(!message.is_empty());
        assert_ne!(message, INTERNAL_ERROR_MESSAGE);
    }

    assert_eq!(list(&app).await, vec![task]);
}

#[tokio::test]
async fn oversized_body_is_reported_as_generic_internal_error() {
    let app = app();
    let title = "x".repeat(3 * 1024 * 1024);

    let (status, body) = send(&app, Method::POST, Some(json!({ "title": title }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": INTERNAL_ERROR_MESSAGE }));
    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn panicking_store_operation_becomes_internal_error() {
    let state = AppState::open(Path::new(":memory:")).unwrap();

    let err = state
        .run(|_| -> RepoResult<()> { panic!("store operation exploded") })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Internal));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // The store stays usable after the panic.
    let app = build_router(state);
    create(&app, "after panic").await;
    assert_eq!(list(&app).await.len(), 1);
}

async fn exploding_handler() -> &'static str {
    panic!("handler exploded")
}

#[tokio::test]
async fn panicking_handler_is_caught_as_generic_internal_error() {
    let app = Router::new()
        .route("/boom", get(exploding_handler))
        .layer(CatchPanicLayer::custom(panic_response));
    let request = Request::builder()
        .uri("/boom")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": INTERNAL_ERROR_MESSAGE }));
}

#[tokio::test]
async fn store_failure_surfaces_message_with_500() {
    let state = AppState::open(Path::new(":memory:")).unwrap();
    state
        .run(|service| {
            service
                .repository()
                .connection()
                .execute_batch("DROP TABLE tasks;")
                .map_err(Into::into)
        })
        .await
        .unwrap();
    let app = build_router(state);

    let (status, body) = send(&app, Method::GET, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().expect("error should be a string");
    assert!(message.contains("no such table"), "unexpected message {message}");

    let (status, _) = send(&app, Method::POST, Some(json!({ "title": "x" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn buy_milk_scenario() {
    let app = app();

    let task = create(&app, "Buy milk").await;
    let tasks = list(&app).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Buy milk");
    assert_eq!(tasks[0]["completed"], false);

    send(
        &app,
        Method::PUT,
        Some(json!({ "id": task["id"], "completed": true })),
    )
    .await;
    assert_eq!(list(&app).await[0]["completed"], true);

    send(&app, Method::DELETE, Some(json!({ "id": task["id"] }))).await;
    assert!(list(&app).await.is_empty());
}
