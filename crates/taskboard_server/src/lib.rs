//! HTTP gateway for the task store.
//!
//! # Responsibility
//! - Expose list/create/update-completion/delete under `/api/tasks`.
//! - Serve the single-page task list UI at `/`.
//!
//! # Invariants
//! - Every error response body is `{"error": message}`.
//! - Each task request performs exactly one store query.

use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod page;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use state::AppState;

/// Collection path shared by the four task operations.
pub const TASKS_PATH: &str = "/api/tasks";

/// Builds the gateway router around an explicitly constructed store handle.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/api/health", get(handlers::health))
        .route(
            TASKS_PATH,
            get(handlers::list_tasks)
                .post(handlers::create_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Renders a caught handler panic as the generic 500 error body.
pub fn panic_response(_payload: Box<dyn Any + Send + 'static>) -> Response {
    log::error!("event=gateway_panic module=gateway status=error");
    ApiError::Internal.into_response()
}
