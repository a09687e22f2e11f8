//! Task collection handlers.
//!
//! # Responsibility
//! - Decode one JSON request, issue one store operation, encode one response.
//! - Emit one `gateway_request` log event per handled request.
//!
//! # Invariants
//! - Request bodies are decoded without requiring a JSON `Content-Type`.
//! - Bodies that are not JSON at all, or cannot be buffered, are unexpected
//!   failures (500, generic message).
//! - Only create validates its input; an update/delete payload of the wrong
//!   shape fails like the store would (500 with the decoder's message).
//! - Update/delete of an unknown id still answers success.

use crate::error::ApiError;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::Json;
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use taskboard_core::{normalize_title, Task, TaskId};

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCompletionRequest {
    pub id: TaskId,
    pub completed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteRequest {
    pub id: TaskId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /api/health`
pub async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        version: taskboard_core::core_version(),
    })
}

/// `GET /api/tasks`: every task, ascending by id.
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let started_at = Instant::now();
    let result = state.run(|service| service.list_tasks()).await;
    if let Ok(tasks) = &result {
        debug!("event=task_list module=gateway count={}", tasks.len());
    }
    finish("list", started_at, result).map(Json)
}

/// `POST /api/tasks` with `{"title": string}`: the created row.
pub async fn create_task(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Task>, ApiError> {
    let started_at = Instant::now();
    let result = async {
        let payload = decode_json(&buffered(body)?)?;
        let title = payload
            .get("title")
            .and_then(Value::as_str)
            .and_then(normalize_title)
            .ok_or(ApiError::InvalidTitle)?;
        state.run(move |service| service.create_task(&title)).await
    }
    .await;
    if let Ok(task) = &result {
        debug!("event=task_create module=gateway id={}", task.id);
    }
    finish("create", started_at, result).map(Json)
}

/// `PUT /api/tasks` with `{"id": number, "completed": bool}`.
pub async fn update_task(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let started_at = Instant::now();
    let result = async {
        let request: UpdateCompletionRequest = decode_request(&buffered(body)?)?;
        let rows = state
            .run(move |service| service.set_completed(request.id, request.completed))
            .await?;
        debug!(
            "event=task_update module=gateway id={} completed={} rows_affected={rows}",
            request.id, request.completed
        );
        Ok::<_, ApiError>(MessageBody::new("updated"))
    }
    .await;
    finish("update", started_at, result).map(Json)
}

/// `DELETE /api/tasks` with `{"id": number}`.
pub async fn delete_task(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let started_at = Instant::now();
    let result = async {
        let request: DeleteRequest = decode_request(&buffered(body)?)?;
        let rows = state
            .run(move |service| service.delete_task(request.id))
            .await?;
        debug!(
            "event=task_delete module=gateway id={} rows_affected={rows}",
            request.id
        );
        Ok::<_, ApiError>(MessageBody::new("deleted"))
    }
    .await;
    finish("delete", started_at, result).map(Json)
}

fn buffered(body: Result<Bytes, BytesRejection>) -> Result<Bytes, ApiError> {
    body.map_err(|rejection| {
        warn!(
            "event=request_decode module=gateway status=error error_code=unreadable_body http_status={} error={rejection}",
            rejection.status().as_u16()
        );
        ApiError::Internal
    })
}

fn decode_json(body: &[u8]) -> Result<Value, ApiError> {
    serde_json::from_slice(body).map_err(|err| {
        warn!("event=request_decode module=gateway status=error error_code=malformed_json error={err}");
        ApiError::Internal
    })
}

fn decode_request<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let payload = decode_json(body)?;
    serde_json::from_value(payload).map_err(|err| {
        warn!("event=request_decode module=gateway status=error error_code=invalid_shape error={err}");
        ApiError::Store(err.to_string())
    })
}

fn finish<T>(
    operation: &'static str,
    started_at: Instant,
    result: Result<T, ApiError>,
) -> Result<T, ApiError> {
    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => info!(
            "event=gateway_request module=gateway op={operation} status=ok duration_ms={duration_ms}"
        ),
        Err(err) if err.status().is_client_error() => warn!(
            "event=gateway_request module=gateway op={operation} status=rejected http_status={} duration_ms={duration_ms} error={err}",
            err.status().as_u16()
        ),
        Err(err) => error!(
            "event=gateway_request module=gateway op={operation} status=error http_status={} duration_ms={duration_ms} error={err}",
            err.status().as_u16()
        ),
    }
    result
}
