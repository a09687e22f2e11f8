//! Gateway seam used by the view.

use async_trait::async_trait;
use taskboard_core::{Task, TaskId};

pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-success status with the gateway's `{"error"}` message.
    #[error("gateway returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("invalid gateway url `{0}`")]
    InvalidUrl(String),
}

/// The four collection operations the task list view depends on.
#[async_trait]
pub trait TaskGateway: Send + Sync {
    async fn list(&self) -> GatewayResult<Vec<Task>>;
    async fn create(&self, title: &str) -> GatewayResult<Task>;
    async fn set_completed(&self, id: TaskId, completed: bool) -> GatewayResult<()>;
    async fn delete(&self, id: TaskId) -> GatewayResult<()>;
}
