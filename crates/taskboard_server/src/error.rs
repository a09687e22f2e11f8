//! Gateway error taxonomy and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use taskboard_core::{RepoError, TaskValidationError};

/// Generic message for failures that are not the caller's or the store's.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// `title` missing, not a string, or blank after trimming.
    #[error("Invalid title")]
    InvalidTitle,
    /// The store rejected the query, or the update/delete payload could not
    /// form one; carries the message verbatim.
    #[error("{0}")]
    Store(String),
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidTitle => StatusCode::BAD_REQUEST,
            Self::Store(_) | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(TaskValidationError::EmptyTitle) => Self::InvalidTitle,
            other => Self::Store(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
