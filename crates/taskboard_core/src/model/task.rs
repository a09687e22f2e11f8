//! Task domain model.
//!
//! # Responsibility
//! - Define the flat `Task` record persisted in the `tasks` table.
//! - Validate creation input before it reaches the store.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused or mutated.
//! - `title` is trimmed and non-empty; it is never edited after creation.
//! - `completed` starts as `false`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned, auto-incrementing task identifier.
pub type TaskId = i64;

/// One persisted task row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
}

impl Task {
    /// Returns a copy of this task with its completion flag flipped.
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

/// Validated creation input. Holds an already-trimmed title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
}

impl NewTask {
    /// Builds creation input from raw user text.
    ///
    /// # Errors
    /// - Returns `TaskValidationError::EmptyTitle` when `raw_title` is blank.
    pub fn new(raw_title: &str) -> Result<Self, TaskValidationError> {
        let title = normalize_title(raw_title).ok_or(TaskValidationError::EmptyTitle)?;
        Ok(Self { title })
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Trims `raw` and returns it, or `None` when nothing is left.
pub fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Validation failures for task input and persisted rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}
