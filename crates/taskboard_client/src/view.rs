//! Task list view state and its optimistic sync policy.
//!
//! # Invariants
//! - `mount` replaces the local sequence verbatim; no merging.
//! - `add` appends the gateway's row; the input is cleared even on failure.
//! - `toggle`/`delete` apply locally before the request and never roll back.

use crate::gateway::{GatewayResult, TaskGateway};
use log::{debug, warn};
use taskboard_core::{normalize_title, Task, TaskId};

/// Visual treatment of one rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Normal,
    Struck,
}

/// Render model for one task row: a checkbox, a title and a delete affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub title: String,
    pub checked: bool,
    pub style: RowStyle,
}

pub struct TaskListView<G> {
    gateway: G,
    tasks: Vec<Task>,
    input: String,
}

impl<G: TaskGateway> TaskListView<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            tasks: Vec::new(),
            input: String::new(),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Fetches the full list once and replaces local state with it.
    pub async fn mount(&mut self) -> GatewayResult<()> {
        let tasks = self.gateway.list().await?;
        debug!("event=view_mount module=ui status=ok count={}", tasks.len());
        self.tasks = tasks;
        Ok(())
    }

    /// Submits the pending input as a new task.
    ///
    /// Returns `Ok(None)` without any request when the input is blank.
    pub async fn add(&mut self) -> GatewayResult<Option<TaskId>> {
        let Some(title) = normalize_title(&self.input) else {
            return Ok(None);
        };
        self.input.clear();

        let task = self.gateway.create(&title).await?;
        let id = task.id;
        self.tasks.push(task);
        Ok(Some(id))
    }

    /// Flips the completion flag of `id` locally and on the gateway.
    ///
    /// The local flip stays even when the request fails; the error is
    /// returned for the caller to surface or ignore. Unknown ids are a no-op.
    pub async fn toggle(&mut self, id: TaskId) -> GatewayResult<()> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(());
        };
        task.completed = !task.completed;
        let completed = task.completed;

        let result = self.gateway.set_completed(id, completed).await;
        if let Err(err) = &result {
            warn!("event=view_toggle module=ui status=diverged id={id} error={err}");
        }
        result
    }

    /// Removes `id` locally and on the gateway; no rollback on failure.
    pub async fn delete(&mut self, id: TaskId) -> GatewayResult<()> {
        self.tasks.retain(|task| task.id != id);

        let result = self.gateway.delete(id).await;
        if let Err(err) = &result {
            warn!("event=view_delete module=ui status=diverged id={id} error={err}");
        }
        result
    }

    /// Rows in local-array order.
    pub fn rows(&self) -> Vec<TaskRow> {
        self.tasks
            .iter()
            .map(|task| TaskRow {
                id: task.id,
                title: task.title.clone(),
                checked: task.completed,
                style: if task.completed {
                    RowStyle::Struck
                } else {
                    RowStyle::Normal
                },
            })
            .collect()
    }

    /// Plain-text rendering; struck titles are wrapped in `~~`.
    pub fn render_text(&self) -> String {
        self.rows()
            .iter()
            .map(|row| {
                let mark = if row.checked { 'x' } else { ' ' };
                let title = match row.style {
                    RowStyle::Struck => format!("~~{}~~", row.title),
                    RowStyle::Normal => row.title.clone(),
                };
                format!("{:>4} [{mark}] {title}", row.id)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
