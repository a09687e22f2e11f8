//! Task use-case service.
//!
//! # Responsibility
//! - Provide the four gateway operations (list, create, update-completion,
//!   delete) independent of any transport.
//! - Validate creation input before it reaches the store.
//!
//! # Invariants
//! - Every operation issues exactly one repository call.
//! - Update/delete of a missing id is a silent no-op, never an error.
//! - Listing is always ordered by ascending id.

use crate::model::task::{NewTask, Task, TaskId};
use crate::repo::task_repo::{RepoResult, TaskRepository};

/// Use-case service wrapper for task operations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Lists every task ordered by ascending id.
    pub fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        self.repo.list_tasks()
    }

    /// Gets one task by id.
    pub fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.repo.get_task(id)
    }

    /// Creates a task from raw title text.
    ///
    /// # Contract
    /// - The title is trimmed before insert.
    /// - The new task starts with `completed = false`.
    /// - Returns the stored row including its assigned id.
    ///
    /// # Errors
    /// - `RepoError::Validation` when the title is blank; no row is written.
    pub fn create_task(&self, raw_title: &str) -> RepoResult<Task> {
        let input = NewTask::new(raw_title)?;
        self.repo.insert_task(&input)
    }

    /// Sets the completion flag of the task with `id`.
    ///
    /// Returns the affected row count; `0` when no such task exists.
    pub fn set_completed(&self, id: TaskId, completed: bool) -> RepoResult<usize> {
        self.repo.update_completed(id, completed)
    }

    /// Deletes the task with `id`.
    ///
    /// Returns the affected row count; `0` when no such task exists.
    pub fn delete_task(&self, id: TaskId) -> RepoResult<usize> {
        self.repo.delete_task(id)
    }
}
