//! Shared gateway state: the explicitly constructed store handle.
//!
//! # Invariants
//! - The SQLite connection is only touched from blocking worker threads.
//! - One query runs at a time; the mutex is the single serialization point.

use crate::error::ApiError;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use taskboard_core::db::{open_db, open_db_in_memory, DbResult};
use taskboard_core::{RepoResult, SqliteTaskRepository, TaskService};

/// Database path value that selects a private in-memory store.
pub const IN_MEMORY_DB: &str = ":memory:";

type Service = TaskService<SqliteTaskRepository>;

#[derive(Clone)]
pub struct AppState {
    tasks: Arc<Mutex<Service>>,
}

impl AppState {
    pub fn new(service: Service) -> Self {
        Self {
            tasks: Arc::new(Mutex::new(service)),
        }
    }

    /// Opens the store at `db_path` (or in memory for `:memory:`).
    pub fn open(db_path: &Path) -> DbResult<Self> {
        let conn = if db_path.as_os_str() == IN_MEMORY_DB {
            open_db_in_memory()?
        } else {
            open_db(db_path)?
        };
        Ok(Self::new(TaskService::new(SqliteTaskRepository::new(conn))))
    }

    /// Runs one store operation on a blocking thread.
    ///
    /// Store errors are mapped through `ApiError::from`; a panicking
    /// operation becomes `ApiError::Internal`.
    pub async fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Service) -> RepoResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let tasks = Arc::clone(&self.tasks);
        let joined = tokio::task::spawn_blocking(move || {
            // A panic mid-query leaves no partial state behind in SQLite.
            let service = tasks.lock().unwrap_or_else(PoisonError::into_inner);
            op(&service)
        })
        .await;

        match joined {
            Ok(result) => result.map_err(ApiError::from),
            Err(err) => {
                log::error!(
                    "event=store_task module=gateway status=error error_code=join_failed error={err}"
                );
                Err(ApiError::Internal)
            }
        }
    }
}
