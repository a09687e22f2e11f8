//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the generic query primitives over `tasks`: id-ordered select,
//!   insert returning the new row, update and delete filtered by `id`.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Inserts only accept validated `NewTask` input.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::task::{NewTask, Task, TaskId, TaskValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASK_SELECT_SQL: &str = "SELECT id, title, completed FROM tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query primitives for the `tasks` table.
pub trait TaskRepository {
    /// Every task ordered by ascending `id`.
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn insert_task(&self, input: &NewTask) -> RepoResult<Task>;
    /// Returns the number of rows whose `completed` flag was written.
    fn update_completed(&self, id: TaskId, completed: bool) -> RepoResult<usize>;
    /// Returns the number of rows removed.
    fn delete_task(&self, id: TaskId) -> RepoResult<usize>;
}

/// SQLite-backed task repository. Owns its connection.
pub struct SqliteTaskRepository {
    conn: Connection,
}

impl SqliteTaskRepository {
    /// Wraps a connection returned by `open_db` / `open_db_in_memory`.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl TaskRepository for SqliteTaskRepository {
    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn insert_task(&self, input: &NewTask) -> RepoResult<Task> {
        let mut stmt = self.conn.prepare(
            "INSERT INTO tasks (title, completed)
             VALUES (?1, 0)
             RETURNING id, title, completed;",
        )?;
        let mut rows = stmt.query(params![input.title()])?;
        if let Some(row) = rows.next()? {
            return parse_task_row(row);
        }

        Err(RepoError::InvalidData(
            "insert into tasks returned no row".to_string(),
        ))
    }

    fn update_completed(&self, id: TaskId, completed: bool) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE tasks SET completed = ?1 WHERE id = ?2;",
            params![bool_to_int(completed), id],
        )?;
        Ok(changed)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [id])?;
        Ok(changed)
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id: TaskId = row.get("id")?;
    let title: String = row.get("title")?;
    if title.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "empty title for task {id} in tasks.title"
        )));
    }

    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in tasks.completed"
            )));
        }
    };

    Ok(Task {
        id,
        title,
        completed,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
