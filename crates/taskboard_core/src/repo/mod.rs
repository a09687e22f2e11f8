//! Repository layer: the query client over the `tasks` table.
//!
//! # Responsibility
//! - Define the select/insert/update/delete contract the gateway relies on.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Each repository call issues exactly one SQL statement.
//! - Updates and deletes report affected rows; zero is not an error.

pub mod task_repo;
