//! Domain model for the task collection.
//!
//! # Responsibility
//! - Define the canonical `Task` record shared by store, gateway and UI.
//! - Own title normalization so every entry point trims the same way.
//!
//! # Invariants
//! - Every task is identified by a store-assigned `TaskId`.
//! - Titles are never empty after trimming.

pub mod task;
