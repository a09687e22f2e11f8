//! Core use-case services.
//!
//! # Responsibility
//! - Turn gateway operations into single repository calls.
//! - Keep HTTP/UI layers decoupled from storage details.

pub mod task_service;
