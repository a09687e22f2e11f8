//! Task list UI state model.
//!
//! # Responsibility
//! - Hold the view's task sequence and pending input.
//! - Sync every mutation to the gateway with optimistic local updates.
//!
//! # Invariants
//! - The local sequence is a cache; the gateway's store is authoritative.
//! - Toggle/delete change local state whatever the request outcome.

pub mod gateway;
pub mod http;
pub mod view;

pub use gateway::{GatewayError, GatewayResult, TaskGateway};
pub use http::HttpTaskGateway;
pub use view::{RowStyle, TaskListView, TaskRow};
