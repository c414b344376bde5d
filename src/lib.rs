//! # Goalboard
//!
//! Goal-tracking kanban boards served over a JSON REST API.
//!
//! Boards own ordered columns, columns own ordered goals, and goals can be
//! promoted into a per-board "wins" lane when they are completed. The
//! [`Storage`] trait keeps position numbering dense and gap-free across
//! every create, move and delete, whichever backend is in use.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod server;
pub mod storage;
pub mod telemetry;

// Re-export commonly used types
pub use domain::{Board, Column, Comment, Goal, GoalType, MoveGoal, User};
pub use error::{GoalboardError, Result};
pub use storage::{MemStorage, Storage};

#[cfg(feature = "file-storage")]
pub use storage::FileStorage;
