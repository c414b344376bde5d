pub mod board;
pub mod comment;
pub mod goal;
pub mod ordering;
pub mod requests;
pub mod user;

pub use board::{Board, Column};
pub use comment::Comment;
pub use goal::{Goal, GoalType, Lane};
pub use ordering::{reserve_slot, sort_by_position, sort_comments, sort_wins, Positioned};
pub use requests::{
    BoardPatch, ColumnPatch, GoalPatch, MoveGoal, NewBoard, NewColumn, NewComment, NewGoal,
    Validate,
};
pub use user::{placeholder_users, User};

/// Generates an opaque identifier for a new entity
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
