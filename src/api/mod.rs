//! REST surface over a [`Storage`] backend.

use crate::storage::Storage;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

mod boards;
mod columns;
mod comments;
pub mod error;
mod goals;
mod users;

pub use error::{ApiError, ValidJson};

// ── Shared application state ──────────────────────────────────────────

pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn shared(storage: Arc<dyn Storage>) -> SharedState {
        Arc::new(Self { storage })
    }
}

// ── Router ────────────────────────────────────────────────────────────

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/api/boards", get(boards::list_boards).post(boards::create_board))
        .route(
            "/api/boards/{id}",
            get(boards::get_board)
                .patch(boards::update_board)
                .delete(boards::delete_board),
        )
        .route("/api/boards/{id}/columns", get(columns::list_columns))
        .route("/api/boards/{id}/goals", get(goals::list_goals_by_board))
        .route("/api/boards/{id}/wins", get(goals::list_wins))
        .route("/api/columns", post(columns::create_column))
        .route(
            "/api/columns/{id}",
            axum::routing::patch(columns::update_column).delete(columns::delete_column),
        )
        .route("/api/columns/{id}/goals", get(goals::list_goals_by_column))
        .route("/api/goals", post(goals::create_goal))
        .route("/api/goals/move", post(goals::move_goal))
        .route(
            "/api/goals/{id}",
            get(goals::get_goal)
                .patch(goals::update_goal)
                .delete(goals::delete_goal),
        )
        .route("/api/goals/{id}/comments", get(comments::list_comments))
        .route("/api/comments", post(comments::create_comment))
        .route(
            "/api/comments/{id}",
            axum::routing::delete(comments::delete_comment),
        )
        .route("/api/users", get(users::list_users))
        .route("/health", get(health_check))
}

async fn health_check() -> &'static str {
    "ok"
}
