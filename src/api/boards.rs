use super::{ApiError, SharedState, ValidJson};
use crate::domain::{Board, BoardPatch, NewBoard};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

pub(super) async fn list_boards(
    State(state): State<SharedState>,
) -> Result<Json<Vec<Board>>, ApiError> {
    Ok(Json(state.storage.list_boards().await?))
}

pub(super) async fn get_board(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Board>, ApiError> {
    Ok(Json(state.storage.get_board(&id).await?))
}

pub(super) async fn create_board(
    State(state): State<SharedState>,
    ValidJson(req): ValidJson<NewBoard>,
) -> Result<impl IntoResponse, ApiError> {
    let board = state.storage.create_board(req).await?;
    info!(board_id = %board.id, "board created");
    Ok((StatusCode::CREATED, Json(board)))
}

pub(super) async fn update_board(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<BoardPatch>,
) -> Result<Json<Board>, ApiError> {
    Ok(Json(state.storage.update_board(&id, req).await?))
}

pub(super) async fn delete_board(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.storage.delete_board(&id).await?;
    info!(board_id = %id, "board deleted");
    Ok(StatusCode::NO_CONTENT)
}
