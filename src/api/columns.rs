use super::{ApiError, SharedState, ValidJson};
use crate::domain::{Column, ColumnPatch, NewColumn};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

pub(super) async fn list_columns(
    State(state): State<SharedState>,
    Path(board_id): Path<String>,
) -> Result<Json<Vec<Column>>, ApiError> {
    Ok(Json(state.storage.list_columns(&board_id).await?))
}

pub(super) async fn create_column(
    State(state): State<SharedState>,
    ValidJson(req): ValidJson<NewColumn>,
) -> Result<impl IntoResponse, ApiError> {
    let column = state.storage.create_column(req).await?;
    info!(column_id = %column.id, board_id = %column.board_id, "column created");
    Ok((StatusCode::CREATED, Json(column)))
}

pub(super) async fn update_column(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<ColumnPatch>,
) -> Result<Json<Column>, ApiError> {
    Ok(Json(state.storage.update_column(&id, req).await?))
}

pub(super) async fn delete_column(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.storage.delete_column(&id).await?;
    info!(column_id = %id, "column deleted");
    Ok(StatusCode::NO_CONTENT)
}
