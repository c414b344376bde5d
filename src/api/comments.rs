use super::{ApiError, SharedState, ValidJson};
use crate::domain::{Comment, NewComment};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub(super) async fn list_comments(
    State(state): State<SharedState>,
    Path(goal_id): Path<String>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    Ok(Json(state.storage.list_comments(&goal_id).await?))
}

pub(super) async fn create_comment(
    State(state): State<SharedState>,
    ValidJson(req): ValidJson<NewComment>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = state.storage.create_comment(req).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub(super) async fn delete_comment(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.storage.delete_comment(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
