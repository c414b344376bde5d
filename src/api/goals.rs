use super::{ApiError, SharedState, ValidJson};
use crate::domain::{Goal, GoalPatch, MoveGoal, NewGoal};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

pub(super) async fn list_goals_by_board(
    State(state): State<SharedState>,
    Path(board_id): Path<String>,
) -> Result<Json<Vec<Goal>>, ApiError> {
    Ok(Json(state.storage.list_goals_by_board(&board_id).await?))
}

pub(super) async fn list_goals_by_column(
    State(state): State<SharedState>,
    Path(column_id): Path<String>,
) -> Result<Json<Vec<Goal>>, ApiError> {
    Ok(Json(state.storage.list_goals_by_column(&column_id).await?))
}

pub(super) async fn list_wins(
    State(state): State<SharedState>,
    Path(board_id): Path<String>,
) -> Result<Json<Vec<Goal>>, ApiError> {
    Ok(Json(state.storage.list_wins(&board_id).await?))
}

pub(super) async fn get_goal(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Goal>, ApiError> {
    Ok(Json(state.storage.get_goal(&id).await?))
}

pub(super) async fn create_goal(
    State(state): State<SharedState>,
    ValidJson(req): ValidJson<NewGoal>,
) -> Result<impl IntoResponse, ApiError> {
    let goal = state.storage.create_goal(req).await?;
    info!(
        goal_id = %goal.id,
        column_id = ?goal.column_id,
        goal_type = %goal.goal_type,
        "goal created"
    );
    Ok((StatusCode::CREATED, Json(goal)))
}

pub(super) async fn update_goal(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<GoalPatch>,
) -> Result<Json<Goal>, ApiError> {
    let goal = state.storage.update_goal(&id, req).await?;
    info!(
        goal_id = %goal.id,
        position = goal.position,
        is_win = goal.is_win,
        progress = goal.progress(),
        "goal updated"
    );
    Ok(Json(goal))
}

pub(super) async fn move_goal(
    State(state): State<SharedState>,
    ValidJson(req): ValidJson<MoveGoal>,
) -> Result<Json<Goal>, ApiError> {
    let goal = state.storage.move_goal(req).await?;
    info!(
        goal_id = %goal.id,
        column_id = ?goal.column_id,
        position = goal.position,
        is_win = goal.is_win,
        "goal moved"
    );
    Ok(Json(goal))
}

pub(super) async fn delete_goal(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.storage.delete_goal(&id).await?;
    info!(goal_id = %id, "goal deleted");
    Ok(StatusCode::NO_CONTENT)
}
