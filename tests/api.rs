use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use goalboard::{api::AppState, server::build_router, MemStorage};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn seeded_app() -> Router {
    build_router(AppState::shared(Arc::new(MemStorage::seeded())), false)
}

fn empty_app() -> Router {
    build_router(AppState::shared(Arc::new(MemStorage::new())), false)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

fn ids_in_order(goals: &Value) -> Vec<(String, u64)> {
    goals
        .as_array()
        .unwrap()
        .iter()
        .map(|g| {
            (
                g["id"].as_str().unwrap().to_string(),
                g["position"].as_u64().unwrap(),
            )
        })
        .collect()
}

fn pairs(expected: &[(&str, u64)]) -> Vec<(String, u64)> {
    expected
        .iter()
        .map(|(id, position)| (id.to_string(), *position))
        .collect()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&empty_app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("ok"));
}

#[tokio::test]
async fn test_seeded_board_listing() {
    let app = seeded_app();

    let (status, boards) = send(&app, "GET", "/api/boards", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(boards[0]["id"], "board1");

    let (_, columns) = send(&app, "GET", "/api/boards/board1/columns", None).await;
    let titles: Vec<&str> = columns
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["To Do", "Doing", "Done"]);

    let (_, goals) = send(&app, "GET", "/api/columns/col1/goals", None).await;
    assert_eq!(ids_in_order(&goals), pairs(&[("goal1", 0), ("goal2", 1)]));
}

#[tokio::test]
async fn test_create_board_adds_default_columns() {
    let app = empty_app();

    let (status, board) = send(
        &app,
        "POST",
        "/api/boards",
        Some(json!({ "title": "Fitness", "description": "Training plan" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(board["title"], "Fitness");
    assert!(board["createdAt"].is_string());

    let uri = format!("/api/boards/{}/columns", board["id"].as_str().unwrap());
    let (status, columns) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let columns = columns.as_array().unwrap();
    assert_eq!(columns.len(), 3);
    for (index, column) in columns.iter().enumerate() {
        assert_eq!(column["position"], index as u64);
    }
}

#[tokio::test]
async fn test_invalid_bodies_are_bad_requests() {
    let app = seeded_app();

    let (status, body) = send(&app, "POST", "/api/boards", Some(json!({ "title": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    // Missing required field
    let (status, _) = send(&app, "POST", "/api/boards", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/goals/move",
        Some(json!({ "goalId": "goal1", "targetColumnId": "col1", "targetPosition": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PATCH",
        "/api/goals/goal1",
        Some(json!({ "completedSubtasks": 9, "totalSubtasks": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_not_found() {
    let app = seeded_app();

    let (status, body) = send(&app, "GET", "/api/goals/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("nope"));

    let (status, _) = send(
        &app,
        "POST",
        "/api/goals/move",
        Some(json!({ "goalId": "nope", "targetColumnId": "col1", "targetPosition": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "POST",
        "/api/goals/move",
        Some(json!({ "goalId": "goal1", "targetColumnId": "nope", "targetPosition": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "POST",
        "/api/comments",
        Some(json!({ "goalId": "nope", "author": "JD", "content": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reorder_within_column() {
    let app = seeded_app();

    let (status, moved) = send(
        &app,
        "POST",
        "/api/goals/move",
        Some(json!({ "goalId": "goal2", "targetColumnId": "col1", "targetPosition": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["position"], 0);

    let (_, goals) = send(&app, "GET", "/api/columns/col1/goals", None).await;
    assert_eq!(ids_in_order(&goals), pairs(&[("goal2", 0), ("goal1", 1)]));
}

#[tokio::test]
async fn test_move_across_columns() {
    let app = seeded_app();

    let (status, moved) = send(
        &app,
        "POST",
        "/api/goals/move",
        Some(json!({ "goalId": "goal1", "targetColumnId": "col2", "targetPosition": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["columnId"], "col2");

    let (_, source) = send(&app, "GET", "/api/columns/col1/goals", None).await;
    assert_eq!(ids_in_order(&source), pairs(&[("goal2", 0)]));

    let (_, destination) = send(&app, "GET", "/api/columns/col2/goals", None).await;
    assert_eq!(
        ids_in_order(&destination),
        pairs(&[("goal1", 0), ("goal3", 1)])
    );
}

#[tokio::test]
async fn test_target_position_past_end_appends() {
    let app = seeded_app();

    let (status, moved) = send(
        &app,
        "POST",
        "/api/goals/move",
        Some(json!({ "goalId": "goal3", "targetColumnId": "col1", "targetPosition": 99 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["position"], 2);
}

#[tokio::test]
async fn test_win_promotion_and_demotion() {
    let app = seeded_app();

    let (status, win) = send(
        &app,
        "POST",
        "/api/goals/move",
        Some(json!({ "goalId": "goal3", "targetPosition": 0, "isWin": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(win["isWin"], true);
    assert!(win["completedAt"].is_string());

    let (_, wins) = send(&app, "GET", "/api/boards/board1/wins", None).await;
    assert_eq!(ids_in_order(&wins), pairs(&[("goal3", 0)]));

    let (_, doing) = send(&app, "GET", "/api/columns/col2/goals", None).await;
    assert!(doing.as_array().unwrap().is_empty());

    let (_, board_goals) = send(&app, "GET", "/api/boards/board1/goals", None).await;
    assert!(board_goals
        .as_array()
        .unwrap()
        .iter()
        .all(|g| g["id"] != "goal3"));

    // A win needs a destination column to leave the wins lane
    let (status, _) = send(
        &app,
        "POST",
        "/api/goals/move",
        Some(json!({ "goalId": "goal3", "targetPosition": 0, "isWin": false })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, back) = send(
        &app,
        "POST",
        "/api/goals/move",
        Some(json!({ "goalId": "goal3", "targetColumnId": "col3", "targetPosition": 0, "isWin": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(back["isWin"], false);
    assert!(back["completedAt"].is_null());

    let (_, done) = send(&app, "GET", "/api/columns/col3/goals", None).await;
    assert_eq!(ids_in_order(&done), pairs(&[("goal3", 0), ("goal4", 1)]));
}

#[tokio::test]
async fn test_patch_placement_fields() {
    let app = seeded_app();

    let (status, win) = send(&app, "PATCH", "/api/goals/goal1", Some(json!({ "isWin": true }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(win["isWin"], true);
    assert!(win["columnId"].is_null());
    assert!(win["completedAt"].is_string());

    let (_, todo) = send(&app, "GET", "/api/columns/col1/goals", None).await;
    assert_eq!(ids_in_order(&todo), pairs(&[("goal2", 0)]));

    let (status, _) = send(&app, "PATCH", "/api/goals/goal1", Some(json!({ "isWin": false }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, moved) = send(
        &app,
        "PATCH",
        "/api/goals/goal2",
        Some(json!({ "columnId": "col2", "position": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["columnId"], "col2");

    let (_, doing) = send(&app, "GET", "/api/columns/col2/goals", None).await;
    assert_eq!(ids_in_order(&doing), pairs(&[("goal2", 0), ("goal3", 1)]));

    let (_, todo) = send(&app, "GET", "/api/columns/col1/goals", None).await;
    assert!(todo.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_goal_lifecycle() {
    let app = seeded_app();

    let (status, goal) = send(
        &app,
        "POST",
        "/api/goals",
        Some(json!({
            "boardId": "board1",
            "columnId": "col1",
            "title": "Run a 10k",
            "goalType": "long-term",
            "assignee": "SM",
            "totalSubtasks": 4
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(goal["position"], 2);
    assert_eq!(goal["goalType"], "long-term");
    let id = goal["id"].as_str().unwrap().to_string();

    let uri = format!("/api/goals/{}", id);
    let (status, updated) = send(
        &app,
        "PATCH",
        &uri,
        Some(json!({ "completedSubtasks": 2, "title": "Run a half marathon" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["completedSubtasks"], 2);
    assert_eq!(updated["title"], "Run a half marathon");

    let (status, _) = send(&app, "DELETE", "/api/goals/goal1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, todo) = send(&app, "GET", "/api/columns/col1/goals", None).await;
    assert_eq!(
        ids_in_order(&todo),
        pairs(&[("goal2", 0), (id.as_str(), 1)])
    );
}

#[tokio::test]
async fn test_comments() {
    let app = seeded_app();

    for content in ["first", "second"] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/comments",
            Some(json!({ "goalId": "goal1", "author": "JD", "content": content })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, _) = send(
        &app,
        "POST",
        "/api/comments",
        Some(json!({
            "goalId": "goal1",
            "author": "JD",
            "content": "look",
            "gifUrl": "not a url"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, comments) = send(&app, "GET", "/api/goals/goal1/comments", None).await;
    let comments = comments.as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["content"], "first");
    assert_eq!(comments[1]["content"], "second");

    let uri = format!("/api/comments/{}", comments[0]["id"].as_str().unwrap());
    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_board_cascades() {
    let app = seeded_app();

    let (status, _) = send(
        &app,
        "POST",
        "/api/comments",
        Some(json!({ "goalId": "goal1", "author": "SM", "content": "nice" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, "DELETE", "/api/boards/board1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/api/boards/board1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/api/goals/goal1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, columns) = send(&app, "GET", "/api/boards/board1/columns", None).await;
    assert!(columns.as_array().unwrap().is_empty());

    let (_, comments) = send(&app, "GET", "/api/goals/goal1/comments", None).await;
    assert!(comments.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_column_management() {
    let app = seeded_app();

    let (status, column) = send(
        &app,
        "POST",
        "/api/columns",
        Some(json!({ "boardId": "board1", "title": "Blocked", "position": 1, "color": "#EF4444" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(column["position"], 1);

    let (_, columns) = send(&app, "GET", "/api/boards/board1/columns", None).await;
    let titles: Vec<&str> = columns
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["To Do", "Blocked", "Doing", "Done"]);

    let (status, _) = send(
        &app,
        "PATCH",
        "/api/columns/col1",
        Some(json!({ "color": "blue" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "DELETE", "/api/columns/col1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, columns) = send(&app, "GET", "/api/boards/board1/columns", None).await;
    let positions: Vec<u64> = columns
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["position"].as_u64().unwrap())
        .collect();
    assert_eq!(positions, vec![0, 1, 2]);

    let (status, _) = send(&app, "GET", "/api/goals/goal1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_users() {
    let (status, users) = send(&empty_app(), "GET", "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["displayName"], "John Doe");
    assert!(users[0].get("password").is_none());
}
