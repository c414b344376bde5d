use crate::domain::{placeholder_users, User};
use axum::Json;

pub(super) async fn list_users() -> Json<&'static [User]> {
    Json(placeholder_users())
}
