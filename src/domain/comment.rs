use crate::domain::new_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A note left on a goal, optionally carrying an animated image link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub goal_id: String,
    pub author: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gif_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(goal_id: String, author: String, content: String, gif_url: Option<String>) -> Self {
        Self {
            id: new_id(),
            goal_id,
            author,
            content,
            gif_url,
            created_at: Utc::now(),
        }
    }
}
