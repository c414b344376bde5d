use crate::domain::{new_id, ordering::Positioned};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Colour used when a column is created without one
pub const DEFAULT_COLUMN_COLOR: &str = "#3B82F6";

/// Title and colour of the columns every new board starts with
pub const DEFAULT_COLUMNS: [(&str, &str); 3] = [
    ("To Do", "#3B82F6"),
    ("Doing", "#F59E0B"),
    ("Done", "#10B981"),
];

/// Top-level container for a set of columns and goals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Board {
    pub fn new(title: String, description: Option<String>) -> Self {
        Self {
            id: new_id(),
            title,
            description,
            created_at: Utc::now(),
        }
    }

    /// Builds the three lanes a freshly created board gets
    pub fn default_columns(&self) -> Vec<Column> {
        DEFAULT_COLUMNS
            .iter()
            .enumerate()
            .map(|(position, (title, color))| {
                Column::new(
                    self.id.clone(),
                    title.to_string(),
                    position as u32,
                    color.to_string(),
                )
            })
            .collect()
    }
}

/// An ordered lane within a board holding non-win goals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub board_id: String,
    pub title: String,
    pub position: u32,
    pub color: String,
}

impl Column {
    pub fn new(board_id: String, title: String, position: u32, color: String) -> Self {
        Self {
            id: new_id(),
            board_id,
            title,
            position,
            color,
        }
    }
}

impl Positioned for Column {
    fn position(&self) -> u32 {
        self.position
    }

    fn set_position(&mut self, position: u32) {
        self.position = position;
    }
}
