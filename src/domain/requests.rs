//! Typed request contracts accepted by the store and the HTTP API.
//!
//! Every payload is deserialized into one of these structs and then run
//! through [`Validate`] before it reaches a store.

use crate::domain::goal::GoalType;
use crate::error::{GoalboardError, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Structural checks that serde alone cannot express
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GoalboardError::validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn require_optional_text(field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) => require_text(field, v),
        None => Ok(()),
    }
}

/// Accepts `#RGB` and `#RRGGBB`
fn require_color(value: &str) -> Result<()> {
    let hex = value.strip_prefix('#').unwrap_or("");
    let valid = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(GoalboardError::validation(format!(
            "color '{}' is not a hex colour like #3B82F6",
            value
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBoard {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for NewBoard {
    fn validate(&self) -> Result<()> {
        require_text("title", &self.title)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Validate for BoardPatch {
    fn validate(&self) -> Result<()> {
        require_optional_text("title", self.title.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewColumn {
    pub board_id: String,
    pub title: String,
    /// Slot to insert at; appended when omitted
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Validate for NewColumn {
    fn validate(&self) -> Result<()> {
        require_text("boardId", &self.board_id)?;
        require_text("title", &self.title)?;
        match &self.color {
            Some(color) => require_color(color),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnPatch {
    pub title: Option<String>,
    pub position: Option<u32>,
    pub color: Option<String>,
}

impl Validate for ColumnPatch {
    fn validate(&self) -> Result<()> {
        require_optional_text("title", self.title.as_deref())?;
        match &self.color {
            Some(color) => require_color(color),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub board_id: String,
    pub column_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Slot to insert at; appended when omitted
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub goal_type: GoalType,
    pub assignee: String,
    #[serde(default)]
    pub total_subtasks: u32,
}

impl Validate for NewGoal {
    fn validate(&self) -> Result<()> {
        require_text("boardId", &self.board_id)?;
        require_text("columnId", &self.column_id)?;
        require_text("title", &self.title)?;
        require_text("assignee", &self.assignee)
    }
}

/// Partial goal update.
///
/// `columnId`, `position` and `isWin` change where the goal sits and are
/// applied through the same path as [`MoveGoal`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub column_id: Option<String>,
    pub position: Option<u32>,
    pub goal_type: Option<GoalType>,
    pub assignee: Option<String>,
    pub completed_subtasks: Option<u32>,
    pub total_subtasks: Option<u32>,
    pub is_win: Option<bool>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl GoalPatch {
    /// True when the patch relocates the goal
    pub fn moves_goal(&self) -> bool {
        self.column_id.is_some() || self.position.is_some() || self.is_win.is_some()
    }
}

impl Validate for GoalPatch {
    fn validate(&self) -> Result<()> {
        require_optional_text("title", self.title.as_deref())?;
        require_optional_text("assignee", self.assignee.as_deref())?;
        require_optional_text("columnId", self.column_id.as_deref())?;
        if let (Some(done), Some(total)) = (self.completed_subtasks, self.total_subtasks) {
            if done > total {
                return Err(GoalboardError::validation(format!(
                    "completedSubtasks ({}) exceeds totalSubtasks ({})",
                    done, total
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveGoal {
    pub goal_id: String,
    #[serde(default)]
    pub target_column_id: Option<String>,
    pub target_position: u32,
    #[serde(default)]
    pub is_win: Option<bool>,
}

impl Validate for MoveGoal {
    fn validate(&self) -> Result<()> {
        require_text("goalId", &self.goal_id)?;
        require_optional_text("targetColumnId", self.target_column_id.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub goal_id: String,
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub gif_url: Option<String>,
}

impl Validate for NewComment {
    fn validate(&self) -> Result<()> {
        require_text("goalId", &self.goal_id)?;
        require_text("author", &self.author)?;
        require_text("content", &self.content)?;
        if let Some(url) = &self.gif_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(GoalboardError::validation("gifUrl must be an http(s) URL"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_requires_title() {
        let board: NewBoard = serde_json::from_str(r#"{"title": "  "}"#).unwrap();
        assert!(board.validate().is_err());

        let board: NewBoard = serde_json::from_str(r#"{"title": "Goals"}"#).unwrap();
        assert!(board.validate().is_ok());
        assert!(board.description.is_none());
    }

    #[test]
    fn test_new_column_color() {
        let column: NewColumn =
            serde_json::from_str(r##"{"boardId": "b1", "title": "Later", "color": "#abc"}"##).unwrap();
        assert!(column.validate().is_ok());

        let column: NewColumn =
            serde_json::from_str(r#"{"boardId": "b1", "title": "Later", "color": "blue"}"#).unwrap();
        assert!(column.validate().is_err());
    }

    #[test]
    fn test_new_goal_defaults() {
        let goal: NewGoal = serde_json::from_str(
            r#"{"boardId": "b1", "columnId": "c1", "title": "Run", "assignee": "JD"}"#,
        )
        .unwrap();

        assert!(goal.validate().is_ok());
        assert_eq!(goal.goal_type, GoalType::ShortTerm);
        assert_eq!(goal.total_subtasks, 0);
        assert!(goal.position.is_none());
    }

    #[test]
    fn test_new_goal_rejects_unknown_goal_type() {
        let result: std::result::Result<NewGoal, _> = serde_json::from_str(
            r#"{"boardId": "b1", "columnId": "c1", "title": "Run", "assignee": "JD", "goalType": "someday"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_move_goal_rejects_negative_position() {
        let result: std::result::Result<MoveGoal, _> =
            serde_json::from_str(r#"{"goalId": "g1", "targetPosition": -1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_move_goal_parsing() {
        let mv: MoveGoal =
            serde_json::from_str(r#"{"goalId": "g1", "targetPosition": 2, "isWin": true}"#).unwrap();
        assert!(mv.validate().is_ok());
        assert_eq!(mv.target_position, 2);
        assert_eq!(mv.is_win, Some(true));
        assert!(mv.target_column_id.is_none());
    }

    #[test]
    fn test_goal_patch_subtask_bounds() {
        let patch = GoalPatch {
            completed_subtasks: Some(4),
            total_subtasks: Some(3),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn test_goal_patch_moves_goal() {
        let patch: GoalPatch = serde_json::from_str(r#"{"title": "New"}"#).unwrap();
        assert!(!patch.moves_goal());

        let patch: GoalPatch = serde_json::from_str(r#"{"position": 1}"#).unwrap();
        assert!(patch.moves_goal());
    }

    #[test]
    fn test_new_comment_media_url() {
        let comment: NewComment = serde_json::from_str(
            r#"{"goalId": "g1", "author": "JD", "content": "Yes!", "gifUrl": "https://media.example/x.gif"}"#,
        )
        .unwrap();
        assert!(comment.validate().is_ok());

        let comment: NewComment = serde_json::from_str(
            r#"{"goalId": "g1", "author": "JD", "content": "Yes!", "gifUrl": "javascript:alert(1)"}"#,
        )
        .unwrap();
        assert!(comment.validate().is_err());
    }
}
