use crate::domain::ordering::Positioned;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Horizon of a goal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalType {
    #[default]
    ShortTerm,
    LongTerm,
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortTerm => write!(f, "short-term"),
            Self::LongTerm => write!(f, "long-term"),
        }
    }
}

/// Where a goal currently sits: inside a column or in the board's win list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lane {
    Column(String),
    Wins,
}

/// A trackable objective with progress counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub board_id: String,
    pub column_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub position: u32,
    #[serde(default)]
    pub goal_type: GoalType,
    pub assignee: String,
    #[serde(default)]
    pub completed_subtasks: u32,
    #[serde(default)]
    pub total_subtasks: u32,
    #[serde(default)]
    pub is_win: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Goal {
    /// Returns the lane the goal belongs to
    pub fn lane(&self) -> Lane {
        match (&self.column_id, self.is_win) {
            (Some(column_id), false) => Lane::Column(column_id.clone()),
            _ => Lane::Wins,
        }
    }

    /// Moves the goal into `lane`, keeping `is_win` and `column_id` consistent.
    ///
    /// Leaving the win list clears the completion timestamp. Entering it does
    /// not stamp one; callers decide when a promotion counts as completion.
    pub fn enter_lane(&mut self, lane: Lane) {
        match lane {
            Lane::Column(column_id) => {
                if self.is_win {
                    self.completed_at = None;
                }
                self.is_win = false;
                self.column_id = Some(column_id);
            }
            Lane::Wins => {
                self.is_win = true;
                self.column_id = None;
            }
        }
    }

    /// Marks the goal as won at `at`
    pub fn mark_win(&mut self, at: DateTime<Utc>) {
        self.enter_lane(Lane::Wins);
        self.completed_at = Some(at);
    }

    /// Fraction of subtasks done, 0.0 when the goal has none
    pub fn progress(&self) -> f64 {
        if self.total_subtasks == 0 {
            0.0
        } else {
            self.completed_subtasks as f64 / self.total_subtasks as f64
        }
    }
}

impl Positioned for Goal {
    fn position(&self) -> u32 {
        self.position
    }

    fn set_position(&mut self, position: u32) {
        self.position = position;
    }
}
