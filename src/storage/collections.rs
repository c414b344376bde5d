//! In-process board state and every invariant-preserving mutation.
//!
//! Both backends run their operations through [`Collections`]. The memory
//! store keeps one instance behind a lock; the document store loads a
//! snapshot, turns on the journal, applies the operation and commits the
//! journaled [`BatchOp`]s as one batch.

use crate::{
    domain::{
        board::DEFAULT_COLUMN_COLOR,
        new_id,
        ordering::{renumber, reserve_slot, sort_by_position, sort_comments, sort_wins},
        Board, BoardPatch, Column, ColumnPatch, Comment, Goal, GoalPatch, GoalType, Lane, MoveGoal,
        NewBoard, NewColumn, NewComment, NewGoal, Validate,
    },
    error::{GoalboardError, Result},
};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tracing::debug;

/// Entity kinds, one document collection each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Boards,
    Columns,
    Goals,
    Comments,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Boards,
        Collection::Columns,
        Collection::Goals,
        Collection::Comments,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Boards => "boards",
            Self::Columns => "columns",
            Self::Goals => "goals",
            Self::Comments => "comments",
        }
    }
}

/// A stored entity of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Board(Board),
    Column(Column),
    Goal(Goal),
    Comment(Comment),
}

impl Document {
    pub fn collection(&self) -> Collection {
        match self {
            Self::Board(_) => Collection::Boards,
            Self::Column(_) => Collection::Columns,
            Self::Goal(_) => Collection::Goals,
            Self::Comment(_) => Collection::Comments,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Board(b) => &b.id,
            Self::Column(c) => &c.id,
            Self::Goal(g) => &g.id,
            Self::Comment(c) => &c.id,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        let json = match self {
            Self::Board(b) => serde_json::to_string_pretty(b)?,
            Self::Column(c) => serde_json::to_string_pretty(c)?,
            Self::Goal(g) => serde_json::to_string_pretty(g)?,
            Self::Comment(c) => serde_json::to_string_pretty(c)?,
        };
        Ok(json)
    }

    pub fn from_json(collection: Collection, json: &str) -> Result<Self> {
        let doc = match collection {
            Collection::Boards => Self::Board(serde_json::from_str(json)?),
            Collection::Columns => Self::Column(serde_json::from_str(json)?),
            Collection::Goals => Self::Goal(serde_json::from_str(json)?),
            Collection::Comments => Self::Comment(serde_json::from_str(json)?),
        };
        Ok(doc)
    }
}

/// One write of a batch
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOp {
    Put(Document),
    Delete(Collection, String),
}

/// Boards, columns, goals and comments keyed by id
#[derive(Debug, Default)]
pub struct Collections {
    boards: HashMap<String, Board>,
    columns: HashMap<String, Column>,
    goals: HashMap<String, Goal>,
    comments: HashMap<String, Comment>,
    journal: Option<Vec<BatchOp>>,
}

impl Collections {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sample board with its three columns and four goals
    pub fn seeded() -> Self {
        let now = Utc::now();
        let mut state = Self::new();

        state.put_board(Board {
            id: "board1".to_string(),
            title: "Personal Goals Board".to_string(),
            description: Some("Organize and track your short-term and long-term goals".to_string()),
            created_at: now,
        });

        let columns = [("col1", "To Do", "#3B82F6"), ("col2", "Doing", "#8B5CF6"), ("col3", "Done", "#10B981")];
        for (position, (id, title, color)) in columns.into_iter().enumerate() {
            state.put_column(Column {
                id: id.to_string(),
                board_id: "board1".to_string(),
                title: title.to_string(),
                position: position as u32,
                color: color.to_string(),
            });
        }

        let goals = [
            ("goal1", "col1", 0, "Learn React Hooks", "Master useState, useEffect, and custom hooks for better state management", GoalType::ShortTerm, "JD", 2, 5, None),
            ("goal2", "col1", 1, "Build Portfolio Website", "Create a professional portfolio showcasing my projects and skills", GoalType::LongTerm, "SM", 0, 8, None),
            ("goal3", "col2", 0, "Daily Meditation Practice", "Establish a consistent 15-minute morning meditation routine", GoalType::ShortTerm, "JD", 7, 21, None),
            ("goal4", "col3", 0, "Set Up GitHub Repository", "Initialize project repository with proper documentation", GoalType::ShortTerm, "SM", 3, 3, Some(now)),
        ];
        for (index, (id, column_id, position, title, description, goal_type, assignee, done, total, completed_at)) in
            goals.into_iter().enumerate()
        {
            state.put_goal(Goal {
                id: id.to_string(),
                board_id: "board1".to_string(),
                column_id: Some(column_id.to_string()),
                title: title.to_string(),
                description: Some(description.to_string()),
                position,
                goal_type,
                assignee: assignee.to_string(),
                completed_subtasks: done,
                total_subtasks: total,
                is_win: false,
                // Distinct creation times keep tie-breaks deterministic
                created_at: now + Duration::milliseconds(index as i64),
                completed_at,
            });
        }

        state
    }

    /// Adds a previously stored document without journaling it
    pub fn load(&mut self, doc: Document) {
        match doc {
            Document::Board(b) => {
                self.boards.insert(b.id.clone(), b);
            }
            Document::Column(c) => {
                self.columns.insert(c.id.clone(), c);
            }
            Document::Goal(g) => {
                self.goals.insert(g.id.clone(), g);
            }
            Document::Comment(c) => {
                self.comments.insert(c.id.clone(), c);
            }
        }
    }

    /// Starts recording writes so they can be committed as a batch
    pub fn start_journal(&mut self) {
        self.journal = Some(Vec::new());
    }

    /// Returns the writes recorded since [`Collections::start_journal`]
    pub fn take_journal(&mut self) -> Vec<BatchOp> {
        self.journal.take().unwrap_or_default()
    }

    // ── Reads ─────────────────────────────────────────────────────────

    pub fn boards(&self) -> Vec<Board> {
        let mut boards: Vec<Board> = self.boards.values().cloned().collect();
        boards.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        boards
    }

    pub fn board(&self, id: &str) -> Result<&Board> {
        self.boards
            .get(id)
            .ok_or_else(|| GoalboardError::BoardNotFound(id.to_string()))
    }

    pub fn columns_of(&self, board_id: &str) -> Vec<Column> {
        let mut columns: Vec<Column> = self
            .columns
            .values()
            .filter(|c| c.board_id == board_id)
            .cloned()
            .collect();
        columns.sort_by(|a, b| a.position.cmp(&b.position).then(a.id.cmp(&b.id)));
        columns
    }

    pub fn column(&self, id: &str) -> Result<&Column> {
        self.columns
            .get(id)
            .ok_or_else(|| GoalboardError::ColumnNotFound(id.to_string()))
    }

    /// Non-win goals of a board
    pub fn goals_of(&self, board_id: &str) -> Vec<Goal> {
        let mut goals: Vec<Goal> = self
            .goals
            .values()
            .filter(|g| g.board_id == board_id && !g.is_win)
            .cloned()
            .collect();
        sort_by_position(&mut goals);
        goals
    }

    /// Non-win goals of a column
    pub fn goals_in(&self, column_id: &str) -> Vec<Goal> {
        let mut goals: Vec<Goal> = self
            .goals
            .values()
            .filter(|g| g.column_id.as_deref() == Some(column_id) && !g.is_win)
            .cloned()
            .collect();
        sort_by_position(&mut goals);
        goals
    }

    pub fn wins_of(&self, board_id: &str) -> Vec<Goal> {
        let mut wins: Vec<Goal> = self
            .goals
            .values()
            .filter(|g| g.board_id == board_id && g.is_win)
            .cloned()
            .collect();
        sort_wins(&mut wins);
        wins
    }

    pub fn goal(&self, id: &str) -> Result<&Goal> {
        self.goals
            .get(id)
            .ok_or_else(|| GoalboardError::GoalNotFound(id.to_string()))
    }

    pub fn comments_on(&self, goal_id: &str) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .comments
            .values()
            .filter(|c| c.goal_id == goal_id)
            .cloned()
            .collect();
        sort_comments(&mut comments);
        comments
    }

    // ── Boards ────────────────────────────────────────────────────────

    pub fn create_board(&mut self, new: NewBoard) -> Result<Board> {
        new.validate()?;

        let board = Board::new(new.title, new.description);
        self.put_board(board.clone());
        for column in board.default_columns() {
            self.put_column(column);
        }

        debug!(board_id = %board.id, "created board with default columns");
        Ok(board)
    }

    pub fn update_board(&mut self, id: &str, patch: BoardPatch) -> Result<Board> {
        patch.validate()?;

        let mut board = self.board(id)?.clone();
        if let Some(title) = patch.title {
            board.title = title;
        }
        if let Some(description) = patch.description {
            board.description = non_empty(description);
        }

        self.put_board(board.clone());
        Ok(board)
    }

    /// Deletes a board with its columns, goals and their comments
    pub fn delete_board(&mut self, id: &str) -> Result<()> {
        self.board(id)?;

        let goal_ids: Vec<String> = self
            .goals
            .values()
            .filter(|g| g.board_id == id)
            .map(|g| g.id.clone())
            .collect();
        for goal_id in &goal_ids {
            self.drop_goal(goal_id);
        }

        let column_ids: Vec<String> = self
            .columns
            .values()
            .filter(|c| c.board_id == id)
            .map(|c| c.id.clone())
            .collect();
        for column_id in &column_ids {
            self.drop_document(Collection::Columns, column_id);
        }

        self.drop_document(Collection::Boards, id);

        debug!(
            board_id = id,
            columns = column_ids.len(),
            goals = goal_ids.len(),
            "deleted board"
        );
        Ok(())
    }

    // ── Columns ───────────────────────────────────────────────────────

    pub fn create_column(&mut self, new: NewColumn) -> Result<Column> {
        new.validate()?;
        self.board(&new.board_id)?;

        let mut others = self.columns_of(&new.board_id);
        let position = reserve_slot(&mut others, new.position.unwrap_or(u32::MAX));
        self.save_column_positions(others);

        let color = new.color.unwrap_or_else(|| DEFAULT_COLUMN_COLOR.to_string());
        let column = Column::new(new.board_id, new.title, position, color);
        self.put_column(column.clone());

        debug!(column_id = %column.id, position, "created column");
        Ok(column)
    }

    pub fn update_column(&mut self, id: &str, patch: ColumnPatch) -> Result<Column> {
        patch.validate()?;

        let mut column = self.column(id)?.clone();
        if let Some(title) = patch.title {
            column.title = title;
        }
        if let Some(color) = patch.color {
            column.color = color;
        }
        if let Some(target) = patch.position {
            let mut others: Vec<Column> = self
                .columns_of(&column.board_id)
                .into_iter()
                .filter(|c| c.id != column.id)
                .collect();
            column.position = reserve_slot(&mut others, target);
            self.save_column_positions(others);
        }

        self.put_column(column.clone());
        Ok(column)
    }

    /// Deletes a column with its goals and their comments
    pub fn delete_column(&mut self, id: &str) -> Result<()> {
        let column = self.column(id)?.clone();

        let goal_ids: Vec<String> = self
            .goals
            .values()
            .filter(|g| g.column_id.as_deref() == Some(id))
            .map(|g| g.id.clone())
            .collect();
        for goal_id in &goal_ids {
            self.drop_goal(goal_id);
        }
        self.drop_document(Collection::Columns, id);

        let mut remaining = self.columns_of(&column.board_id);
        renumber(&mut remaining);
        self.save_column_positions(remaining);

        debug!(column_id = id, goals = goal_ids.len(), "deleted column");
        Ok(())
    }

    // ── Goals ─────────────────────────────────────────────────────────

    pub fn create_goal(&mut self, new: NewGoal) -> Result<Goal> {
        new.validate()?;
        self.board(&new.board_id)?;
        self.require_column_on_board(&new.column_id, &new.board_id)?;

        let lane = Lane::Column(new.column_id.clone());
        let mut others = self.lane_members(&new.board_id, &lane, None);
        let position = reserve_slot(&mut others, new.position.unwrap_or(u32::MAX));
        self.save_goal_positions(others);

        let goal = Goal {
            id: new_id(),
            board_id: new.board_id,
            column_id: Some(new.column_id),
            title: new.title,
            description: new.description.and_then(non_empty),
            position,
            goal_type: new.goal_type,
            assignee: new.assignee,
            completed_subtasks: 0,
            total_subtasks: new.total_subtasks,
            is_win: false,
            created_at: Utc::now(),
            completed_at: None,
        };
        self.put_goal(goal.clone());

        debug!(goal_id = %goal.id, position, "created goal");
        Ok(goal)
    }

    pub fn update_goal(&mut self, id: &str, patch: GoalPatch, now: DateTime<Utc>) -> Result<Goal> {
        patch.validate()?;

        let mut goal = self.goal(id)?.clone();
        if let Some(title) = &patch.title {
            goal.title = title.clone();
        }
        if let Some(description) = &patch.description {
            goal.description = non_empty(description.clone());
        }
        if let Some(goal_type) = patch.goal_type {
            goal.goal_type = goal_type;
        }
        if let Some(assignee) = &patch.assignee {
            goal.assignee = assignee.clone();
        }
        if let Some(done) = patch.completed_subtasks {
            goal.completed_subtasks = done;
        }
        if let Some(total) = patch.total_subtasks {
            goal.total_subtasks = total;
        }
        if goal.completed_subtasks > goal.total_subtasks {
            return Err(GoalboardError::validation(format!(
                "completedSubtasks ({}) exceeds totalSubtasks ({})",
                goal.completed_subtasks, goal.total_subtasks
            )));
        }

        let mut goal = if patch.moves_goal() {
            let destination =
                self.resolve_destination(&goal, patch.column_id.as_deref(), patch.is_win)?;
            let target = patch.position.unwrap_or(goal.position);
            let completed_at = (patch.is_win == Some(true)).then_some(now);
            self.relocate(goal, destination, target, completed_at)
        } else {
            goal
        };

        if let Some(completed_at) = patch.completed_at {
            goal.completed_at = Some(completed_at);
        }

        self.put_goal(goal.clone());
        Ok(goal)
    }

    /// Relocates a goal and restores dense positions in every lane it touched.
    ///
    /// The source lane is compacted and the destination lane renumbered around
    /// the requested slot. Promotion to a win stamps `now` as completion time.
    pub fn move_goal(&mut self, mv: &MoveGoal, now: DateTime<Utc>) -> Result<Goal> {
        mv.validate()?;

        let goal = self.goal(&mv.goal_id)?.clone();
        let destination =
            self.resolve_destination(&goal, mv.target_column_id.as_deref(), mv.is_win)?;
        let completed_at = (mv.is_win == Some(true)).then_some(now);

        let goal = self.relocate(goal, destination, mv.target_position, completed_at);
        debug!(
            goal_id = %goal.id,
            column_id = ?goal.column_id,
            position = goal.position,
            is_win = goal.is_win,
            "moved goal"
        );
        Ok(goal)
    }

    /// Deletes a goal with its comments
    pub fn delete_goal(&mut self, id: &str) -> Result<()> {
        let goal = self.goal(id)?.clone();
        self.drop_goal(id);

        let mut remaining = self.lane_members(&goal.board_id, &goal.lane(), None);
        renumber(&mut remaining);
        self.save_goal_positions(remaining);

        debug!(goal_id = id, "deleted goal");
        Ok(())
    }

    // ── Comments ──────────────────────────────────────────────────────

    pub fn create_comment(&mut self, new: NewComment) -> Result<Comment> {
        new.validate()?;
        self.goal(&new.goal_id)?;

        let comment = Comment::new(new.goal_id, new.author, new.content, new.gif_url);
        self.put_comment(comment.clone());
        Ok(comment)
    }

    pub fn delete_comment(&mut self, id: &str) -> Result<()> {
        if !self.comments.contains_key(id) {
            return Err(GoalboardError::CommentNotFound(id.to_string()));
        }
        self.drop_document(Collection::Comments, id);
        Ok(())
    }

    // ── Internals ─────────────────────────────────────────────────────

    fn require_column_on_board(&self, column_id: &str, board_id: &str) -> Result<()> {
        let column = self.column(column_id)?;
        if column.board_id != board_id {
            return Err(GoalboardError::validation(format!(
                "column {} does not belong to board {}",
                column_id, board_id
            )));
        }
        Ok(())
    }

    fn resolve_destination(
        &self,
        goal: &Goal,
        target_column_id: Option<&str>,
        is_win: Option<bool>,
    ) -> Result<Lane> {
        match (is_win, target_column_id) {
            (Some(true), _) => Ok(Lane::Wins),
            (_, Some(column_id)) => {
                self.require_column_on_board(column_id, &goal.board_id)?;
                Ok(Lane::Column(column_id.to_string()))
            }
            (Some(false), None) if goal.is_win => Err(GoalboardError::validation(
                "targetColumnId is required to move a win back onto the board",
            )),
            _ => Ok(goal.lane()),
        }
    }

    /// Members of a lane in ascending position order, optionally without one goal
    fn lane_members(&self, board_id: &str, lane: &Lane, exclude: Option<&str>) -> Vec<Goal> {
        let mut members: Vec<Goal> = self
            .goals
            .values()
            .filter(|g| g.board_id == board_id && g.lane() == *lane)
            .filter(|g| Some(g.id.as_str()) != exclude)
            .cloned()
            .collect();
        sort_by_position(&mut members);
        members
    }

    fn relocate(
        &mut self,
        mut goal: Goal,
        destination: Lane,
        target: u32,
        completed_at: Option<DateTime<Utc>>,
    ) -> Goal {
        let source = goal.lane();
        if source != destination {
            let mut left_behind = self.lane_members(&goal.board_id, &source, Some(&goal.id));
            renumber(&mut left_behind);
            self.save_goal_positions(left_behind);
        }

        let mut others = self.lane_members(&goal.board_id, &destination, Some(&goal.id));
        let position = reserve_slot(&mut others, target);
        self.save_goal_positions(others);

        match completed_at {
            Some(at) => goal.mark_win(at),
            None => goal.enter_lane(destination),
        }
        goal.position = position;

        self.put_goal(goal.clone());
        goal
    }

    fn save_goal_positions(&mut self, goals: Vec<Goal>) {
        for goal in goals {
            let stale = self
                .goals
                .get(&goal.id)
                .map(|stored| stored.position != goal.position)
                .unwrap_or(true);
            if stale {
                self.put_goal(goal);
            }
        }
    }

    fn save_column_positions(&mut self, columns: Vec<Column>) {
        for column in columns {
            let stale = self
                .columns
                .get(&column.id)
                .map(|stored| stored.position != column.position)
                .unwrap_or(true);
            if stale {
                self.put_column(column);
            }
        }
    }

    /// Removes a goal and its comments
    fn drop_goal(&mut self, goal_id: &str) {
        let comment_ids: Vec<String> = self
            .comments
            .values()
            .filter(|c| c.goal_id == goal_id)
            .map(|c| c.id.clone())
            .collect();
        for comment_id in &comment_ids {
            self.drop_document(Collection::Comments, comment_id);
        }
        self.drop_document(Collection::Goals, goal_id);
    }

    fn record(&mut self, op: BatchOp) {
        if let Some(journal) = self.journal.as_mut() {
            journal.push(op);
        }
    }

    fn put_board(&mut self, board: Board) {
        self.record(BatchOp::Put(Document::Board(board.clone())));
        self.boards.insert(board.id.clone(), board);
    }

    fn put_column(&mut self, column: Column) {
        self.record(BatchOp::Put(Document::Column(column.clone())));
        self.columns.insert(column.id.clone(), column);
    }

    fn put_goal(&mut self, goal: Goal) {
        self.record(BatchOp::Put(Document::Goal(goal.clone())));
        self.goals.insert(goal.id.clone(), goal);
    }

    fn put_comment(&mut self, comment: Comment) {
        self.record(BatchOp::Put(Document::Comment(comment.clone())));
        self.comments.insert(comment.id.clone(), comment);
    }

    fn drop_document(&mut self, collection: Collection, id: &str) {
        match collection {
            Collection::Boards => {
                self.boards.remove(id);
            }
            Collection::Columns => {
                self.columns.remove(id);
            }
            Collection::Goals => {
                self.goals.remove(id);
            }
            Collection::Comments => {
                self.comments.remove(id);
            }
        }
        self.record(BatchOp::Delete(collection, id.to_string()));
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
