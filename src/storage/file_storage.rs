use crate::{
    domain::{
        Board, BoardPatch, Column, ColumnPatch, Comment, Goal, GoalPatch, MoveGoal, NewBoard,
        NewColumn, NewComment, NewGoal,
    },
    error::{GoalboardError, Result},
    storage::{
        collections::{BatchOp, Collection, Document},
        Collections, Storage,
    },
};
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::io;
use tokio::{fs, sync::RwLock};
use tracing::debug;

/// Document store: one JSON file per entity, one directory per collection.
///
/// Reference fields (`boardId`, `columnId`, `goalId`) are stored as plain
/// values. Writes hold the store lock exclusively and are committed as a
/// batch; reads share it, so they never observe a batch half-applied. Each
/// document is written to a temporary file and renamed into place. A crash
/// midway through a batch can leave some of its documents unwritten.
pub struct FileStorage {
    root_path: PathBuf,
    lock: RwLock<()>,
}

impl FileStorage {
    const GITIGNORE: &'static str = ".gitignore";

    /// Creates a new FileStorage rooted at the given data directory
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            root_path: data_dir.as_ref().to_path_buf(),
            lock: RwLock::new(()),
        }
    }

    fn collection_dir(&self, collection: Collection) -> PathBuf {
        self.root_path.join(collection.name())
    }

    /// Path of a document, or `None` when the id cannot name a file
    fn document_file(&self, collection: Collection, id: &str) -> Option<PathBuf> {
        if !is_valid_id(id) {
            return None;
        }
        Some(self.collection_dir(collection).join(format!("{}.json", id)))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    async fn read_document(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        let Some(file_path) = self.document_file(collection, id) else {
            return Ok(None);
        };
        match read_if_present(&file_path).await? {
            Some(contents) => Ok(Some(Document::from_json(collection, &contents)?)),
            None => Ok(None),
        }
    }

    async fn read_collection(&self, collection: Collection) -> Result<Vec<Document>> {
        let dir = self.collection_dir(collection);

        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&dir).await?;
        let mut documents = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let valid_stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(is_valid_id)
                .unwrap_or(false);
            if !valid_stem {
                continue;
            }

            if let Some(contents) = read_if_present(&path).await? {
                documents.push(Document::from_json(collection, &contents)?);
            }
        }

        Ok(documents)
    }

    /// Snapshot taken under the shared lock, for read-only operations
    async fn read_snapshot(&self, collections: &[Collection]) -> Result<Collections> {
        let _guard = self.lock.read().await;
        self.snapshot(collections).await
    }

    async fn get_document(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        let _guard = self.lock.read().await;
        self.read_document(collection, id).await
    }

    /// Loads the given collections into an in-process snapshot
    async fn snapshot(&self, collections: &[Collection]) -> Result<Collections> {
        let mut state = Collections::new();
        for collection in collections {
            for doc in self.read_collection(*collection).await? {
                state.load(doc);
            }
        }
        Ok(state)
    }

    async fn commit(&self, batch: Vec<BatchOp>) -> Result<()> {
        for op in batch {
            match op {
                BatchOp::Put(doc) => {
                    let collection = doc.collection();
                    let file_path = self.document_file(collection, doc.id()).ok_or_else(|| {
                        GoalboardError::StorageError(format!("invalid document id '{}'", doc.id()))
                    })?;
                    self.ensure_directory_exists(&self.collection_dir(collection))
                        .await?;

                    let tmp_path = file_path.with_extension("json.tmp");
                    fs::write(&tmp_path, doc.to_json()?).await?;
                    fs::rename(&tmp_path, &file_path).await?;
                }
                BatchOp::Delete(collection, id) => {
                    if let Some(file_path) = self.document_file(collection, &id) {
                        match fs::remove_file(&file_path).await {
                            Ok(()) => {}
                            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                            Err(e) => return Err(e.into()),
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Runs a mutation against a fresh snapshot and commits what it wrote
    async fn apply<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Collections) -> Result<T> + Send,
        T: Send,
    {
        let _guard = self.lock.write().await;

        let mut state = self.snapshot(&Collection::ALL).await?;
        state.start_journal();
        let value = op(&mut state)?;
        let batch = state.take_journal();

        debug!(writes = batch.len(), "committing batch");
        self.commit(batch).await?;
        Ok(value)
    }
}

/// Reads a file, treating one that vanished before it could be opened as absent
async fn read_if_present(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Ids are generated UUIDs or simple seed names; anything else is never a file
fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;
        for collection in Collection::ALL {
            self.ensure_directory_exists(&self.collection_dir(collection))
                .await?;
        }

        let gitignore_path = self.root_path.join(Self::GITIGNORE);
        if !gitignore_path.exists() {
            fs::write(gitignore_path, "# Interrupted writes\n*.tmp\n").await?;
        }

        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        self.root_path.exists()
            && Collection::ALL
                .iter()
                .all(|collection| self.collection_dir(*collection).exists())
    }

    async fn list_boards(&self) -> Result<Vec<Board>> {
        Ok(self.read_snapshot(&[Collection::Boards]).await?.boards())
    }

    async fn get_board(&self, id: &str) -> Result<Board> {
        match self.get_document(Collection::Boards, id).await? {
            Some(Document::Board(board)) => Ok(board),
            _ => Err(GoalboardError::BoardNotFound(id.to_string())),
        }
    }

    async fn create_board(&self, board: NewBoard) -> Result<Board> {
        self.apply(move |state| state.create_board(board)).await
    }

    async fn update_board(&self, id: &str, patch: BoardPatch) -> Result<Board> {
        self.apply(move |state| state.update_board(id, patch)).await
    }

    async fn delete_board(&self, id: &str) -> Result<()> {
        self.apply(move |state| state.delete_board(id)).await
    }

    async fn list_columns(&self, board_id: &str) -> Result<Vec<Column>> {
        Ok(self.read_snapshot(&[Collection::Columns]).await?.columns_of(board_id))
    }

    async fn create_column(&self, column: NewColumn) -> Result<Column> {
        self.apply(move |state| state.create_column(column)).await
    }

    async fn update_column(&self, id: &str, patch: ColumnPatch) -> Result<Column> {
        self.apply(move |state| state.update_column(id, patch)).await
    }

    async fn delete_column(&self, id: &str) -> Result<()> {
        self.apply(move |state| state.delete_column(id)).await
    }

    async fn list_goals_by_board(&self, board_id: &str) -> Result<Vec<Goal>> {
        Ok(self.read_snapshot(&[Collection::Goals]).await?.goals_of(board_id))
    }

    async fn list_goals_by_column(&self, column_id: &str) -> Result<Vec<Goal>> {
        Ok(self.read_snapshot(&[Collection::Goals]).await?.goals_in(column_id))
    }

    async fn list_wins(&self, board_id: &str) -> Result<Vec<Goal>> {
        Ok(self.read_snapshot(&[Collection::Goals]).await?.wins_of(board_id))
    }

    async fn get_goal(&self, id: &str) -> Result<Goal> {
        match self.get_document(Collection::Goals, id).await? {
            Some(Document::Goal(goal)) => Ok(goal),
            _ => Err(GoalboardError::GoalNotFound(id.to_string())),
        }
    }

    async fn create_goal(&self, goal: NewGoal) -> Result<Goal> {
        self.apply(move |state| state.create_goal(goal)).await
    }

    async fn update_goal(&self, id: &str, patch: GoalPatch) -> Result<Goal> {
        let now = Utc::now();
        self.apply(move |state| state.update_goal(id, patch, now)).await
    }

    async fn move_goal(&self, mv: MoveGoal) -> Result<Goal> {
        let now = Utc::now();
        self.apply(move |state| state.move_goal(&mv, now)).await
    }

    async fn delete_goal(&self, id: &str) -> Result<()> {
        self.apply(move |state| state.delete_goal(id)).await
    }

    async fn list_comments(&self, goal_id: &str) -> Result<Vec<Comment>> {
        Ok(self.read_snapshot(&[Collection::Comments]).await?.comments_on(goal_id))
    }

    async fn create_comment(&self, comment: NewComment) -> Result<Comment> {
        self.apply(move |state| state.create_comment(comment)).await
    }

    async fn delete_comment(&self, id: &str) -> Result<()> {
        self.apply(move |state| state.delete_comment(id)).await
    }
}
