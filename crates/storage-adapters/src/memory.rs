//! # In-memory store
//!
//! Both tables live behind one `RwLock`, so the board and comment
//! repositories created from the same [`MemoryDatabase`] see each other's
//! writes and a cascade delete is applied under a single write guard.
//! Rows are never removed; deletes set the tombstone.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use domains::{
    Board, BoardId, BoardRepository, Comment, CommentId, CommentRepository, NewBoard, NewComment,
    Timestamps, Tombstoned,
};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Default)]
struct Tables {
    boards: BTreeMap<BoardId, Board>,
    comments: BTreeMap<CommentId, Comment>,
    last_board_id: BoardId,
    last_comment_id: CommentId,
}

/// Shared handle to the in-memory tables. Cheap to clone.
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board_repository(&self) -> MemoryBoardRepository {
        MemoryBoardRepository { db: self.clone() }
    }

    pub fn comment_repository(&self) -> MemoryCommentRepository {
        MemoryCommentRepository { db: self.clone() }
    }

    /// Raw board row, tombstoned or not.
    pub async fn board_row(&self, id: BoardId) -> Option<Board> {
        self.tables.read().await.boards.get(&id).cloned()
    }

    /// Raw comment row, tombstoned or not.
    pub async fn comment_row(&self, id: CommentId) -> Option<Comment> {
        self.tables.read().await.comments.get(&id).cloned()
    }

    /// Number of comment rows ever inserted, including tombstoned ones.
    pub async fn comment_row_count(&self) -> usize {
        self.tables.read().await.comments.len()
    }
}

#[derive(Clone)]
pub struct MemoryBoardRepository {
    db: MemoryDatabase,
}

#[derive(Clone)]
pub struct MemoryCommentRepository {
    db: MemoryDatabase,
}

#[async_trait]
impl BoardRepository for MemoryBoardRepository {
    async fn find_by_id(&self, id: BoardId) -> anyhow::Result<Option<Board>> {
        let tables = self.db.tables.read().await;
        Ok(tables.boards.get(&id).filter(|b| b.is_visible()).cloned())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Board>> {
        let tables = self.db.tables.read().await;
        Ok(tables
            .boards
            .values()
            .filter(|b| b.is_visible())
            .cloned()
            .collect())
    }

    async fn insert(&self, board: NewBoard) -> anyhow::Result<Board> {
        let mut tables = self.db.tables.write().await;
        tables.last_board_id += 1;
        let id = tables.last_board_id;

        let row = Board::hydrate(
            id,
            board.title,
            board.content,
            board.username,
            Timestamps::stamped(Utc::now()),
        );
        tables.boards.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, board: &Board) -> anyhow::Result<Option<Board>> {
        let mut tables = self.db.tables.write().await;
        let Some(stored) = tables
            .boards
            .get_mut(&board.id())
            .filter(|b| b.is_visible())
        else {
            return Ok(None);
        };

        // Author and creation time come from the stored row, not the caller.
        *stored = Board::hydrate(
            stored.id(),
            board.title().to_owned(),
            board.content().to_owned(),
            stored.username().to_owned(),
            stored.timestamps().touched(Utc::now()),
        );
        Ok(Some(stored.clone()))
    }

    async fn soft_delete_cascade(&self, id: BoardId) -> anyhow::Result<bool> {
        let mut tables = self.db.tables.write().await;
        if !tables.boards.get(&id).is_some_and(|b| b.is_visible()) {
            return Ok(false);
        }

        let now = Utc::now();
        let mut cascaded = 0usize;
        for comment in tables
            .comments
            .values_mut()
            .filter(|c| c.board_id() == id && c.is_visible())
        {
            comment.tombstone(now);
            cascaded += 1;
        }
        if let Some(board) = tables.boards.get_mut(&id) {
            board.tombstone(now);
        }

        debug!(board_id = id, cascaded, "board tombstoned");
        Ok(true)
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn find_by_id(&self, id: CommentId) -> anyhow::Result<Option<Comment>> {
        let tables = self.db.tables.read().await;
        Ok(tables.comments.get(&id).filter(|c| c.is_visible()).cloned())
    }

    async fn find_by_board(&self, board_id: BoardId) -> anyhow::Result<Vec<Comment>> {
        let tables = self.db.tables.read().await;
        Ok(tables
            .comments
            .values()
            .filter(|c| c.board_id() == board_id && c.is_visible())
            .cloned()
            .collect())
    }

    async fn insert(&self, comment: NewComment) -> anyhow::Result<Option<Comment>> {
        let mut tables = self.db.tables.write().await;
        let board_id = comment.board_id();
        if !tables.boards.get(&board_id).is_some_and(|b| b.is_visible()) {
            return Ok(None);
        }

        tables.last_comment_id += 1;
        let id = tables.last_comment_id;

        let row = Comment::hydrate(
            id,
            board_id,
            comment.content,
            comment.username,
            Timestamps::stamped(Utc::now()),
        );
        tables.comments.insert(id, row.clone());
        Ok(Some(row))
    }

    async fn update(&self, comment: &Comment) -> anyhow::Result<Option<Comment>> {
        let mut tables = self.db.tables.write().await;
        let Some(stored) = tables
            .comments
            .get_mut(&comment.id())
            .filter(|c| c.is_visible())
        else {
            return Ok(None);
        };

        *stored = Comment::hydrate(
            stored.id(),
            stored.board_id(),
            comment.content().to_owned(),
            stored.username().to_owned(),
            stored.timestamps().touched(Utc::now()),
        );
        Ok(Some(stored.clone()))
    }

    async fn soft_delete(&self, id: CommentId) -> anyhow::Result<bool> {
        let mut tables = self.db.tables.write().await;
        match tables.comments.get_mut(&id).filter(|c| c.is_visible()) {
            Some(comment) => {
                comment.tombstone(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_sequential_from_one() {
        let db = MemoryDatabase::new();
        let boards = db.board_repository();

        let first = boards.insert(NewBoard::new("a", "b", "c")).await.unwrap();
        let second = boards.insert(NewBoard::new("d", "e", "f")).await.unwrap();

        assert_eq!(first.id(), 1);
        assert_eq!(second.id(), 2);
        assert_eq!(first.created_at(), first.updated_at());
    }

    #[tokio::test]
    async fn update_ignores_caller_username_and_created_at() {
        let db = MemoryDatabase::new();
        let boards = db.board_repository();
        let original = boards.insert(NewBoard::new("t", "c", "u")).await.unwrap();

        let forged = Board::hydrate(
            original.id(),
            "t2".into(),
            "c2".into(),
            "mallory".into(),
            Timestamps::stamped(Utc::now() + chrono::Duration::days(1)),
        );
        let saved = boards.update(&forged).await.unwrap().unwrap();

        assert_eq!(saved.title(), "t2");
        assert_eq!(saved.username(), "u");
        assert_eq!(saved.created_at(), original.created_at());
        assert!(saved.updated_at() >= original.updated_at());
    }

    #[tokio::test]
    async fn cascade_tombstones_comments_and_keeps_rows() {
        let db = MemoryDatabase::new();
        let boards = db.board_repository();
        let comments = db.comment_repository();

        let board = boards.insert(NewBoard::new("t", "c", "u")).await.unwrap();
        let other = boards.insert(NewBoard::new("t", "c", "u")).await.unwrap();
        let doomed = comments
            .insert(NewComment::new("x", "y", &board))
            .await
            .unwrap()
            .unwrap();
        let kept = comments
            .insert(NewComment::new("x", "y", &other))
            .await
            .unwrap()
            .unwrap();

        assert!(boards.soft_delete_cascade(board.id()).await.unwrap());
        assert!(!boards.soft_delete_cascade(board.id()).await.unwrap());

        assert!(boards.find_by_id(board.id()).await.unwrap().is_none());
        assert!(comments.find_by_id(doomed.id()).await.unwrap().is_none());
        assert!(comments.find_by_id(kept.id()).await.unwrap().is_some());

        let row = db.board_row(board.id()).await.unwrap();
        assert!(row.deleted_at().is_some());
        let row = db.comment_row(doomed.id()).await.unwrap();
        assert_eq!(row.deleted_at(), db.board_row(board.id()).await.unwrap().deleted_at());
    }

    #[tokio::test]
    async fn updates_on_tombstoned_rows_are_rejected() {
        let db = MemoryDatabase::new();
        let comments = db.comment_repository();
        let board = db
            .board_repository()
            .insert(NewBoard::new("t", "c", "u"))
            .await
            .unwrap();
        let mut comment = comments
            .insert(NewComment::new("x", "y", &board))
            .await
            .unwrap()
            .unwrap();

        assert!(comments.soft_delete(comment.id()).await.unwrap());
        comment.update("z");
        assert!(comments.update(&comment).await.unwrap().is_none());
        assert!(!comments.soft_delete(comment.id()).await.unwrap());
    }

    #[tokio::test]
    async fn insert_on_tombstoned_board_writes_nothing() {
        let db = MemoryDatabase::new();
        let boards = db.board_repository();
        let comments = db.comment_repository();
        let board = boards.insert(NewBoard::new("t", "c", "u")).await.unwrap();
        assert!(boards.soft_delete_cascade(board.id()).await.unwrap());

        let inserted = comments
            .insert(NewComment::new("late", "x", &board))
            .await
            .unwrap();

        assert!(inserted.is_none());
        assert_eq!(db.comment_row_count().await, 0);
    }
}
