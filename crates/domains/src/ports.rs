//! # Persistence Ports
//!
//! Any store must implement these traits to be used by the services.
//!
//! Every read path returns visible rows only. Visibility is decided by
//! [`Tombstoned::is_visible`], which in-memory stores call directly and SQL
//! stores mirror with `deleted_at IS NULL`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{Board, BoardId, Comment, CommentId, NewBoard, NewComment};

/// Entities that are soft-deleted through a tombstone timestamp.
pub trait Tombstoned {
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    fn is_visible(&self) -> bool {
        self.deleted_at().is_none()
    }
}

impl Tombstoned for Board {
    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        Board::deleted_at(self)
    }
}

impl Tombstoned for Comment {
    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        Comment::deleted_at(self)
    }
}

/// Board store.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Visible board with this id.
    async fn find_by_id(&self, id: BoardId) -> anyhow::Result<Option<Board>>;

    /// Every visible board.
    async fn find_all(&self) -> anyhow::Result<Vec<Board>>;

    /// Inserts and returns the row with its id and timestamps assigned.
    async fn insert(&self, board: NewBoard) -> anyhow::Result<Board>;

    /// Persists title and content and refreshes `updated_at`.
    /// Returns `None` when the row is no longer visible.
    async fn update(&self, board: &Board) -> anyhow::Result<Option<Board>>;

    /// Tombstones every visible comment of the board, then the board itself,
    /// as one unit. Returns `false` when the board was not visible.
    async fn soft_delete_cascade(&self, id: BoardId) -> anyhow::Result<bool>;
}

/// Comment store.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: CommentId) -> anyhow::Result<Option<Comment>>;

    /// Visible comments whose board reference equals `board_id`.
    async fn find_by_board(&self, board_id: BoardId) -> anyhow::Result<Vec<Comment>>;

    /// Inserts under the condition that the referenced board is still
    /// visible. Returns `None`, writing nothing, when it is not.
    async fn insert(&self, comment: NewComment) -> anyhow::Result<Option<Comment>>;

    /// Persists content and refreshes `updated_at`.
    /// Returns `None` when the row is no longer visible.
    async fn update(&self, comment: &Comment) -> anyhow::Result<Option<Comment>>;

    /// Returns `false` when the comment was not visible.
    async fn soft_delete(&self, id: CommentId) -> anyhow::Result<bool>;
}
