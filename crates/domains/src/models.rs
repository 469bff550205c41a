//! # Domain Models
//!
//! Boards and the comments attached to them. Fields are private so that the
//! only ways to change a persisted entity are the mutation methods below;
//! identifiers and timestamps are assigned by the store at persistence time.

use chrono::{DateTime, Utc};

pub type BoardId = i64;
pub type CommentId = i64;

/// Persistence-managed timestamps carried by every entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamps {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Tombstone. `Some` means the row is logically absent.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Timestamps {
    /// Stamps a freshly inserted row: `created_at == updated_at`.
    pub fn stamped(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Refreshes `updated_at`, never moving it backwards.
    pub fn touched(self, now: DateTime<Utc>) -> Self {
        Self {
            updated_at: now.max(self.updated_at),
            ..self
        }
    }
}

/// A top-level post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    id: BoardId,
    title: String,
    content: String,
    username: String,
    timestamps: Timestamps,
}

impl Board {
    /// Rebuilds a board from a stored row. Only stores should call this.
    pub fn hydrate(
        id: BoardId,
        title: String,
        content: String,
        username: String,
        timestamps: Timestamps,
    ) -> Self {
        Self {
            id,
            title,
            content,
            username,
            timestamps,
        }
    }

    pub fn id(&self) -> BoardId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn timestamps(&self) -> Timestamps {
        self.timestamps
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.timestamps.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.timestamps.updated_at
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.timestamps.deleted_at
    }

    /// Replaces title and content. The author is fixed at creation.
    pub fn update(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.title = title.into();
        self.content = content.into();
    }

    /// Moves the board to the terminal deleted state.
    pub fn tombstone(&mut self, at: DateTime<Utc>) {
        self.timestamps.deleted_at.get_or_insert(at);
    }
}

/// An unsaved board, as produced by the board factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBoard {
    pub title: String,
    pub content: String,
    pub username: String,
}

impl NewBoard {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            username: username.into(),
        }
    }
}

/// A reply attached to exactly one board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: CommentId,
    board_id: BoardId,
    content: String,
    username: String,
    timestamps: Timestamps,
}

impl Comment {
    /// Rebuilds a comment from a stored row. Only stores should call this.
    pub fn hydrate(
        id: CommentId,
        board_id: BoardId,
        content: String,
        username: String,
        timestamps: Timestamps,
    ) -> Self {
        Self {
            id,
            board_id,
            content,
            username,
            timestamps,
        }
    }

    pub fn id(&self) -> CommentId {
        self.id
    }

    pub fn board_id(&self) -> BoardId {
        self.board_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn timestamps(&self) -> Timestamps {
        self.timestamps
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.timestamps.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.timestamps.updated_at
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.timestamps.deleted_at
    }

    pub fn update(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn tombstone(&mut self, at: DateTime<Utc>) {
        self.timestamps.deleted_at.get_or_insert(at);
    }
}

/// An unsaved comment. Can only be built from an already resolved board, so
/// the board reference is valid at creation time and never reassigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    board_id: BoardId,
    pub content: String,
    pub username: String,
}

impl NewComment {
    pub fn new(content: impl Into<String>, username: impl Into<String>, board: &Board) -> Self {
        Self {
            board_id: board.id(),
            content: content.into(),
            username: username.into(),
        }
    }

    pub fn board_id(&self) -> BoardId {
        self.board_id
    }
}
