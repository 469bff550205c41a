//! Request bodies and the externally visible shapes of boards and comments.

use chrono::{DateTime, Utc};
use domains::{Board, BoardId, Comment, CommentId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBoardRequest {
    pub title: String,
    pub content: String,
    pub username: String,
}

/// `username` is accepted for compatibility with the create body but never
/// applied; a board's author is fixed at creation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBoardRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCommentRequest {
    pub content: String,
    pub username: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    pub id: BoardId,
    pub title: String,
    pub content: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Board> for BoardResponse {
    fn from(board: Board) -> Self {
        Self {
            id: board.id(),
            title: board.title().to_owned(),
            content: board.content().to_owned(),
            username: board.username().to_owned(),
            created_at: board.created_at(),
            updated_at: board.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: CommentId,
    pub board_id: BoardId,
    pub content: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id(),
            board_id: comment.board_id(),
            content: comment.content().to_owned(),
            username: comment.username().to_owned(),
            created_at: comment.created_at(),
            updated_at: comment.updated_at(),
        }
    }
}
