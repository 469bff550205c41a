//! # services
//!
//! Application services: look an entity up, apply the mutation, persist it.
//! Stores are passed in explicitly; nothing here knows about HTTP.

mod board_service;
mod comment_service;

pub use board_service::BoardService;
pub use comment_service::CommentService;

use domains::{Board, BoardId, BoardRepository, DomainError, Result};

/// Resolves a visible board or fails with `NotFound`.
pub(crate) async fn visible_board(boards: &dyn BoardRepository, id: BoardId) -> Result<Board> {
    boards
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::board_not_found(id))
}
