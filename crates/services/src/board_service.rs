use std::sync::Arc;

use domains::{Board, BoardId, BoardRepository, DomainError, NewBoard, Result};
use tracing::{debug, info, instrument};

use crate::visible_board;

/// Board use cases.
#[derive(Clone)]
pub struct BoardService {
    boards: Arc<dyn BoardRepository>,
}

impl BoardService {
    pub fn new(boards: Arc<dyn BoardRepository>) -> Self {
        Self { boards }
    }

    #[instrument(skip(self))]
    pub async fn get_board(&self, id: BoardId) -> Result<Board> {
        visible_board(self.boards.as_ref(), id).await
    }

    #[instrument(skip(self))]
    pub async fn get_boards(&self) -> Result<Vec<Board>> {
        let boards = self.boards.find_all().await?;
        debug!(count = boards.len(), "listed boards");
        Ok(boards)
    }

    #[instrument(skip(self, title, content))]
    pub async fn create_board(
        &self,
        title: String,
        content: String,
        username: String,
    ) -> Result<Board> {
        let board = self
            .boards
            .insert(NewBoard::new(title, content, username))
            .await?;
        info!(board_id = board.id(), "board created");
        Ok(board)
    }

    /// Replaces title and content. The author never changes.
    #[instrument(skip(self, title, content))]
    pub async fn update_board(&self, id: BoardId, title: String, content: String) -> Result<Board> {
        let mut board = visible_board(self.boards.as_ref(), id).await?;
        board.update(title, content);

        // The row may have been deleted between lookup and save.
        self.boards
            .update(&board)
            .await?
            .ok_or_else(|| DomainError::board_not_found(id))
    }

    /// Soft-deletes the board together with its comments. Deleting twice
    /// fails the second time because the board is no longer visible.
    #[instrument(skip(self))]
    pub async fn delete_board(&self, id: BoardId) -> Result<()> {
        visible_board(self.boards.as_ref(), id).await?;

        if !self.boards.soft_delete_cascade(id).await? {
            return Err(DomainError::board_not_found(id));
        }
        info!(board_id = id, "board deleted");
        Ok(())
    }
}
