use std::sync::Arc;

use domains::{
    BoardId, BoardRepository, Comment, CommentId, CommentRepository, DomainError, NewComment,
    Result,
};
use tracing::{info, instrument};

use crate::visible_board;

/// Comment use cases. Board existence is checked through the board store.
#[derive(Clone)]
pub struct CommentService {
    boards: Arc<dyn BoardRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(boards: Arc<dyn BoardRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { boards, comments }
    }

    #[instrument(skip(self))]
    pub async fn get_comments(&self, board_id: BoardId) -> Result<Vec<Comment>> {
        visible_board(self.boards.as_ref(), board_id).await?;
        Ok(self.comments.find_by_board(board_id).await?)
    }

    #[instrument(skip(self, content))]
    pub async fn create_comment(
        &self,
        board_id: BoardId,
        content: String,
        username: String,
    ) -> Result<Comment> {
        let board = visible_board(self.boards.as_ref(), board_id).await?;
        // The board may have been deleted between lookup and insert.
        let comment = self
            .comments
            .insert(NewComment::new(content, username, &board))
            .await?
            .ok_or_else(|| DomainError::board_not_found(board_id))?;
        info!(comment_id = comment.id(), board_id, "comment created");
        Ok(comment)
    }

    /// Replaces the content. The owning board is not re-checked; a comment
    /// whose board was deleted is already tombstoned by the cascade.
    #[instrument(skip(self, content))]
    pub async fn update_comment(&self, comment_id: CommentId, content: String) -> Result<Comment> {
        let mut comment = self.visible_comment(comment_id).await?;
        comment.update(content);

        self.comments
            .update(&comment)
            .await?
            .ok_or_else(|| DomainError::comment_not_found(comment_id))
    }

    #[instrument(skip(self))]
    pub async fn delete_comment(&self, comment_id: CommentId) -> Result<()> {
        self.visible_comment(comment_id).await?;

        if !self.comments.soft_delete(comment_id).await? {
            return Err(DomainError::comment_not_found(comment_id));
        }
        info!(comment_id, "comment deleted");
        Ok(())
    }

    async fn visible_comment(&self, id: CommentId) -> Result<Comment> {
        self.comments
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::comment_not_found(id))
    }
}
