use std::sync::Arc;

use domains::{BoardRepository, CommentRepository};
use services::{BoardService, CommentService};

/// Services shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub boards: BoardService,
    pub comments: CommentService,
}

impl AppState {
    /// Builds both services over one pair of stores.
    pub fn from_repositories(
        boards: Arc<dyn BoardRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            boards: BoardService::new(boards.clone()),
            comments: CommentService::new(boards, comments),
        }
    }
}
