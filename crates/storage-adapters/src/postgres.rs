//! # Postgres store
//!
//! Maps the `boards` / `comments` tables onto the domain models. Every
//! statement that reads or writes a live row carries `deleted_at IS NULL`;
//! that clause is the SQL form of `Tombstoned::is_visible`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::{
    Board, BoardId, BoardRepository, Comment, CommentId, CommentRepository, NewBoard, NewComment,
    Timestamps,
};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::debug;

/// Opens a pool and brings the schema up to date.
pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}

#[derive(sqlx::FromRow)]
struct BoardRow {
    id: i64,
    title: String,
    content: String,
    username: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<BoardRow> for Board {
    fn from(row: BoardRow) -> Self {
        Board::hydrate(
            row.id,
            row.title,
            row.content,
            row.username,
            Timestamps {
                created_at: row.created_at,
                updated_at: row.updated_at,
                deleted_at: row.deleted_at,
            },
        )
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    board_id: i64,
    content: String,
    username: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment::hydrate(
            row.id,
            row.board_id,
            row.content,
            row.username,
            Timestamps {
                created_at: row.created_at,
                updated_at: row.updated_at,
                deleted_at: row.deleted_at,
            },
        )
    }
}

#[derive(Clone)]
pub struct PgBoardRepository {
    pool: PgPool,
}

impl PgBoardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BoardRepository for PgBoardRepository {
    async fn find_by_id(&self, id: BoardId) -> anyhow::Result<Option<Board>> {
        let row = sqlx::query_as::<_, BoardRow>(
            "SELECT id, title, content, username, created_at, updated_at, deleted_at
             FROM boards WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Board::from))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Board>> {
        let rows = sqlx::query_as::<_, BoardRow>(
            "SELECT id, title, content, username, created_at, updated_at, deleted_at
             FROM boards WHERE deleted_at IS NULL ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Board::from).collect())
    }

    async fn insert(&self, board: NewBoard) -> anyhow::Result<Board> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, BoardRow>(
            "INSERT INTO boards (title, content, username, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $4)
             RETURNING id, title, content, username, created_at, updated_at, deleted_at",
        )
        .bind(board.title)
        .bind(board.content)
        .bind(board.username)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update(&self, board: &Board) -> anyhow::Result<Option<Board>> {
        // username and created_at are never part of the SET list.
        let row = sqlx::query_as::<_, BoardRow>(
            "UPDATE boards SET title = $2, content = $3, updated_at = GREATEST(updated_at, $4)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING id, title, content, username, created_at, updated_at, deleted_at",
        )
        .bind(board.id())
        .bind(board.title())
        .bind(board.content())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Board::from))
    }

    async fn soft_delete_cascade(&self, id: BoardId) -> anyhow::Result<bool> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        // 1. Dependents first
        let cascaded = sqlx::query(
            "UPDATE comments SET deleted_at = $2 WHERE board_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        // 2. Then the board itself
        let deleted = sqlx::query(
            "UPDATE boards SET deleted_at = $2 WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        debug!(board_id = id, cascaded, "board tombstoned");
        Ok(true)
    }
}

#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn find_by_id(&self, id: CommentId) -> anyhow::Result<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            "SELECT id, board_id, content, username, created_at, updated_at, deleted_at
             FROM comments WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Comment::from))
    }

    async fn find_by_board(&self, board_id: BoardId) -> anyhow::Result<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            "SELECT id, board_id, content, username, created_at, updated_at, deleted_at
             FROM comments WHERE board_id = $1 AND deleted_at IS NULL ORDER BY id",
        )
        .bind(board_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn insert(&self, comment: NewComment) -> anyhow::Result<Option<Comment>> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, CommentRow>(
            "INSERT INTO comments (board_id, content, username, created_at, updated_at)
             SELECT $1, $2, $3, $4, $4
             WHERE EXISTS (SELECT 1 FROM boards WHERE id = $1 AND deleted_at IS NULL)
             RETURNING id, board_id, content, username, created_at, updated_at, deleted_at",
        )
        .bind(comment.board_id())
        .bind(comment.content)
        .bind(comment.username)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Comment::from))
    }

    async fn update(&self, comment: &Comment) -> anyhow::Result<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            "UPDATE comments SET content = $2, updated_at = GREATEST(updated_at, $3)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING id, board_id, content, username, created_at, updated_at, deleted_at",
        )
        .bind(comment.id())
        .bind(comment.content())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Comment::from))
    }

    async fn soft_delete(&self, id: CommentId) -> anyhow::Result<bool> {
        let affected = sqlx::query(
            "UPDATE comments SET deleted_at = $2 WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }
}
