use axum::extract::State;
use domains::{BoardId, CommentId};

use super::ApiResult;
use crate::dto::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};
use crate::error::{ApiJson, ApiPath};
use crate::response::ApiResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/boards/{board_id}/comments",
    tag = "comments",
    params(("board_id" = i64, Path, description = "Board id")),
    responses(
        (status = 200, description = "Visible comments of the board", body = ApiResponse<Vec<CommentResponse>>),
        (status = 404, description = "BOARD_NOT_FOUND"),
        (status = 500, description = "INTERNAL_SERVER_ERROR"),
    )
)]
pub async fn get_comments(
    State(state): State<AppState>,
    ApiPath(board_id): ApiPath<BoardId>,
) -> ApiResult<Vec<CommentResponse>> {
    let comments = state.comments.get_comments(board_id).await?;
    Ok(ApiResponse::success(
        comments.into_iter().map(CommentResponse::from).collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/boards/{board_id}/comments",
    tag = "comments",
    params(("board_id" = i64, Path, description = "Board id")),
    request_body = CreateCommentRequest,
    responses(
        (status = 200, description = "The created comment", body = ApiResponse<CommentResponse>),
        (status = 400, description = "INVALID_REQUEST"),
        (status = 404, description = "BOARD_NOT_FOUND"),
        (status = 500, description = "INTERNAL_SERVER_ERROR"),
    )
)]
pub async fn create_comment(
    State(state): State<AppState>,
    ApiPath(board_id): ApiPath<BoardId>,
    ApiJson(request): ApiJson<CreateCommentRequest>,
) -> ApiResult<CommentResponse> {
    let comment = state
        .comments
        .create_comment(board_id, request.content, request.username)
        .await?;
    Ok(ApiResponse::success(comment.into()))
}

#[utoipa::path(
    put,
    path = "/api/comments/{comment_id}",
    tag = "comments",
    params(("comment_id" = i64, Path, description = "Comment id")),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "The updated comment", body = ApiResponse<CommentResponse>),
        (status = 400, description = "INVALID_REQUEST"),
        (status = 404, description = "COMMENT_NOT_FOUND"),
        (status = 500, description = "INTERNAL_SERVER_ERROR"),
    )
)]
pub async fn update_comment(
    State(state): State<AppState>,
    ApiPath(comment_id): ApiPath<CommentId>,
    ApiJson(request): ApiJson<UpdateCommentRequest>,
) -> ApiResult<CommentResponse> {
    let comment = state
        .comments
        .update_comment(comment_id, request.content)
        .await?;
    Ok(ApiResponse::success(comment.into()))
}

#[utoipa::path(
    delete,
    path = "/api/comments/{comment_id}",
    tag = "comments",
    params(("comment_id" = i64, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Deleted; result is null"),
        (status = 404, description = "COMMENT_NOT_FOUND"),
        (status = 500, description = "INTERNAL_SERVER_ERROR"),
    )
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    ApiPath(comment_id): ApiPath<CommentId>,
) -> ApiResult<()> {
    state.comments.delete_comment(comment_id).await?;
    Ok(ApiResponse::empty())
}
