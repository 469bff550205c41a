use axum::extract::State;
use domains::BoardId;

use super::ApiResult;
use crate::dto::{BoardResponse, CreateBoardRequest, UpdateBoardRequest};
use crate::error::{ApiJson, ApiPath};
use crate::response::ApiResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/boards",
    tag = "boards",
    responses(
        (status = 200, description = "Every visible board", body = ApiResponse<Vec<BoardResponse>>),
        (status = 500, description = "INTERNAL_SERVER_ERROR"),
    )
)]
pub async fn get_boards(State(state): State<AppState>) -> ApiResult<Vec<BoardResponse>> {
    let boards = state.boards.get_boards().await?;
    Ok(ApiResponse::success(
        boards.into_iter().map(BoardResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/boards/{board_id}",
    tag = "boards",
    params(("board_id" = i64, Path, description = "Board id")),
    responses(
        (status = 200, description = "The board", body = ApiResponse<BoardResponse>),
        (status = 404, description = "BOARD_NOT_FOUND"),
        (status = 500, description = "INTERNAL_SERVER_ERROR"),
    )
)]
pub async fn get_board(
    State(state): State<AppState>,
    ApiPath(board_id): ApiPath<BoardId>,
) -> ApiResult<BoardResponse> {
    let board = state.boards.get_board(board_id).await?;
    Ok(ApiResponse::success(board.into()))
}

#[utoipa::path(
    post,
    path = "/api/boards",
    tag = "boards",
    request_body = CreateBoardRequest,
    responses(
        (status = 200, description = "The created board", body = ApiResponse<BoardResponse>),
        (status = 400, description = "INVALID_REQUEST"),
        (status = 500, description = "INTERNAL_SERVER_ERROR"),
    )
)]
pub async fn create_board(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateBoardRequest>,
) -> ApiResult<BoardResponse> {
    let board = state
        .boards
        .create_board(request.title, request.content, request.username)
        .await?;
    Ok(ApiResponse::success(board.into()))
}

#[utoipa::path(
    put,
    path = "/api/boards/{board_id}",
    tag = "boards",
    params(("board_id" = i64, Path, description = "Board id")),
    request_body = UpdateBoardRequest,
    responses(
        (status = 200, description = "The updated board", body = ApiResponse<BoardResponse>),
        (status = 400, description = "INVALID_REQUEST"),
        (status = 404, description = "BOARD_NOT_FOUND"),
        (status = 500, description = "INTERNAL_SERVER_ERROR"),
    )
)]
pub async fn update_board(
    State(state): State<AppState>,
    ApiPath(board_id): ApiPath<BoardId>,
    ApiJson(request): ApiJson<UpdateBoardRequest>,
) -> ApiResult<BoardResponse> {
    let board = state
        .boards
        .update_board(board_id, request.title, request.content)
        .await?;
    Ok(ApiResponse::success(board.into()))
}

#[utoipa::path(
    delete,
    path = "/api/boards/{board_id}",
    tag = "boards",
    params(("board_id" = i64, Path, description = "Board id")),
    responses(
        (status = 200, description = "Deleted together with its comments; result is null"),
        (status = 404, description = "BOARD_NOT_FOUND"),
        (status = 500, description = "INTERNAL_SERVER_ERROR"),
    )
)]
pub async fn delete_board(
    State(state): State<AppState>,
    ApiPath(board_id): ApiPath<BoardId>,
) -> ApiResult<()> {
    state.boards.delete_board(board_id).await?;
    Ok(ApiResponse::empty())
}
