//! OpenAPI description of the HTTP surface. Descriptive only.

use axum::Json;
use utoipa::OpenApi;

use crate::dto::{
    BoardResponse, CommentResponse, CreateBoardRequest, CreateCommentRequest, UpdateBoardRequest,
    UpdateCommentRequest,
};
use crate::handlers::{boards, comments};
use crate::response::ResultCode;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "board-comment",
        description = "Boards and their comments. Every body is wrapped as {resultCode, result}."
    ),
    paths(
        boards::get_boards,
        boards::get_board,
        boards::create_board,
        boards::update_board,
        boards::delete_board,
        comments::get_comments,
        comments::create_comment,
        comments::update_comment,
        comments::delete_comment,
    ),
    components(schemas(
        BoardResponse,
        CommentResponse,
        CreateBoardRequest,
        UpdateBoardRequest,
        CreateCommentRequest,
        UpdateCommentRequest,
        ResultCode,
    )),
    tags(
        (name = "boards", description = "Board posts"),
        (name = "comments", description = "Comments attached to a board"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
