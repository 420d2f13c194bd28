use super::models::{Comment, CommentCreate};
use super::services;
use crate::common::errors::BusinessResult;
use crate::common::models::{Paginated, PaginationParams};
use crate::common::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use sea_orm::TransactionTrait;
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_comments, create_comment))
        .with_state(state.clone())
}

#[utoipa::path(
    get,
    path = "/comments/{biosample_id}",
    params(
        ("biosample_id" = i32, Path, description = "Biosample the comments belong to"),
        PaginationParams
    ),
    responses(
        (status = OK, description = "One page of comments, newest first", body = Paginated<Comment>),
        (status = NOT_FOUND, description = "Biosample not found"),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid pagination parameters")
    ),
    tag = "comments",
    summary = "List comments of a biosample"
)]
pub async fn list_comments(
    State(state): State<AppState>,
    Path(biosample_id): Path<i32>,
    Query(params): Query<PaginationParams>,
) -> BusinessResult<Json<Paginated<Comment>>> {
    let pagination = params.validate()?;

    let txn = state.db.begin().await?;
    let page = services::list(&txn, biosample_id, pagination).await?;
    txn.commit().await?;

    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "/comments/{biosample_id}",
    params(
        ("biosample_id" = i32, Path, description = "Biosample to comment on")
    ),
    request_body = CommentCreate,
    responses(
        (status = OK, description = "Comment created", body = Comment),
        (status = NOT_FOUND, description = "Biosample not found"),
        (status = UNPROCESSABLE_ENTITY, description = "Empty content or author")
    ),
    tag = "comments",
    summary = "Add a comment to a biosample"
)]
pub async fn create_comment(
    State(state): State<AppState>,
    Path(biosample_id): Path<i32>,
    Json(data): Json<CommentCreate>,
) -> BusinessResult<Json<Comment>> {
    data.validate()?;

    let txn = state.db.begin().await?;
    let comment = services::add(&txn, biosample_id, data).await?;
    txn.commit().await?;

    Ok(Json(comment))
}
