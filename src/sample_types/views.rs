use super::services;
use crate::common::errors::BusinessResult;
use crate::common::state::AppState;
use axum::{Json, extract::State, routing::get};
use sea_orm::TransactionTrait;
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_sample_types))
        .route("/sample-types", get(list_sample_types))
        .with_state(state.clone())
}

#[utoipa::path(
    get,
    path = "/sample-types/",
    responses(
        (status = OK, description = "All sample type names, lowercased", body = Vec<String>),
        (status = INTERNAL_SERVER_ERROR, description = "Internal server error")
    ),
    tag = "sample-types",
    summary = "List sample types"
)]
pub async fn list_sample_types(
    State(state): State<AppState>,
) -> BusinessResult<Json<Vec<String>>> {
    let txn = state.db.begin().await?;
    let names = services::list_names(&txn).await?;
    txn.commit().await?;

    Ok(Json(names))
}
