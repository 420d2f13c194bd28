use super::services;
use crate::common::errors::BusinessResult;
use crate::common::state::AppState;
use axum::{Json, extract::State, routing::get};
use sea_orm::TransactionTrait;
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_operators))
        .route("/operators", get(list_operators))
        .with_state(state.clone())
}

#[utoipa::path(
    get,
    path = "/operators/",
    responses(
        (status = OK, description = "All operator names, lowercased", body = Vec<String>),
        (status = INTERNAL_SERVER_ERROR, description = "Internal server error")
    ),
    tag = "operators",
    summary = "List operators"
)]
pub async fn list_operators(State(state): State<AppState>) -> BusinessResult<Json<Vec<String>>> {
    let txn = state.db.begin().await?;
    let names = services::list_names(&txn).await?;
    txn.commit().await?;

    Ok(Json(names))
}
