use super::models::{BioSample, BioSampleCreate, BioSampleUpdate};
use super::services;
use crate::common::errors::BusinessResult;
use crate::common::models::{DeleteConfirmation, Paginated, PaginationParams};
use crate::common::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    routing::get,
};
use sea_orm::TransactionTrait;
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    let mut router = OpenApiRouter::new()
        .routes(routes!(create_biosample, list_biosamples))
        // Clients also call the collection without the trailing slash
        .route("/biosamples", get(list_biosamples).post(create_biosample))
        .routes(routes!(get_biosample, update_biosample, delete_biosample));

    if state.config.enable_sample_generator {
        router = router.routes(routes!(generate_biosamples));
    } else {
        tracing::info!("Random biosample generator is disabled");
    }

    router.with_state(state.clone())
}

#[utoipa::path(
    post,
    path = "/biosamples/",
    request_body = BioSampleCreate,
    responses(
        (status = OK, description = "Biosample created", body = BioSample),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid payload")
    ),
    tag = "biosamples",
    summary = "Create a biosample",
    description = "Operator and sample type names are matched case-insensitively and created on first use."
)]
pub async fn create_biosample(
    State(state): State<AppState>,
    Json(data): Json<BioSampleCreate>,
) -> BusinessResult<Json<BioSample>> {
    data.validate()?;

    let txn = state.db.begin().await?;
    let biosample = services::create(&txn, data).await?;
    txn.commit().await?;

    Ok(Json(biosample))
}

#[utoipa::path(
    get,
    path = "/biosamples/",
    params(PaginationParams),
    responses(
        (status = OK, description = "One page of biosamples, newest first", body = Paginated<BioSample>),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid pagination parameters")
    ),
    tag = "biosamples",
    summary = "List biosamples"
)]
pub async fn list_biosamples(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> BusinessResult<Json<Paginated<BioSample>>> {
    let pagination = params.validate()?;

    let txn = state.db.begin().await?;
    let page = services::list(&txn, pagination).await?;
    txn.commit().await?;

    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/biosamples/{id}",
    params(("id" = i32, Path, description = "Biosample ID")),
    responses(
        (status = OK, description = "The biosample", body = BioSample),
        (status = NOT_FOUND, description = "Biosample not found")
    ),
    tag = "biosamples",
    summary = "Get a biosample"
)]
pub async fn get_biosample(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> BusinessResult<Json<BioSample>> {
    let txn = state.db.begin().await?;
    let biosample = services::get(&txn, id).await?;
    txn.commit().await?;

    Ok(Json(biosample))
}

#[utoipa::path(
    put,
    path = "/biosamples/{id}",
    params(("id" = i32, Path, description = "Biosample ID")),
    request_body = BioSampleUpdate,
    responses(
        (status = OK, description = "Updated biosample", body = BioSample),
        (status = NOT_FOUND, description = "Biosample not found"),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid payload")
    ),
    tag = "biosamples",
    summary = "Update a biosample",
    description = "Only the fields present in the body are changed."
)]
pub async fn update_biosample(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<BioSampleUpdate>,
) -> BusinessResult<Json<BioSample>> {
    data.validate()?;

    let txn = state.db.begin().await?;
    let biosample = services::update(&txn, id, data).await?;
    txn.commit().await?;

    Ok(Json(biosample))
}

#[utoipa::path(
    delete,
    path = "/biosamples/{id}",
    params(("id" = i32, Path, description = "Biosample ID")),
    responses(
        (status = OK, description = "Biosample and its comments deleted", body = DeleteConfirmation),
        (status = NOT_FOUND, description = "Biosample not found")
    ),
    tag = "biosamples",
    summary = "Delete a biosample"
)]
pub async fn delete_biosample(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> BusinessResult<Json<DeleteConfirmation>> {
    let txn = state.db.begin().await?;
    services::delete(&txn, id).await?;
    txn.commit().await?;

    Ok(Json(DeleteConfirmation { ok: true }))
}

#[utoipa::path(
    get,
    path = "/biosamples/generate/{n}",
    params(("n" = u32, Path, description = "Number of biosamples to generate (1-1000)")),
    responses(
        (status = OK, description = "The generated biosamples", body = Vec<BioSample>),
        (status = UNPROCESSABLE_ENTITY, description = "n out of range")
    ),
    tag = "biosamples",
    summary = "Generate random biosamples",
    description = "Development aid, only mounted when ENABLE_SAMPLE_GENERATOR is set."
)]
pub async fn generate_biosamples(
    State(state): State<AppState>,
    Path(n): Path<u32>,
) -> BusinessResult<Json<Vec<BioSample>>> {
    let txn = state.db.begin().await?;
    let biosamples = services::generate_random(&txn, n).await?;
    txn.commit().await?;

    Ok(Json(biosamples))
}
