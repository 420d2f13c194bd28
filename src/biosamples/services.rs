use super::models::{ActiveModel, BioSample, BioSampleCreate, BioSampleUpdate, Column, Entity, Model};
use crate::common::errors::BusinessResult;
use crate::common::models::{Paginated, Pagination, now};
use crate::{comments, not_found, operators, sample_types, validation_error};
use chrono::{Days, Utc};
use rand::Rng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::collections::{HashMap, HashSet};

const CANDIDATE_LOCATIONS: [&str; 5] = ["Rome", "Milan", "Turin", "Naples", "Florence"];
const CANDIDATE_SAMPLE_TYPES: [&str; 3] = ["water", "chocolate", "flour"];
const CANDIDATE_OPERATORS: [&str; 5] = ["Mario", "Luigi", "Anna", "Julia", "Luke"];
const MAX_SAMPLING_AGE_DAYS: u64 = 30;
pub const MAX_GENERATED: u32 = 1000;

pub async fn create<C: ConnectionTrait>(db: &C, data: BioSampleCreate) -> BusinessResult<BioSample> {
    data.validate()?;

    let operator = operators::services::get_or_create(db, &data.operator_name).await?;
    let sample_type = sample_types::services::get_or_create(db, &data.sample_type_name).await?;

    let model = ActiveModel {
        location: Set(data.location),
        sampling_date: Set(data.sampling_date),
        created_at: Set(now()),
        operator_id: Set(operator.id),
        type_id: Set(sample_type.id),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(biosample_id = model.id, "Created biosample");

    Ok(BioSample::from_parts(model, operator.name, sample_type.name))
}

pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> BusinessResult<BioSample> {
    let model = find_model(db, id).await?;
    with_names(db, model).await
}

/// Fails with `NotFound` unless a biosample with this id exists
pub async fn ensure_exists<C: ConnectionTrait>(db: &C, id: i32) -> BusinessResult<()> {
    let found = Entity::find_by_id(id).count(db).await?;
    if found == 0 {
        return Err(not_found!("BioSample", id));
    }
    Ok(())
}

/// Newest first. `total_count` always covers the whole table.
pub async fn list<C: ConnectionTrait>(
    db: &C,
    pagination: Pagination,
) -> BusinessResult<Paginated<BioSample>> {
    let total_count = Entity::find().count(db).await?;

    let models = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .offset(pagination.offset)
        .limit(pagination.limit)
        .all(db)
        .await?;

    Ok(Paginated {
        results: attach_names(db, models).await?,
        total_count,
    })
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: i32,
    data: BioSampleUpdate,
) -> BusinessResult<BioSample> {
    data.validate()?;
    let existing = find_model(db, id).await?;

    if data.is_empty() {
        return with_names(db, existing).await;
    }

    let mut biosample: ActiveModel = existing.into();
    if let Some(location) = data.location {
        biosample.location = Set(location);
    }
    if let Some(sampling_date) = data.sampling_date {
        biosample.sampling_date = Set(sampling_date);
    }
    if let Some(operator_name) = data.operator_name {
        let operator = operators::services::get_or_create(db, &operator_name).await?;
        biosample.operator_id = Set(operator.id);
    }
    if let Some(sample_type_name) = data.sample_type_name {
        let sample_type = sample_types::services::get_or_create(db, &sample_type_name).await?;
        biosample.type_id = Set(sample_type.id);
    }

    let model = biosample.update(db).await?;
    tracing::debug!(biosample_id = id, "Updated biosample");

    with_names(db, model).await
}

/// Deletes the biosample after removing all of its comments
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> BusinessResult<()> {
    let model = find_model(db, id).await?;

    let comments_removed = comments::models::delete_all_for(db, model.id).await?;
    Entity::delete_by_id(model.id).exec(db).await?;

    tracing::info!(biosample_id = id, comments_removed, "Deleted biosample");
    Ok(())
}

/// Inserts `n` biosamples drawn from fixed candidate values. Development aid.
pub async fn generate_random<C: ConnectionTrait>(db: &C, n: u32) -> BusinessResult<Vec<BioSample>> {
    if !(1..=MAX_GENERATED).contains(&n) {
        return Err(validation_error!(
            "n",
            format!("must be between 1 and {MAX_GENERATED}")
        ));
    }

    let mut created = Vec::with_capacity(n as usize);
    for payload in random_payloads(n) {
        created.push(create(db, payload).await?);
    }

    tracing::info!(count = created.len(), "Generated random biosamples");
    Ok(created)
}

fn random_payloads(n: u32) -> Vec<BioSampleCreate> {
    let mut rng = rand::rng();
    let today = Utc::now().date_naive();

    (0..n)
        .map(|_| {
            let age = Days::new(rng.random_range(0..=MAX_SAMPLING_AGE_DAYS));
            BioSampleCreate {
                location: pick(&mut rng, &CANDIDATE_LOCATIONS),
                sampling_date: today.checked_sub_days(age).unwrap_or(today),
                operator_name: pick(&mut rng, &CANDIDATE_OPERATORS),
                sample_type_name: pick(&mut rng, &CANDIDATE_SAMPLE_TYPES),
            }
        })
        .collect()
}

fn pick(rng: &mut impl Rng, candidates: &[&str]) -> String {
    candidates[rng.random_range(0..candidates.len())].to_string()
}

async fn find_model<C: ConnectionTrait>(db: &C, id: i32) -> BusinessResult<Model> {
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found!("BioSample", id))
}

async fn with_names<C: ConnectionTrait>(db: &C, model: Model) -> BusinessResult<BioSample> {
    let id = model.id;
    attach_names(db, vec![model])
        .await?
        .pop()
        .ok_or_else(|| not_found!("BioSample", id))
}

/// Resolves operator and sample type names for a page of rows with one
/// query per vocabulary.
async fn attach_names<C: ConnectionTrait>(
    db: &C,
    models: Vec<Model>,
) -> Result<Vec<BioSample>, DbErr> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let operator_ids: HashSet<i32> = models.iter().map(|m| m.operator_id).collect();
    let type_ids: HashSet<i32> = models.iter().map(|m| m.type_id).collect();

    let operator_names: HashMap<i32, String> = operators::models::Entity::find()
        .filter(operators::models::Column::Id.is_in(operator_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|operator| (operator.id, operator.name))
        .collect();

    let type_names: HashMap<i32, String> = sample_types::models::Entity::find()
        .filter(sample_types::models::Column::Id.is_in(type_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|sample_type| (sample_type.id, sample_type.name))
        .collect();

    models
        .into_iter()
        .map(|model| {
            let operator_name = operator_names.get(&model.operator_id).cloned().ok_or_else(|| {
                DbErr::Custom(format!(
                    "BioSample {} references missing operator {}",
                    model.id, model.operator_id
                ))
            })?;
            let sample_type_name = type_names.get(&model.type_id).cloned().ok_or_else(|| {
                DbErr::Custom(format!(
                    "BioSample {} references missing sample type {}",
                    model.id, model.type_id
                ))
            })?;
            Ok(BioSample::from_parts(model, operator_name, sample_type_name))
        })
        .collect()
}
