use super::models::{ActiveModel, Column, Entity, Model};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

pub async fn find_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<Model>, DbErr> {
    Entity::find()
        .filter(Column::Name.eq(normalize_name(name)))
        .one(db)
        .await
}

/// Case-insensitive get-or-create; see `operators::services::get_or_create`
/// for the conflict handling, which is identical.
pub async fn get_or_create<C: ConnectionTrait>(db: &C, name: &str) -> Result<Model, DbErr> {
    if let Some(existing) = find_by_name(db, name).await? {
        return Ok(existing);
    }

    let normalized = normalize_name(name);
    if insert_ignoring_conflict(db, &normalized).await? > 0 {
        tracing::info!(sample_type = %normalized, "Registered new sample type");
    }

    find_by_name(db, &normalized)
        .await?
        .ok_or_else(|| DbErr::Custom(format!("Sample type '{normalized}' vanished after insert")))
}

pub(super) async fn insert_ignoring_conflict<C: ConnectionTrait>(
    db: &C,
    normalized_name: &str,
) -> Result<u64, DbErr> {
    let sample_type = ActiveModel {
        name: Set(normalized_name.to_string()),
        ..Default::default()
    };

    Entity::insert(sample_type)
        .on_conflict(OnConflict::column(Column::Name).do_nothing().to_owned())
        .exec_without_returning(db)
        .await
}

pub async fn list_names<C: ConnectionTrait>(db: &C) -> Result<Vec<String>, DbErr> {
    Entity::find()
        .select_only()
        .column(Column::Name)
        .order_by_asc(Column::Id)
        .into_tuple::<String>()
        .all(db)
        .await
}
