use super::models::{ActiveModel, Column, Entity, Model};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

/// Operator names compare case-insensitively; the stored form is lowercase.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

pub async fn find_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<Model>, DbErr> {
    Entity::find()
        .filter(Column::Name.eq(normalize_name(name)))
        .one(db)
        .await
}

/// Returns the operator called `name` (case-insensitive), inserting it first
/// when it does not exist yet.
///
/// The insert goes through `ON CONFLICT (name) DO NOTHING` and the row is read
/// back afterwards, so two requests introducing the same new name settle on a
/// single row instead of one of them failing on the unique constraint.
pub async fn get_or_create<C: ConnectionTrait>(db: &C, name: &str) -> Result<Model, DbErr> {
    if let Some(existing) = find_by_name(db, name).await? {
        return Ok(existing);
    }

    let normalized = normalize_name(name);
    let inserted = insert_ignoring_conflict(db, &normalized).await?;
    if inserted > 0 {
        tracing::info!(operator = %normalized, "Registered new operator");
    }

    find_by_name(db, &normalized)
        .await?
        .ok_or_else(|| DbErr::Custom(format!("Operator '{normalized}' vanished after insert")))
}

pub(super) async fn insert_ignoring_conflict<C: ConnectionTrait>(
    db: &C,
    normalized_name: &str,
) -> Result<u64, DbErr> {
    let operator = ActiveModel {
        name: Set(normalized_name.to_string()),
        ..Default::default()
    };

    Entity::insert(operator)
        .on_conflict(OnConflict::column(Column::Name).do_nothing().to_owned())
        .exec_without_returning(db)
        .await
}

/// Every known operator name, in insertion order
pub async fn list_names<C: ConnectionTrait>(db: &C) -> Result<Vec<String>, DbErr> {
    Entity::find()
        .select_only()
        .column(Column::Name)
        .order_by_asc(Column::Id)
        .into_tuple::<String>()
        .all(db)
        .await
}
