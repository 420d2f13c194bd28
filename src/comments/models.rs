use crate::common::errors::{BusinessResult, require_non_blank};
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub biosample_id: i32,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::biosamples::models::Entity",
        from = "Column::BiosampleId",
        to = "crate::biosamples::models::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Biosamples,
}

impl Related<crate::biosamples::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Biosamples.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i32,
    pub biosample_id: i32,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl From<Model> for Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            biosample_id: model.biosample_id,
            content: model.content,
            author: model.author,
            created_at: model.created_at,
        }
    }
}

/// Comment payload; the owning biosample comes from the URL
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentCreate {
    pub content: String,
    pub author: String,
}

impl CommentCreate {
    pub fn validate(&self) -> BusinessResult<()> {
        require_non_blank("content", &self.content)?;
        require_non_blank("author", &self.author)
    }
}

/// Removes every comment of a biosample. Does not check that the biosample
/// exists; callers own that check.
pub async fn delete_all_for<C: ConnectionTrait>(db: &C, biosample_id: i32) -> Result<u64, DbErr> {
    let result = Entity::delete_many()
        .filter(Column::BiosampleId.eq(biosample_id))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
