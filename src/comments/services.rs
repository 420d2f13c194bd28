use super::models::{ActiveModel, Column, Comment, CommentCreate, Entity};
use crate::biosamples;
use crate::common::errors::BusinessResult;
use crate::common::models::{Paginated, Pagination, now};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

/// Attaches a comment to an existing biosample
pub async fn add<C: ConnectionTrait>(
    db: &C,
    biosample_id: i32,
    data: CommentCreate,
) -> BusinessResult<Comment> {
    data.validate()?;
    biosamples::services::ensure_exists(db, biosample_id).await?;

    let model = ActiveModel {
        biosample_id: Set(biosample_id),
        content: Set(data.content),
        author: Set(data.author),
        created_at: Set(now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::debug!(comment_id = model.id, biosample_id, "Added comment");
    Ok(model.into())
}

/// Newest first; `total_count` is scoped to this biosample
pub async fn list<C: ConnectionTrait>(
    db: &C,
    biosample_id: i32,
    pagination: Pagination,
) -> BusinessResult<Paginated<Comment>> {
    biosamples::services::ensure_exists(db, biosample_id).await?;

    let owned = Entity::find().filter(Column::BiosampleId.eq(biosample_id));
    let total_count = owned.clone().count(db).await?;

    let results = owned
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .offset(pagination.offset)
        .limit(pagination.limit)
        .all(db)
        .await?
        .into_iter()
        .map(Comment::from)
        .collect();

    Ok(Paginated {
        results,
        total_count,
    })
}
