use sea_orm::entity::prelude::*;

/// Person or team that collected a biosample. Names are stored lowercased.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "operators")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::biosamples::models::Entity")]
    Biosamples,
}

impl Related<crate::biosamples::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Biosamples.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
