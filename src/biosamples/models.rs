use crate::common::errors::{BusinessResult, require_non_blank};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "biosamples")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub location: String,
    pub sampling_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub operator_id: i32,
    pub type_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::operators::models::Entity",
        from = "Column::OperatorId",
        to = "crate::operators::models::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Operators,
    #[sea_orm(
        belongs_to = "crate::sample_types::models::Entity",
        from = "Column::TypeId",
        to = "crate::sample_types::models::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    SampleTypes,
    #[sea_orm(has_many = "crate::comments::models::Entity")]
    Comments,
}

impl Related<crate::operators::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Operators.def()
    }
}

impl Related<crate::sample_types::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SampleTypes.def()
    }
}

impl Related<crate::comments::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A biosample as exposed over HTTP, with vocabulary ids resolved to names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BioSample {
    pub id: i32,
    pub location: String,
    pub sampling_date: NaiveDate,
    pub operator_name: String,
    pub sample_type_name: String,
    pub created_at: DateTime<Utc>,
}

impl BioSample {
    pub fn from_parts(model: Model, operator_name: String, sample_type_name: String) -> Self {
        Self {
            id: model.id,
            location: model.location,
            sampling_date: model.sampling_date,
            operator_name,
            sample_type_name,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BioSampleCreate {
    pub location: String,
    #[serde(alias = "sampling_date")]
    pub sampling_date: NaiveDate,
    #[serde(alias = "operator_name")]
    pub operator_name: String,
    #[serde(alias = "sample_type_name")]
    pub sample_type_name: String,
}

impl BioSampleCreate {
    pub fn validate(&self) -> BusinessResult<()> {
        require_non_blank("location", &self.location)?;
        require_non_blank("operatorName", &self.operator_name)?;
        require_non_blank("sampleTypeName", &self.sample_type_name)
    }
}

/// Partial update; absent (or `null`) fields are left untouched.
/// Snake_case keys are accepted alongside the camelCase ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BioSampleUpdate {
    pub location: Option<String>,
    #[serde(alias = "sampling_date")]
    pub sampling_date: Option<NaiveDate>,
    #[serde(alias = "operator_name")]
    pub operator_name: Option<String>,
    #[serde(alias = "sample_type_name")]
    pub sample_type_name: Option<String>,
}

impl BioSampleUpdate {
    pub fn validate(&self) -> BusinessResult<()> {
        if let Some(location) = &self.location {
            require_non_blank("location", location)?;
        }
        if let Some(operator_name) = &self.operator_name {
            require_non_blank("operatorName", operator_name)?;
        }
        if let Some(sample_type_name) = &self.sample_type_name {
            require_non_blank("sampleTypeName", sample_type_name)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.location.is_none()
            && self.sampling_date.is_none()
            && self.operator_name.is_none()
            && self.sample_type_name.is_none()
    }
}
