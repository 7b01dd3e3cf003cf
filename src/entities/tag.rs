use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TagCategory {
    #[sea_orm(string_value = "Style")]
    Style,
    #[sea_orm(string_value = "Mood")]
    Mood,
    #[sea_orm(string_value = "Theme")]
    Theme,
    #[sea_orm(string_value = "Technique")]
    Technique,
    #[sea_orm(string_value = "Color")]
    Color,
    #[sea_orm(string_value = "Other")]
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(unique)]
    pub name: String,
    pub category: TagCategory,
    pub description: Option<String>,
    pub usage_count: i32,
    pub is_active: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::submission_tag::Entity")]
    SubmissionTag,
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        super::submission_tag::Relation::Submission.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::submission_tag::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
