//! 学校公告实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "school_updates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub category: String,
    pub posted_on: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_school_update(self) -> crate::models::content::entities::SchoolUpdate {
        use crate::models::content::entities::{SchoolUpdate, UpdateCategory};

        SchoolUpdate {
            id: self.id,
            title: self.title,
            summary: self.summary,
            content: self.content,
            category: self
                .category
                .parse::<UpdateCategory>()
                .unwrap_or(UpdateCategory::Notices),
            posted_on: crate::models::timestamp_to_datetime(self.posted_on),
        }
    }
}
