//! 校园生活实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_life_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image_url: String,
    pub category: String,
    pub date_added: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student_life_item(self) -> crate::models::content::entities::StudentLifeItem {
        use crate::models::content::entities::{StudentLifeCategory, StudentLifeItem};

        StudentLifeItem {
            id: self.id,
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            category: self
                .category
                .parse::<StudentLifeCategory>()
                .unwrap_or(StudentLifeCategory::Club),
            date_added: crate::models::timestamp_to_datetime(self.date_added),
        }
    }
}
