//! 领导团队实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "leadership_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub position: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub image_url: String,
    pub passport_photo_url: Option<String>,
    pub category: String,
    pub display_order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_leadership_profile(self) -> crate::models::content::entities::LeadershipProfile {
        use crate::models::content::entities::{LeadershipCategory, LeadershipProfile};

        LeadershipProfile {
            id: self.id,
            name: self.name,
            position: self.position,
            bio: self.bio,
            image_url: self.image_url,
            passport_photo_url: self.passport_photo_url,
            category: self
                .category
                .parse::<LeadershipCategory>()
                .unwrap_or(LeadershipCategory::Support),
            display_order: self.display_order,
        }
    }
}
