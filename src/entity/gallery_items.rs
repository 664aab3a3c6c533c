//! 相册实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "gallery_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub date_added: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_gallery_item(self) -> crate::models::content::entities::GalleryItem {
        crate::models::content::entities::GalleryItem {
            id: self.id,
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            video_url: self.video_url,
            date_added: crate::models::timestamp_to_datetime(self.date_added),
        }
    }
}
