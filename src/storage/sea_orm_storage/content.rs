use super::{SeaOrmStorage, db_error};
use crate::entity::{gallery_items, leadership_profiles, school_updates, student_life_items};
use crate::errors::{PortalError, Result};
use crate::models::content::{
    entities::{GalleryItem, LeadershipProfile, SchoolUpdate, StudentLifeItem},
    requests::{NewGalleryItem, NewLeadershipProfile, NewSchoolUpdate, NewStudentLifeItem},
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, QuerySelect, Set};

impl SeaOrmStorage {
    /// 发布学校公告
    pub async fn create_school_update_impl(&self, update: NewSchoolUpdate) -> Result<SchoolUpdate> {
        let model = school_updates::ActiveModel {
            title: Set(update.title),
            summary: Set(update.summary),
            content: Set(update.content),
            category: Set(update.category.to_string()),
            posted_on: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("发布公告失败"))?;

        Ok(result.into_school_update())
    }

    /// 最新公告在前
    pub async fn list_school_updates_impl(&self, limit: Option<u64>) -> Result<Vec<SchoolUpdate>> {
        let mut select = school_updates::Entity::find()
            .order_by_desc(school_updates::Column::PostedOn)
            .order_by_desc(school_updates::Column::Id);
        if let Some(limit) = limit {
            select = select.limit(limit);
        }

        let result = select
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询公告失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_school_update()).collect())
    }

    pub async fn delete_school_update_impl(&self, id: i64) -> Result<bool> {
        let result = school_updates::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除公告失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 新增相册条目
    pub async fn create_gallery_item_impl(&self, item: NewGalleryItem) -> Result<GalleryItem> {
        let model = gallery_items::ActiveModel {
            title: Set(item.title),
            description: Set(item.description),
            image_url: Set(item.image_url),
            video_url: Set(item.video_url),
            date_added: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("新增相册条目失败"))?;

        Ok(result.into_gallery_item())
    }

    pub async fn list_gallery_items_impl(&self) -> Result<Vec<GalleryItem>> {
        let result = gallery_items::Entity::find()
            .order_by_desc(gallery_items::Column::DateAdded)
            .order_by_desc(gallery_items::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询相册失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_gallery_item()).collect())
    }

    pub async fn delete_gallery_item_impl(&self, id: i64) -> Result<bool> {
        let result = gallery_items::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除相册条目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 新增校园生活条目
    pub async fn create_student_life_item_impl(
        &self,
        item: NewStudentLifeItem,
    ) -> Result<StudentLifeItem> {
        let model = student_life_items::ActiveModel {
            title: Set(item.title),
            description: Set(item.description),
            image_url: Set(item.image_url),
            category: Set(item.category.to_string()),
            date_added: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("新增校园生活条目失败"))?;

        Ok(result.into_student_life_item())
    }

    pub async fn list_student_life_items_impl(&self) -> Result<Vec<StudentLifeItem>> {
        let result = student_life_items::Entity::find()
            .order_by_desc(student_life_items::Column::DateAdded)
            .order_by_desc(student_life_items::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询校园生活失败: {e}")))?;

        Ok(result
            .into_iter()
            .map(|m| m.into_student_life_item())
            .collect())
    }

    pub async fn delete_student_life_item_impl(&self, id: i64) -> Result<bool> {
        let result = student_life_items::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                PortalError::database_operation(format!("删除校园生活条目失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    /// 新增领导团队成员
    pub async fn create_leadership_profile_impl(
        &self,
        profile: NewLeadershipProfile,
    ) -> Result<LeadershipProfile> {
        let model = leadership_profiles::ActiveModel {
            name: Set(profile.name),
            position: Set(profile.position),
            bio: Set(profile.bio),
            image_url: Set(profile.image_url),
            passport_photo_url: Set(profile.passport_photo_url),
            category: Set(profile.category.to_string()),
            display_order: Set(profile.display_order),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("新增领导团队成员失败"))?;

        Ok(result.into_leadership_profile())
    }

    /// 按 display_order 升序
    pub async fn list_leadership_profiles_impl(&self) -> Result<Vec<LeadershipProfile>> {
        let result = leadership_profiles::Entity::find()
            .order_by_asc(leadership_profiles::Column::DisplayOrder)
            .order_by_asc(leadership_profiles::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询领导团队失败: {e}")))?;

        Ok(result
            .into_iter()
            .map(|m| m.into_leadership_profile())
            .collect())
    }

    pub async fn delete_leadership_profile_impl(&self, id: i64) -> Result<bool> {
        let result = leadership_profiles::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                PortalError::database_operation(format!("删除领导团队成员失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }
}
