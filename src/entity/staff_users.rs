//! 后台职员实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "staff_users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_staff_user(self) -> crate::models::staff::entities::StaffUser {
        use crate::models::staff::entities::{StaffRole, StaffStatus, StaffUser};
        use crate::models::timestamp_to_datetime;

        StaffUser {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role.parse::<StaffRole>().unwrap_or(StaffRole::Staff),
            status: self
                .status
                .parse::<StaffStatus>()
                .unwrap_or(StaffStatus::Suspended),
            last_login: self.last_login.map(timestamp_to_datetime),
            created_at: timestamp_to_datetime(self.created_at),
        }
    }
}
