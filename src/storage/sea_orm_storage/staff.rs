use super::{SeaOrmStorage, db_error};
use crate::entity::staff_users::{ActiveModel, Column, Entity as StaffUsers};
use crate::errors::{PortalError, Result};
use crate::models::staff::entities::{NewStaffUser, StaffStatus, StaffUser};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建职员账号
    pub async fn create_staff_user_impl(&self, staff: NewStaffUser) -> Result<StaffUser> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(staff.username),
            email: Set(staff.email),
            password_hash: Set(staff.password_hash),
            role: Set(staff.role.to_string()),
            status: Set(StaffStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("创建职员账号失败"))?;

        Ok(result.into_staff_user())
    }

    /// 通过用户名获取职员
    pub async fn get_staff_user_by_username_impl(
        &self,
        username: &str,
    ) -> Result<Option<StaffUser>> {
        let result = StaffUsers::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询职员失败: {e}")))?;

        Ok(result.map(|m| m.into_staff_user()))
    }

    pub async fn count_staff_users_impl(&self) -> Result<u64> {
        StaffUsers::find()
            .count(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("统计职员数量失败: {e}")))
    }

    /// 更新职员密码哈希
    pub async fn update_staff_password_impl(&self, id: i64, password_hash: &str) -> Result<bool> {
        let result = StaffUsers::update_many()
            .col_expr(Column::PasswordHash, Expr::value(password_hash))
            .col_expr(
                Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新职员密码失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新职员最后登录时间
    pub async fn update_staff_last_login_impl(&self, id: i64) -> Result<bool> {
        let result = StaffUsers::update_many()
            .col_expr(
                Column::LastLogin,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
