use super::SeaOrmStorage;
use crate::entity::students::{Column, Entity as Students};
use crate::errors::{PortalError, Result};
use crate::models::students::entities::Student;
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

// 注册号统一以大写存储，查询前由调用方转换
impl SeaOrmStorage {
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 通过注册号获取学生
    pub async fn get_student_by_registration_number_impl(
        &self,
        registration_number: &str,
    ) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::RegistrationNumber.eq(registration_number))
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 注册号片段搜索
    pub async fn search_students_by_registration_number_impl(
        &self,
        fragment: &str,
        limit: u64,
    ) -> Result<Vec<Student>> {
        let pattern = format!("%{}%", escape_like_pattern(fragment));
        let students = Students::find()
            .filter(Column::RegistrationNumber.like(LikeExpr::new(pattern).escape('\\')))
            .order_by_asc(Column::RegistrationNumber)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("搜索学生失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    pub async fn update_student_password_impl(
        &self,
        id: i64,
        password_hash: &str,
    ) -> Result<bool> {
        let result = Students::update_many()
            .col_expr(Column::PasswordHash, Expr::value(password_hash))
            .col_expr(
                Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新学生密码失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新学生最后登录时间
    pub async fn update_student_last_login_impl(&self, id: i64) -> Result<bool> {
        let result = Students::update_many()
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

    pub async fn count_students_impl(&self) -> Result<u64> {
        Students::find()
            .count(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("统计学生数量失败: {e}")))
    }
}
