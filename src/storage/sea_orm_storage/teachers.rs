use super::{SeaOrmStorage, db_error};
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::entity::{classes, subjects, teacher_classes, teacher_subjects};
use crate::errors::{PortalError, Result};
use crate::models::academics::entities::{Class, Subject};
use crate::models::teachers::entities::{NewTeacher, Teacher};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

/// 去重并保持输入顺序
fn dedup_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = std::collections::HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

impl SeaOrmStorage {
    /// 创建教师
    pub async fn create_teacher_impl(&self, teacher: NewTeacher) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            national_id: Set(teacher.national_id),
            full_name: Set(teacher.full_name),
            email: Set(teacher.email),
            password_hash: Set(teacher.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("创建教师失败"))?;

        Ok(result.into_teacher())
    }

    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 通过身份证号获取教师
    pub async fn get_teacher_by_national_id_impl(
        &self,
        national_id: &str,
    ) -> Result<Option<Teacher>> {
        let result = Teachers::find()
            .filter(Column::NationalId.eq(national_id))
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    pub async fn update_teacher_password_impl(
        &self,
        id: i64,
        password_hash: &str,
    ) -> Result<bool> {
        let result = Teachers::update_many()
            .col_expr(Column::PasswordHash, Expr::value(password_hash))
            .col_expr(
                Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新教师密码失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_teachers_impl(&self) -> Result<u64> {
        Teachers::find()
            .count(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("统计教师数量失败: {e}")))
    }

    /// 列出教师负责的科目
    pub async fn list_teacher_subjects_impl(&self, teacher_id: i64) -> Result<Vec<Subject>> {
        let subject_ids: Vec<i64> = teacher_subjects::Entity::find()
            .filter(teacher_subjects::Column::TeacherId.eq(teacher_id))
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教师科目失败: {e}")))?
            .into_iter()
            .map(|m| m.subject_id)
            .collect();

        if subject_ids.is_empty() {
            return Ok(Vec::new());
        }

        let subjects = subjects::Entity::find()
            .filter(subjects::Column::Id.is_in(subject_ids))
            .order_by_asc(subjects::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 列出教师负责的班级
    pub async fn list_teacher_classes_impl(&self, teacher_id: i64) -> Result<Vec<Class>> {
        let class_ids: Vec<i64> = teacher_classes::Entity::find()
            .filter(teacher_classes::Column::TeacherId.eq(teacher_id))
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教师班级失败: {e}")))?
            .into_iter()
            .map(|m| m.class_id)
            .collect();

        if class_ids.is_empty() {
            return Ok(Vec::new());
        }

        let classes = classes::Entity::find()
            .filter(classes::Column::Id.is_in(class_ids))
            .order_by_asc(classes::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(classes.into_iter().map(|m| m.into_class()).collect())
    }

    /// 替换教师的科目分配
    pub async fn assign_teacher_subjects_impl(
        &self,
        teacher_id: i64,
        subject_ids: &[i64],
    ) -> Result<Option<Vec<Subject>>> {
        let ids = dedup_ids(subject_ids);
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开启事务失败: {e}")))?;

        if !ids.is_empty() {
            let found = subjects::Entity::find()
                .filter(subjects::Column::Id.is_in(ids.clone()))
                .count(&txn)
                .await
                .map_err(|e| PortalError::database_operation(format!("查询科目失败: {e}")))?;
            if found != ids.len() as u64 {
                return Ok(None);
            }
        }

        teacher_subjects::Entity::delete_many()
            .filter(teacher_subjects::Column::TeacherId.eq(teacher_id))
            .exec(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("清除教师科目失败: {e}")))?;

        if !ids.is_empty() {
            let rows = ids.iter().map(|&subject_id| teacher_subjects::ActiveModel {
                teacher_id: Set(teacher_id),
                subject_id: Set(subject_id),
                ..Default::default()
            });
            teacher_subjects::Entity::insert_many(rows)
                .exec(&txn)
                .await
                .map_err(db_error("分配教师科目失败"))?;
        }

        txn.commit()
            .await
            .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;

        self.list_teacher_subjects_impl(teacher_id).await.map(Some)
    }

    /// 替换教师的班级分配
    pub async fn assign_teacher_classes_impl(
        &self,
        teacher_id: i64,
        class_ids: &[i64],
    ) -> Result<Option<Vec<Class>>> {
        let ids = dedup_ids(class_ids);
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开启事务失败: {e}")))?;

        if !ids.is_empty() {
            let found = classes::Entity::find()
                .filter(classes::Column::Id.is_in(ids.clone()))
                .count(&txn)
                .await
                .map_err(|e| PortalError::database_operation(format!("查询班级失败: {e}")))?;
            if found != ids.len() as u64 {
                return Ok(None);
            }
        }

        teacher_classes::Entity::delete_many()
            .filter(teacher_classes::Column::TeacherId.eq(teacher_id))
            .exec(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("清除教师班级失败: {e}")))?;

        if !ids.is_empty() {
            let rows = ids.iter().map(|&class_id| teacher_classes::ActiveModel {
                teacher_id: Set(teacher_id),
                class_id: Set(class_id),
                ..Default::default()
            });
            teacher_classes::Entity::insert_many(rows)
                .exec(&txn)
                .await
                .map_err(db_error("分配教师班级失败"))?;
        }

        txn.commit()
            .await
            .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;

        self.list_teacher_classes_impl(teacher_id).await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::dedup_ids;

    #[test]
    fn test_dedup_ids_keeps_first_occurrence() {
        assert_eq!(dedup_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert!(dedup_ids(&[]).is_empty());
    }
}
