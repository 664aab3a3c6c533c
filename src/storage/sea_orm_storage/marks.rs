use std::collections::HashMap;

use super::{SeaOrmStorage, db_error};
use crate::entity::marks::{ActiveModel, Column, Entity as Marks};
use crate::entity::{students, subjects, teachers};
use crate::errors::{PortalError, Result};
use crate::models::marks::entities::{Mark, MarkEntry, MarkView};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr,
};

fn mark_key(student_id: i64, subject_id: i64, term_id: i64) -> Condition {
    Condition::all()
        .add(Column::StudentId.eq(student_id))
        .add(Column::SubjectId.eq(subject_id))
        .add(Column::TermId.eq(term_id))
}

impl SeaOrmStorage {
    /// 写入成绩：先原地更新，没有命中再插入；
    /// 插入撞上唯一索引说明有并发写入，改为更新一次
    pub async fn upsert_mark_impl(&self, entry: MarkEntry) -> Result<(Mark, bool)> {
        if let Some(mark) = self.overwrite_mark(&entry).await? {
            return Ok((mark, false));
        }

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            student_id: Set(entry.student_id),
            subject_id: Set(entry.subject_id),
            teacher_id: Set(entry.teacher_id),
            term_id: Set(Some(entry.term_id)),
            score: Set(entry.score),
            comment: Set(entry.comment.clone()),
            recorded_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(created) => Ok((created.into_mark(), true)),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                tracing::debug!(
                    "Concurrent insert for mark ({}, {}, {}), retrying as update",
                    entry.student_id,
                    entry.subject_id,
                    entry.term_id
                );
                self.overwrite_mark(&entry)
                    .await?
                    .map(|mark| (mark, false))
                    .ok_or_else(|| {
                        PortalError::database_operation("成绩写入冲突后未找到已有记录")
                    })
            }
            Err(e) => Err(db_error("创建成绩失败")(e)),
        }
    }

    /// 覆盖已有成绩，不存在时返回 None
    async fn overwrite_mark(&self, entry: &MarkEntry) -> Result<Option<Mark>> {
        let key = mark_key(entry.student_id, entry.subject_id, entry.term_id);

        let result = Marks::update_many()
            .col_expr(Column::Score, Expr::value(entry.score))
            .col_expr(Column::Comment, Expr::value(entry.comment.clone()))
            .col_expr(Column::TeacherId, Expr::value(entry.teacher_id))
            .col_expr(
                Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(key.clone())
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新成绩失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let mark = Marks::find()
            .filter(key)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(mark.map(|m| m.into_mark()))
    }

    pub async fn count_marks_impl(
        &self,
        student_id: i64,
        subject_id: i64,
        term_id: i64,
    ) -> Result<u64> {
        Marks::find()
            .filter(mark_key(student_id, subject_id, term_id))
            .count(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("统计成绩失败: {e}")))
    }

    /// 学生成绩列表（附带科目名和教师名），按科目名排序
    pub async fn list_mark_views_impl(
        &self,
        student_id: i64,
        term_id: Option<i64>,
    ) -> Result<Vec<MarkView>> {
        let mut select = Marks::find().filter(Column::StudentId.eq(student_id));
        if let Some(term_id) = term_id {
            select = select.filter(Column::TermId.eq(term_id));
        }
        let marks = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询成绩失败: {e}")))?;

        if marks.is_empty() {
            return Ok(Vec::new());
        }

        let subject_ids: Vec<i64> = marks.iter().map(|m| m.subject_id).collect();
        let subject_names: HashMap<i64, String> = subjects::Entity::find()
            .filter(subjects::Column::Id.is_in(subject_ids))
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询科目失败: {e}")))?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();

        let teacher_ids: Vec<i64> = marks.iter().filter_map(|m| m.teacher_id).collect();
        let teacher_names: HashMap<i64, String> = if teacher_ids.is_empty() {
            HashMap::new()
        } else {
            teachers::Entity::find()
                .filter(teachers::Column::Id.is_in(teacher_ids))
                .all(&self.db)
                .await
                .map_err(|e| PortalError::database_operation(format!("查询教师失败: {e}")))?
                .into_iter()
                .map(|t| (t.id, t.full_name))
                .collect()
        };

        let mut views: Vec<MarkView> = marks
            .into_iter()
            .map(|m| {
                let subject_name = subject_names.get(&m.subject_id).cloned().unwrap_or_default();
                let teacher_name = m.teacher_id.and_then(|id| teacher_names.get(&id).cloned());
                MarkView::new(m.into_mark(), subject_name, teacher_name)
            })
            .collect();
        views.sort_by(|a, b| a.subject_name.cmp(&b.subject_name).then(a.id.cmp(&b.id)));

        Ok(views)
    }

    /// 同班（未分班的学生归为一组）学生在某学期的全部分数
    pub async fn list_class_term_scores_impl(
        &self,
        class_id: Option<i64>,
        term_id: i64,
    ) -> Result<Vec<(i64, f64)>> {
        let class_filter = match class_id {
            Some(id) => students::Column::ClassId.eq(id),
            None => students::Column::ClassId.is_null(),
        };
        let student_ids: Vec<i64> = students::Entity::find()
            .select_only()
            .column(students::Column::Id)
            .filter(class_filter)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询班级学生失败: {e}")))?;

        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        Marks::find()
            .select_only()
            .column(Column::StudentId)
            .column(Column::Score)
            .filter(Column::TermId.eq(term_id))
            .filter(Column::StudentId.is_in(student_ids))
            .into_tuple::<(i64, f64)>()
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询班级成绩失败: {e}")))
    }
}
