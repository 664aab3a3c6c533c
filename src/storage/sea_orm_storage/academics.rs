use super::{SeaOrmStorage, db_error};
use crate::entity::{classes, subjects, terms};
use crate::errors::{PortalError, Result};
use crate::models::academics::{
    entities::{Class, Subject, Term},
    requests::{NewClass, NewSubject, NewTerm, TermUpdate},
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// 取消其他学期的激活状态
async fn deactivate_other_terms<C: ConnectionTrait>(conn: &C, keep_id: Option<i64>) -> Result<()> {
    let mut update = terms::Entity::update_many()
        .col_expr(terms::Column::IsActive, Expr::value(false))
        .filter(terms::Column::IsActive.eq(true));
    if let Some(id) = keep_id {
        update = update.filter(terms::Column::Id.ne(id));
    }
    update
        .exec(conn)
        .await
        .map_err(|e| PortalError::database_operation(format!("更新学期状态失败: {e}")))?;
    Ok(())
}

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, class: NewClass) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = classes::ActiveModel {
            name: Set(class.name),
            academic_year: Set(class.academic_year),
            section: Set(class.section),
            advisor_id: Set(class.advisor_id),
            notes: Set(class.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("创建班级失败"))?;

        Ok(result.into_class())
    }

    pub async fn get_class_by_id_impl(&self, id: i64) -> Result<Option<Class>> {
        let result = classes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    pub async fn list_classes_impl(&self) -> Result<Vec<Class>> {
        let result = classes::Entity::find()
            .order_by_asc(classes::Column::Name)
            .order_by_asc(classes::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_class()).collect())
    }

    pub async fn count_classes_impl(&self) -> Result<u64> {
        classes::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("统计班级数量失败: {e}")))
    }

    /// 创建科目
    pub async fn create_subject_impl(&self, subject: NewSubject) -> Result<Subject> {
        let model = subjects::ActiveModel {
            name: Set(subject.name),
            class_id: Set(subject.class_id),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("创建科目失败"))?;

        Ok(result.into_subject())
    }

    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = subjects::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 列出科目，可按班级筛选
    pub async fn list_subjects_impl(&self, class_id: Option<i64>) -> Result<Vec<Subject>> {
        let mut select = subjects::Entity::find();
        if let Some(class_id) = class_id {
            select = select.filter(subjects::Column::ClassId.eq(class_id));
        }

        let result = select
            .order_by_asc(subjects::Column::Name)
            .order_by_asc(subjects::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询科目列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 创建学期，新学期为当前学期时其余学期取消激活
    pub async fn create_term_impl(&self, term: NewTerm) -> Result<Term> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开启事务失败: {e}")))?;

        if term.is_active {
            deactivate_other_terms(&txn, None).await?;
        }

        let model = terms::ActiveModel {
            name: Set(term.name),
            start_date: Set(term.start_date),
            end_date: Set(term.end_date),
            is_active: Set(term.is_active),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(db_error("创建学期失败"))?;

        txn.commit()
            .await
            .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.into_term())
    }

    pub async fn get_term_by_id_impl(&self, id: i64) -> Result<Option<Term>> {
        let result = terms::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询学期失败: {e}")))?;

        Ok(result.map(|m| m.into_term()))
    }

    pub async fn list_terms_impl(&self) -> Result<Vec<Term>> {
        let result = terms::Entity::find()
            .order_by_desc(terms::Column::StartDate)
            .order_by_desc(terms::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询学期列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_term()).collect())
    }

    /// 当前学期；存在多个时取最新的一个
    pub async fn get_active_term_impl(&self) -> Result<Option<Term>> {
        let result = terms::Entity::find()
            .filter(terms::Column::IsActive.eq(true))
            .order_by_desc(terms::Column::StartDate)
            .order_by_desc(terms::Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询当前学期失败: {e}")))?;

        Ok(result.map(|m| m.into_term()))
    }

    /// 更新学期，未提供的字段保持不变
    pub async fn update_term_impl(&self, id: i64, update: TermUpdate) -> Result<Option<Term>> {
        let Some(existing) = terms::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询学期失败: {e}")))?
        else {
            return Ok(None);
        };

        let start_date = update.start_date.or_else(|| existing.start_date.clone());
        let end_date = update.end_date.or_else(|| existing.end_date.clone());
        if let (Some(start), Some(end)) = (&start_date, &end_date)
            && end < start
        {
            return Err(PortalError::validation(
                "End date must not be before start date",
            ));
        }

        let mut model = existing.into_active_model();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        model.start_date = Set(start_date);
        model.end_date = Set(end_date);

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新学期失败: {e}")))?;

        Ok(Some(result.into_term()))
    }

    /// 设为当前学期
    pub async fn activate_term_impl(&self, id: i64) -> Result<Option<Term>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开启事务失败: {e}")))?;

        let activated = terms::Entity::update_many()
            .col_expr(terms::Column::IsActive, Expr::value(true))
            .filter(terms::Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("激活学期失败: {e}")))?;
        if activated.rows_affected == 0 {
            return Ok(None);
        }

        deactivate_other_terms(&txn, Some(id)).await?;

        txn.commit()
            .await
            .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_term_by_id_impl(id).await
    }
}
