use std::collections::BTreeMap;

use super::{SeaOrmStorage, db_error};
use crate::entity::student_applications::{ActiveModel, Column, Entity as Applications};
use crate::entity::{classes, students};
use crate::errors::{PortalError, Result};
use crate::models::{
    PaginationInfo,
    applications::{
        entities::{AdmissionStatus, StudentApplication, format_registration_number},
        requests::{ApplicationListParams, NewApplication},
        responses::ApplicationListResponse,
    },
    staff::responses::{AdmissionsByClass, ApplicationCounts},
    students::entities::{NewStudent, RegistrationOutcome},
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 单条申请在统计中的投影
type ApplicationTally = (Option<i64>, String, bool);

impl ApplicationCounts {
    fn record(&mut self, status: &str, is_registered: bool) {
        self.total += 1;
        match status.parse::<AdmissionStatus>() {
            Ok(AdmissionStatus::Pending) => self.pending += 1,
            Ok(AdmissionStatus::Approved) => self.approved += 1,
            Ok(AdmissionStatus::Rejected) => self.rejected += 1,
            Err(_) => {}
        }
        if is_registered {
            self.registered += 1;
        }
    }
}

fn summarize(rows: &[ApplicationTally]) -> ApplicationCounts {
    let mut counts = ApplicationCounts::default();
    for (_, status, is_registered) in rows {
        counts.record(status, *is_registered);
    }
    counts
}

/// 按申请班级汇总，未指定班级的一行排在最后
fn group_by_class(rows: &[ApplicationTally]) -> BTreeMap<Option<i64>, ApplicationCounts> {
    let mut groups: BTreeMap<Option<i64>, ApplicationCounts> = BTreeMap::new();
    for (class_id, status, is_registered) in rows {
        groups
            .entry(*class_id)
            .or_default()
            .record(status, *is_registered);
    }
    groups
}

impl SeaOrmStorage {
    /// 提交入学申请
    ///
    /// 先以占位注册号插入，再用自增 id 生成正式注册号，两步在同一事务内完成。
    pub async fn submit_application_impl(
        &self,
        application: NewApplication,
        registration_prefix: &str,
    ) -> Result<StudentApplication> {
        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            student_name: Set(application.student_name),
            email: Set(application.email),
            registration_number: Set(format!("pending-{}", uuid::Uuid::new_v4())),
            applied_class_id: Set(Some(application.applied_class_id)),
            previous_grade_level: Set(application.previous_grade_level),
            previous_grade_results: Set(application.previous_grade_results),
            status: Set(AdmissionStatus::Pending.to_string()),
            is_registered: Set(false),
            submitted_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let inserted = model
            .insert(&txn)
            .await
            .map_err(db_error("创建入学申请失败"))?;

        let registration_number = format_registration_number(registration_prefix, inserted.id);
        let mut active = inserted.into_active_model();
        active.registration_number = Set(registration_number);
        let saved = active
            .update(&txn)
            .await
            .map_err(db_error("生成注册号失败"))?;

        txn.commit()
            .await
            .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(saved.into_application())
    }

    pub async fn get_application_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<StudentApplication>> {
        let result = Applications::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询入学申请失败: {e}")))?;

        Ok(result.map(|m| m.into_application()))
    }

    /// 分页列出入学申请，最新的在前
    pub async fn list_applications_with_pagination_impl(
        &self,
        params: ApplicationListParams,
    ) -> Result<ApplicationListResponse> {
        let (page, size) = params.pagination.normalized();

        let mut select = Applications::find();
        if let Some(status) = params.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        select = select
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| PortalError::database_operation(format!("查询申请总数失败: {e}")))?;

        let applications = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询申请列表失败: {e}")))?;

        Ok(ApplicationListResponse {
            items: applications
                .into_iter()
                .map(|m| m.into_application())
                .collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 更新审核状态，已完成注册的申请不再变化
    pub async fn update_application_status_impl(
        &self,
        id: i64,
        status: AdmissionStatus,
    ) -> Result<Option<StudentApplication>> {
        let result = Applications::update_many()
            .col_expr(Column::Status, Expr::value(status.to_string()))
            .col_expr(
                Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .filter(Column::IsRegistered.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新申请状态失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.get_application_by_id_impl(id).await
    }

    /// 完成注册
    ///
    /// 在一个事务内用条件更新占用申请（`is_registered` 由 false 变为 true），
    /// 再插入学生记录。邮箱重复时插入失败，事务回滚，返回 Conflict。
    pub async fn finalize_registration_impl(
        &self,
        student: NewStudent,
    ) -> Result<RegistrationOutcome> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(application) = Applications::find()
            .filter(Column::RegistrationNumber.eq(student.registration_number.as_str()))
            .one(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询入学申请失败: {e}")))?
        else {
            return Ok(RegistrationOutcome::ApplicationNotFound);
        };

        if application.is_registered {
            return Ok(RegistrationOutcome::AlreadyRegistered);
        }
        if application.status != AdmissionStatus::APPROVED {
            return Ok(RegistrationOutcome::NotApproved);
        }

        let now = chrono::Utc::now().timestamp();
        let claimed = Applications::update_many()
            .col_expr(Column::IsRegistered, Expr::value(true))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(application.id))
            .filter(Column::Status.eq(AdmissionStatus::APPROVED))
            .filter(Column::IsRegistered.eq(false))
            .exec(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("占用入学申请失败: {e}")))?;
        if claimed.rows_affected == 0 {
            return Ok(RegistrationOutcome::AlreadyRegistered);
        }

        let model = students::ActiveModel {
            first_name: Set(student.first_name),
            last_name: Set(student.last_name),
            email: Set(student.email),
            password_hash: Set(student.password_hash),
            date_of_birth: Set(student.date_of_birth),
            phone_number: Set(student.phone_number),
            photo_url: Set(student.photo_url),
            registration_number: Set(application.registration_number),
            class_id: Set(application.applied_class_id),
            status: Set(AdmissionStatus::Approved.to_string()),
            applied_at: Set(application.submitted_at),
            updated_at: Set(now),
            ..Default::default()
        };
        let created = model
            .insert(&txn)
            .await
            .map_err(db_error("创建学生失败"))?;

        txn.commit()
            .await
            .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(RegistrationOutcome::Registered(created.into_student()))
    }

    async fn application_tallies(&self) -> Result<Vec<ApplicationTally>> {
        Applications::find()
            .select_only()
            .column(Column::AppliedClassId)
            .column(Column::Status)
            .column(Column::IsRegistered)
            .into_tuple::<ApplicationTally>()
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("统计入学申请失败: {e}")))
    }

    pub async fn application_counts_impl(&self) -> Result<ApplicationCounts> {
        Ok(summarize(&self.application_tallies().await?))
    }

    /// 按申请班级汇总
    pub async fn admissions_by_class_impl(&self) -> Result<Vec<AdmissionsByClass>> {
        let groups = group_by_class(&self.application_tallies().await?);

        let class_ids: Vec<i64> = groups.keys().filter_map(|id| *id).collect();
        let class_names: BTreeMap<i64, String> = if class_ids.is_empty() {
            BTreeMap::new()
        } else {
            classes::Entity::find()
                .filter(classes::Column::Id.is_in(class_ids))
                .all(&self.db)
                .await
                .map_err(|e| PortalError::database_operation(format!("查询班级失败: {e}")))?
                .into_iter()
                .map(|c| (c.id, c.name))
                .collect()
        };

        let (assigned, unassigned): (Vec<_>, Vec<_>) = groups
            .into_iter()
            .map(|(class_id, counts)| AdmissionsByClass {
                class_id,
                class_name: class_id.and_then(|id| class_names.get(&id).cloned()),
                counts,
            })
            .partition(|row| row.class_id.is_some());

        Ok(assigned.into_iter().chain(unassigned).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<ApplicationTally> {
        vec![
            (Some(2), "pending".to_string(), false),
            (Some(1), "approved".to_string(), true),
            (Some(1), "approved".to_string(), false),
            (None, "rejected".to_string(), false),
            (Some(2), "rejected".to_string(), false),
        ]
    }

    #[test]
    fn test_summarize_counts_statuses_and_registrations() {
        let counts = summarize(&rows());
        assert_eq!(
            counts,
            ApplicationCounts {
                total: 5,
                pending: 1,
                approved: 2,
                rejected: 2,
                registered: 1,
            }
        );
    }

    #[test]
    fn test_group_by_class() {
        let groups = group_by_class(&rows());
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[&Some(1)].approved, 2);
        assert_eq!(groups[&Some(1)].registered, 1);
        assert_eq!(groups[&Some(2)].total, 2);
        assert_eq!(groups[&None].rejected, 1);
    }
}
