//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod academics;
mod applications;
mod content;
mod marks;
mod staff;
mod students;
mod teachers;

use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

/// 给数据库错误附加上下文，唯一约束冲突保持为 Conflict
pub(crate) fn db_error(context: &'static str) -> impl Fn(DbErr) -> PortalError {
    move |e| match PortalError::from(e) {
        PortalError::DatabaseOperation(msg) => {
            PortalError::database_operation(format!("{context}: {msg}"))
        }
        other => other,
    }
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect_with(&config.database.url, config).await
    }

    /// 连接指定数据库并执行迁移
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with(url, AppConfig::get()).await
    }

    async fn connect_with(url: &str, config: &AppConfig) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| PortalError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM storage ready, database: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PortalError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true)
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PortalError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite://, postgres://, mysql://, or a .db/.sqlite file path"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    academics::{
        entities::{Class, Subject, Term},
        requests::{NewClass, NewSubject, NewTerm, TermUpdate},
    },
    applications::{
        entities::{AdmissionStatus, StudentApplication},
        requests::{ApplicationListParams, NewApplication},
        responses::ApplicationListResponse,
    },
    content::{
        entities::{GalleryItem, LeadershipProfile, SchoolUpdate, StudentLifeItem},
        requests::{NewGalleryItem, NewLeadershipProfile, NewSchoolUpdate, NewStudentLifeItem},
    },
    marks::entities::{Mark, MarkEntry, MarkView},
    staff::{
        entities::{NewStaffUser, StaffUser},
        responses::{AdmissionsByClass, ApplicationCounts},
    },
    students::entities::{NewStudent, RegistrationOutcome, Student},
    teachers::entities::{NewTeacher, Teacher},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 职员模块
    async fn create_staff_user(&self, staff: NewStaffUser) -> Result<StaffUser> {
        self.create_staff_user_impl(staff).await
    }

    async fn get_staff_user_by_username(&self, username: &str) -> Result<Option<StaffUser>> {
        self.get_staff_user_by_username_impl(username).await
    }

    async fn count_staff_users(&self) -> Result<u64> {
        self.count_staff_users_impl().await
    }

    async fn update_staff_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        self.update_staff_password_impl(id, password_hash).await
    }

    async fn update_staff_last_login(&self, id: i64) -> Result<bool> {
        self.update_staff_last_login_impl(id).await
    }

    // 教师模块
    async fn create_teacher(&self, teacher: NewTeacher) -> Result<Teacher> {
        self.create_teacher_impl(teacher).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn get_teacher_by_national_id(&self, national_id: &str) -> Result<Option<Teacher>> {
        self.get_teacher_by_national_id_impl(national_id).await
    }

    async fn update_teacher_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        self.update_teacher_password_impl(id, password_hash).await
    }

    async fn count_teachers(&self) -> Result<u64> {
        self.count_teachers_impl().await
    }

    async fn list_teacher_subjects(&self, teacher_id: i64) -> Result<Vec<Subject>> {
        self.list_teacher_subjects_impl(teacher_id).await
    }

    async fn list_teacher_classes(&self, teacher_id: i64) -> Result<Vec<Class>> {
        self.list_teacher_classes_impl(teacher_id).await
    }

    async fn assign_teacher_subjects(
        &self,
        teacher_id: i64,
        subject_ids: &[i64],
    ) -> Result<Option<Vec<Subject>>> {
        self.assign_teacher_subjects_impl(teacher_id, subject_ids)
            .await
    }

    async fn assign_teacher_classes(
        &self,
        teacher_id: i64,
        class_ids: &[i64],
    ) -> Result<Option<Vec<Class>>> {
        self.assign_teacher_classes_impl(teacher_id, class_ids)
            .await
    }

    // 学生模块
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_registration_number(
        &self,
        registration_number: &str,
    ) -> Result<Option<Student>> {
        self.get_student_by_registration_number_impl(registration_number)
            .await
    }

    async fn search_students_by_registration_number(
        &self,
        fragment: &str,
        limit: u64,
    ) -> Result<Vec<Student>> {
        self.search_students_by_registration_number_impl(fragment, limit)
            .await
    }

    async fn update_student_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        self.update_student_password_impl(id, password_hash).await
    }

    async fn update_student_last_login(&self, id: i64) -> Result<bool> {
        self.update_student_last_login_impl(id).await
    }

    async fn count_students(&self) -> Result<u64> {
        self.count_students_impl().await
    }

    // 班级、科目、学期模块
    async fn create_class(&self, class: NewClass) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(id).await
    }

    async fn list_classes(&self) -> Result<Vec<Class>> {
        self.list_classes_impl().await
    }

    async fn count_classes(&self) -> Result<u64> {
        self.count_classes_impl().await
    }

    async fn create_subject(&self, subject: NewSubject) -> Result<Subject> {
        self.create_subject_impl(subject).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn list_subjects(&self, class_id: Option<i64>) -> Result<Vec<Subject>> {
        self.list_subjects_impl(class_id).await
    }

    async fn create_term(&self, term: NewTerm) -> Result<Term> {
        self.create_term_impl(term).await
    }

    async fn get_term_by_id(&self, id: i64) -> Result<Option<Term>> {
        self.get_term_by_id_impl(id).await
    }

    async fn list_terms(&self) -> Result<Vec<Term>> {
        self.list_terms_impl().await
    }

    async fn get_active_term(&self) -> Result<Option<Term>> {
        self.get_active_term_impl().await
    }

    async fn update_term(&self, id: i64, update: TermUpdate) -> Result<Option<Term>> {
        self.update_term_impl(id, update).await
    }

    async fn activate_term(&self, id: i64) -> Result<Option<Term>> {
        self.activate_term_impl(id).await
    }

    // 成绩模块
    async fn upsert_mark(&self, entry: MarkEntry) -> Result<(Mark, bool)> {
        self.upsert_mark_impl(entry).await
    }

    async fn count_marks(&self, student_id: i64, subject_id: i64, term_id: i64) -> Result<u64> {
        self.count_marks_impl(student_id, subject_id, term_id).await
    }

    async fn list_mark_views(
        &self,
        student_id: i64,
        term_id: Option<i64>,
    ) -> Result<Vec<MarkView>> {
        self.list_mark_views_impl(student_id, term_id).await
    }

    async fn list_class_term_scores(
        &self,
        class_id: Option<i64>,
        term_id: i64,
    ) -> Result<Vec<(i64, f64)>> {
        self.list_class_term_scores_impl(class_id, term_id).await
    }

    // 入学申请模块
    async fn submit_application(
        &self,
        application: NewApplication,
        registration_prefix: &str,
    ) -> Result<StudentApplication> {
        self.submit_application_impl(application, registration_prefix)
            .await
    }

    async fn get_application_by_id(&self, id: i64) -> Result<Option<StudentApplication>> {
        self.get_application_by_id_impl(id).await
    }

    async fn list_applications_with_pagination(
        &self,
        params: ApplicationListParams,
    ) -> Result<ApplicationListResponse> {
        self.list_applications_with_pagination_impl(params).await
    }

    async fn update_application_status(
        &self,
        id: i64,
        status: AdmissionStatus,
    ) -> Result<Option<StudentApplication>> {
        self.update_application_status_impl(id, status).await
    }

    async fn finalize_registration(&self, student: NewStudent) -> Result<RegistrationOutcome> {
        self.finalize_registration_impl(student).await
    }

    async fn application_counts(&self) -> Result<ApplicationCounts> {
        self.application_counts_impl().await
    }

    async fn admissions_by_class(&self) -> Result<Vec<AdmissionsByClass>> {
        self.admissions_by_class_impl().await
    }

    // 网站内容模块
    async fn create_school_update(&self, update: NewSchoolUpdate) -> Result<SchoolUpdate> {
        self.create_school_update_impl(update).await
    }

    async fn list_school_updates(&self, limit: Option<u64>) -> Result<Vec<SchoolUpdate>> {
        self.list_school_updates_impl(limit).await
    }

    async fn delete_school_update(&self, id: i64) -> Result<bool> {
        self.delete_school_update_impl(id).await
    }

    async fn create_gallery_item(&self, item: NewGalleryItem) -> Result<GalleryItem> {
        self.create_gallery_item_impl(item).await
    }

    async fn list_gallery_items(&self) -> Result<Vec<GalleryItem>> {
        self.list_gallery_items_impl().await
    }

    async fn delete_gallery_item(&self, id: i64) -> Result<bool> {
        self.delete_gallery_item_impl(id).await
    }

    async fn create_student_life_item(&self, item: NewStudentLifeItem) -> Result<StudentLifeItem> {
        self.create_student_life_item_impl(item).await
    }

    async fn list_student_life_items(&self) -> Result<Vec<StudentLifeItem>> {
        self.list_student_life_items_impl().await
    }

    async fn delete_student_life_item(&self, id: i64) -> Result<bool> {
        self.delete_student_life_item_impl(id).await
    }

    async fn create_leadership_profile(
        &self,
        profile: NewLeadershipProfile,
    ) -> Result<LeadershipProfile> {
        self.create_leadership_profile_impl(profile).await
    }

    async fn list_leadership_profiles(&self) -> Result<Vec<LeadershipProfile>> {
        self.list_leadership_profiles_impl().await
    }

    async fn delete_leadership_profile(&self, id: i64) -> Result<bool> {
        self.delete_leadership_profile_impl(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("portal.db").unwrap(),
            "sqlite://portal.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("sqlite::memory:").unwrap(),
            "sqlite::memory:"
        );
        assert!(SeaOrmStorage::build_database_url("postgres://localhost/portal").is_ok());
        assert!(SeaOrmStorage::build_database_url("redis://localhost").is_err());
    }

    #[test]
    fn test_db_error_keeps_plain_errors_as_operation_errors() {
        let err = db_error("查询失败")(DbErr::Custom("boom".to_string()));
        assert_eq!(err.code(), "E005");
        assert!(err.message().starts_with("查询失败"));
    }
}
