use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 职员账号
    async fn create_staff_user(&self, staff: NewStaffUser) -> Result<StaffUser>;
    async fn get_staff_user_by_username(&self, username: &str) -> Result<Option<StaffUser>>;
    async fn count_staff_users(&self) -> Result<u64>;
    async fn update_staff_password(&self, id: i64, password_hash: &str) -> Result<bool>;
    async fn update_staff_last_login(&self, id: i64) -> Result<bool>;

    /// 教师
    // 创建教师，身份证号或邮箱重复返回 Conflict
    async fn create_teacher(&self, teacher: NewTeacher) -> Result<Teacher>;
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    async fn get_teacher_by_national_id(&self, national_id: &str) -> Result<Option<Teacher>>;
    async fn update_teacher_password(&self, id: i64, password_hash: &str) -> Result<bool>;
    async fn count_teachers(&self) -> Result<u64>;
    async fn list_teacher_subjects(&self, teacher_id: i64) -> Result<Vec<Subject>>;
    async fn list_teacher_classes(&self, teacher_id: i64) -> Result<Vec<Class>>;
    // 用给定集合替换教师的科目分配，返回 None 表示有不存在的科目
    async fn assign_teacher_subjects(
        &self,
        teacher_id: i64,
        subject_ids: &[i64],
    ) -> Result<Option<Vec<Subject>>>;
    async fn assign_teacher_classes(
        &self,
        teacher_id: i64,
        class_ids: &[i64],
    ) -> Result<Option<Vec<Class>>>;

    /// 学生
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_registration_number(
        &self,
        registration_number: &str,
    ) -> Result<Option<Student>>;
    // 注册号片段模糊匹配，大小写不敏感
    async fn search_students_by_registration_number(
        &self,
        fragment: &str,
        limit: u64,
    ) -> Result<Vec<Student>>;
    async fn update_student_password(&self, id: i64, password_hash: &str) -> Result<bool>;
    async fn update_student_last_login(&self, id: i64) -> Result<bool>;
    async fn count_students(&self) -> Result<u64>;

    /// 班级、科目、学期
    async fn create_class(&self, class: NewClass) -> Result<Class>;
    async fn get_class_by_id(&self, id: i64) -> Result<Option<Class>>;
    async fn list_classes(&self) -> Result<Vec<Class>>;
    async fn count_classes(&self) -> Result<u64>;
    async fn create_subject(&self, subject: NewSubject) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects(&self, class_id: Option<i64>) -> Result<Vec<Subject>>;
    async fn create_term(&self, term: NewTerm) -> Result<Term>;
    async fn get_term_by_id(&self, id: i64) -> Result<Option<Term>>;
    // 按 start_date 倒序、id 倒序
    async fn list_terms(&self) -> Result<Vec<Term>>;
    async fn get_active_term(&self) -> Result<Option<Term>>;
    async fn update_term(&self, id: i64, update: TermUpdate) -> Result<Option<Term>>;
    // 设为当前学期，其余学期取消激活
    async fn activate_term(&self, id: i64) -> Result<Option<Term>>;

    /// 成绩
    // 按 (学生, 科目, 学期) 写入或覆盖，返回成绩和是否新建
    async fn upsert_mark(&self, entry: MarkEntry) -> Result<(Mark, bool)>;
    async fn count_marks(&self, student_id: i64, subject_id: i64, term_id: i64) -> Result<u64>;
    async fn list_mark_views(&self, student_id: i64, term_id: Option<i64>)
    -> Result<Vec<MarkView>>;
    // 同班学生在某学期的全部分数 (student_id, score)
    async fn list_class_term_scores(
        &self,
        class_id: Option<i64>,
        term_id: i64,
    ) -> Result<Vec<(i64, f64)>>;

    /// 入学申请
    // 插入申请并在同一事务内按 id 生成注册号
    async fn submit_application(
        &self,
        application: NewApplication,
        registration_prefix: &str,
    ) -> Result<StudentApplication>;
    async fn get_application_by_id(&self, id: i64) -> Result<Option<StudentApplication>>;
    async fn list_applications_with_pagination(
        &self,
        params: ApplicationListParams,
    ) -> Result<ApplicationListResponse>;
    // 仅更新尚未完成注册的申请，返回 None 表示申请不存在或已注册
    async fn update_application_status(
        &self,
        id: i64,
        status: AdmissionStatus,
    ) -> Result<Option<StudentApplication>>;
    // 原子地占用已批准的申请并创建学生
    async fn finalize_registration(&self, student: NewStudent) -> Result<RegistrationOutcome>;
    async fn application_counts(&self) -> Result<ApplicationCounts>;
    async fn admissions_by_class(&self) -> Result<Vec<AdmissionsByClass>>;

    /// 网站内容
    async fn create_school_update(&self, update: NewSchoolUpdate) -> Result<SchoolUpdate>;
    async fn list_school_updates(&self, limit: Option<u64>) -> Result<Vec<SchoolUpdate>>;
    async fn delete_school_update(&self, id: i64) -> Result<bool>;
    async fn create_gallery_item(&self, item: NewGalleryItem) -> Result<GalleryItem>;
    async fn list_gallery_items(&self) -> Result<Vec<GalleryItem>>;
    async fn delete_gallery_item(&self, id: i64) -> Result<bool>;
    async fn create_student_life_item(&self, item: NewStudentLifeItem) -> Result<StudentLifeItem>;
    async fn list_student_life_items(&self) -> Result<Vec<StudentLifeItem>>;
    async fn delete_student_life_item(&self, id: i64) -> Result<bool>;
    async fn create_leadership_profile(
        &self,
        profile: NewLeadershipProfile,
    ) -> Result<LeadershipProfile>;
    async fn list_leadership_profiles(&self) -> Result<Vec<LeadershipProfile>>;
    async fn delete_leadership_profile(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
