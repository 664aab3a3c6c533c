use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::applications::APPLICATION_SERVICE;
use super::public::{ACADEMICS_SERVICE, CONTENT_SERVICE};
use super::teachers::TEACHER_SERVICE;
use crate::middlewares;
use crate::models::academics::requests::{
    CreateClassRequest, CreateSubjectRequest, CreateTermRequest, SubjectListQuery,
    UpdateTermRequest,
};
use crate::models::applications::requests::{ApplicationListParams, DecisionRequest};
use crate::models::auth::entities::PrincipalKind;
use crate::models::content::requests::{
    CreateGalleryItemRequest, CreateLeadershipProfileRequest, CreateSchoolUpdateRequest,
    CreateStudentLifeItemRequest,
};
use crate::models::teachers::requests::AssignIdsRequest;
use crate::services::content::ContentKind;
use crate::services::teachers::AssignmentKind;
use crate::services::StaffService;
use crate::utils::SafeIDI64;

static STAFF_SERVICE: Lazy<StaffService> = Lazy::new(StaffService::new_lazy);

// 统计与报表
pub async fn dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    STAFF_SERVICE.dashboard(&req).await
}

pub async fn admissions_report(req: HttpRequest) -> ActixResult<HttpResponse> {
    STAFF_SERVICE.admissions_report(&req).await
}

// 入学申请
pub async fn list_applications(
    req: HttpRequest,
    query: web::Query<ApplicationListParams>,
) -> ActixResult<HttpResponse> {
    APPLICATION_SERVICE
        .list_applications(&req, query.into_inner())
        .await
}

pub async fn decide_application(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<DecisionRequest>,
) -> ActixResult<HttpResponse> {
    APPLICATION_SERVICE
        .decide_application(&req, id.0, body.into_inner())
        .await
}

// 班级、科目、学期
pub async fn list_classes(req: HttpRequest) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.list_classes(&req).await
}

pub async fn create_class(
    req: HttpRequest,
    body: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.create_class(&req, body.into_inner()).await
}

pub async fn list_subjects(
    req: HttpRequest,
    query: web::Query<SubjectListQuery>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .list_subjects(&req, query.into_inner())
        .await
}

pub async fn create_subject(
    req: HttpRequest,
    body: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .create_subject(&req, body.into_inner())
        .await
}

pub async fn list_terms(req: HttpRequest) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.list_terms(&req).await
}

pub async fn create_term(
    req: HttpRequest,
    body: web::Json<CreateTermRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.create_term(&req, body.into_inner()).await
}

pub async fn update_term(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateTermRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .update_term(&req, id.0, body.into_inner())
        .await
}

pub async fn activate_term(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.activate_term(&req, id.0).await
}

// 教师分配
pub async fn assign_subjects(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<AssignIdsRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .assign(&req, id.0, AssignmentKind::Subjects, body.into_inner())
        .await
}

pub async fn assign_classes(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<AssignIdsRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .assign(&req, id.0, AssignmentKind::Classes, body.into_inner())
        .await
}

// 网站内容
pub async fn list_updates(req: HttpRequest) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.list_all(&req, ContentKind::Update).await
}

pub async fn create_update(
    req: HttpRequest,
    body: web::Json<CreateSchoolUpdateRequest>,
) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.create_update(&req, body.into_inner()).await
}

pub async fn delete_update(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.delete(&req, ContentKind::Update, id.0).await
}

pub async fn list_gallery(req: HttpRequest) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.list_all(&req, ContentKind::Gallery).await
}

pub async fn create_gallery_item(
    req: HttpRequest,
    body: web::Json<CreateGalleryItemRequest>,
) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE
        .create_gallery_item(&req, body.into_inner())
        .await
}

pub async fn delete_gallery_item(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.delete(&req, ContentKind::Gallery, id.0).await
}

pub async fn list_student_life(req: HttpRequest) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.list_all(&req, ContentKind::StudentLife).await
}

pub async fn create_student_life_item(
    req: HttpRequest,
    body: web::Json<CreateStudentLifeItemRequest>,
) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE
        .create_student_life_item(&req, body.into_inner())
        .await
}

pub async fn delete_student_life_item(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE
        .delete(&req, ContentKind::StudentLife, id.0)
        .await
}

pub async fn list_leadership(req: HttpRequest) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.list_all(&req, ContentKind::Leadership).await
}

pub async fn create_leadership_profile(
    req: HttpRequest,
    body: web::Json<CreateLeadershipProfileRequest>,
) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE
        .create_leadership_profile(&req, body.into_inner())
        .await
}

pub async fn delete_leadership_profile(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE
        .delete(&req, ContentKind::Leadership, id.0)
        .await
}

// 配置路由，整个作用域仅职员可用
pub fn configure_staff_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/staff")
            .wrap(middlewares::RequirePrincipal::new(PrincipalKind::Staff))
            .wrap(middlewares::RequireSession)
            .route("/dashboard", web::get().to(dashboard))
            .route("/reports/admissions", web::get().to(admissions_report))
            .route("/applications", web::get().to(list_applications))
            .route(
                "/applications/{id}/decision",
                web::post().to(decide_application),
            )
            .service(
                web::resource("/classes")
                    .route(web::get().to(list_classes))
                    .route(web::post().to(create_class)),
            )
            .service(
                web::resource("/subjects")
                    .route(web::get().to(list_subjects))
                    .route(web::post().to(create_subject)),
            )
            .service(
                web::resource("/terms")
                    .route(web::get().to(list_terms))
                    .route(web::post().to(create_term)),
            )
            .route("/terms/{id}", web::put().to(update_term))
            .route("/terms/{id}/activate", web::post().to(activate_term))
            .route("/teachers/{id}/subjects", web::put().to(assign_subjects))
            .route("/teachers/{id}/classes", web::put().to(assign_classes))
            .service(
                web::resource("/updates")
                    .route(web::get().to(list_updates))
                    .route(web::post().to(create_update)),
            )
            .route("/updates/{id}", web::delete().to(delete_update))
            .service(
                web::resource("/gallery")
                    .route(web::get().to(list_gallery))
                    .route(web::post().to(create_gallery_item)),
            )
            .route("/gallery/{id}", web::delete().to(delete_gallery_item))
            .service(
                web::resource("/student-life")
                    .route(web::get().to(list_student_life))
                    .route(web::post().to(create_student_life_item)),
            )
            .route(
                "/student-life/{id}",
                web::delete().to(delete_student_life_item),
            )
            .service(
                web::resource("/leadership")
                    .route(web::get().to(list_leadership))
                    .route(web::post().to(create_leadership_profile)),
            )
            .route(
                "/leadership/{id}",
                web::delete().to(delete_leadership_profile),
            ),
    );
}
