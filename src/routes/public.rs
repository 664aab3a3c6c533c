use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::RateLimits;
use crate::models::content::requests::ContactRequest;
use crate::services::{AcademicsService, ContentService};

// 职员维护接口复用同样的实例
pub(crate) static CONTENT_SERVICE: Lazy<ContentService> = Lazy::new(ContentService::new_lazy);
pub(crate) static ACADEMICS_SERVICE: Lazy<AcademicsService> =
    Lazy::new(AcademicsService::new_lazy);

pub async fn latest_updates(req: HttpRequest) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.latest_updates(&req).await
}

pub async fn gallery(req: HttpRequest) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.gallery(&req).await
}

pub async fn student_life(req: HttpRequest) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.student_life(&req).await
}

pub async fn leadership(req: HttpRequest) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.leadership(&req).await
}

// 入学申请表单使用的班级列表
pub async fn classes(req: HttpRequest) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.list_classes(&req).await
}

pub async fn terms(req: HttpRequest) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.list_terms(&req).await
}

pub async fn contact(
    req: HttpRequest,
    body: web::Json<ContactRequest>,
) -> ActixResult<HttpResponse> {
    CONTENT_SERVICE.contact(&req, body.into_inner()).await
}

// 配置路由
pub fn configure_public_routes(cfg: &mut web::ServiceConfig, limits: &RateLimits) {
    cfg.service(
        web::scope("/api/v1/public")
            .route("/updates", web::get().to(latest_updates))
            .route("/gallery", web::get().to(gallery))
            .route("/student-life", web::get().to(student_life))
            .route("/leadership", web::get().to(leadership))
            .route("/classes", web::get().to(classes))
            .route("/terms", web::get().to(terms))
            .service(
                web::resource("/contact")
                    .wrap(limits.public_form.clone())
                    .route(web::post().to(contact)),
            ),
    );
}
