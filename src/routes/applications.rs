use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::RateLimits;
use crate::models::applications::requests::SubmitApplicationRequest;
use crate::models::students::requests::RegisterStudentRequest;
use crate::services::ApplicationService;

// 职员审核接口在 staff 路由中复用同一个实例
pub(crate) static APPLICATION_SERVICE: Lazy<ApplicationService> =
    Lazy::new(ApplicationService::new_lazy);

pub async fn submit_application(
    req: HttpRequest,
    body: web::Json<SubmitApplicationRequest>,
) -> ActixResult<HttpResponse> {
    APPLICATION_SERVICE
        .submit_application(&req, body.into_inner())
        .await
}

pub async fn register_student(
    req: HttpRequest,
    body: web::Json<RegisterStudentRequest>,
) -> ActixResult<HttpResponse> {
    APPLICATION_SERVICE
        .finalize_registration(&req, body.into_inner())
        .await
}

// 配置公开的入学申请与注册路由
pub fn configure_applications_routes(cfg: &mut web::ServiceConfig, limits: &RateLimits) {
    cfg.service(
        web::resource("/api/v1/applications")
            .wrap(limits.public_form.clone())
            .route(web::post().to(submit_application)),
    )
    .service(
        web::resource("/api/v1/students/register")
            .wrap(limits.public_form.clone())
            .route(web::post().to(register_student)),
    );
}
