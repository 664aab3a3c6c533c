use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::RateLimits;
use crate::middlewares;
use crate::models::auth::entities::PrincipalKind;
use crate::models::teachers::requests::{TeacherDashboardQuery, TeacherSignupRequest};
use crate::services::TeacherService;

// 懒加载的全局 TEACHER_SERVICE 实例
pub(crate) static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);

pub async fn signup(
    req: HttpRequest,
    body: web::Json<TeacherSignupRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.signup(&req, body.into_inner()).await
}

pub async fn dashboard(
    req: HttpRequest,
    query: web::Query<TeacherDashboardQuery>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.dashboard(&req, query.into_inner()).await
}

// 配置路由
pub fn configure_teachers_routes(cfg: &mut web::ServiceConfig, limits: &RateLimits) {
    cfg.service(
        web::scope("/api/v1/teachers")
            .service(
                web::resource("/signup")
                    .wrap(limits.public_form.clone())
                    .route(web::post().to(signup)),
            )
            .service(
                web::resource("/me/dashboard")
                    .wrap(middlewares::RequirePrincipal::new(PrincipalKind::Teacher))
                    .wrap(middlewares::RequireSession)
                    .route(web::get().to(dashboard)),
            ),
    );
}
