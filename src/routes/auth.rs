use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::RateLimits;
use crate::middlewares;
use crate::models::auth::entities::PrincipalKind;
use crate::models::auth::requests::{
    ForgotPasswordRequest, ResetPasswordRequest, StaffLoginRequest, StudentLoginRequest,
    TeacherLoginRequest,
};
use crate::services::AuthService;

// 懒加载的全局 AUTH_SERVICE 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

// HTTP处理程序
pub async fn student_login(
    req: HttpRequest,
    body: web::Json<StudentLoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .login(
            &req,
            PrincipalKind::Student,
            &body.registration_number,
            &body.password,
        )
        .await
}

pub async fn teacher_login(
    req: HttpRequest,
    body: web::Json<TeacherLoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .login(&req, PrincipalKind::Teacher, &body.national_id, &body.password)
        .await
}

pub async fn staff_login(
    req: HttpRequest,
    body: web::Json<StaffLoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .login(&req, PrincipalKind::Staff, &body.username, &body.password)
        .await
}

pub async fn logout(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout(&req).await
}

pub async fn me(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.me(&req).await
}

pub async fn forgot_password(
    req: HttpRequest,
    body: web::Json<ForgotPasswordRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.forgot_password(&req, body.into_inner()).await
}

pub async fn reset_password(
    req: HttpRequest,
    body: web::Json<ResetPasswordRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.reset_password(&req, body.into_inner()).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig, limits: &RateLimits) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(
                web::resource("/student/login")
                    .wrap(limits.login.clone())
                    .route(web::post().to(student_login)),
            )
            .service(
                web::resource("/teacher/login")
                    .wrap(limits.login.clone())
                    .route(web::post().to(teacher_login)),
            )
            .service(
                web::resource("/staff/login")
                    .wrap(limits.login.clone())
                    .route(web::post().to(staff_login)),
            )
            // 没有有效会话也允许登出
            .route("/logout", web::post().to(logout))
            .service(
                web::resource("/me")
                    .wrap(middlewares::RequireSession)
                    .route(web::get().to(me)),
            )
            .service(
                web::resource("/student/forgot-password")
                    .wrap(limits.password_reset.clone())
                    .route(web::post().to(forgot_password)),
            )
            .service(
                web::resource("/student/reset-password")
                    .wrap(limits.password_reset.clone())
                    .route(web::post().to(reset_password)),
            ),
    );
}
