use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::entities::PrincipalKind;
use crate::services::StudentService;

static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn get_my_profile(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_profile(&req).await
}

// 学生本人资料；/api/v1/students/register 是公开资源，这里只注册单个资源而不是整个 scope
pub fn configure_students_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/v1/students/me")
            .wrap(middlewares::RequirePrincipal::new(PrincipalKind::Student))
            .wrap(middlewares::RequireSession)
            .route(web::get().to(get_my_profile)),
    );
}
