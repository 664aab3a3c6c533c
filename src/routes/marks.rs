use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::entities::PrincipalKind;
use crate::models::marks::requests::RecordMarkRequest;
use crate::services::MarkService;

static MARK_SERVICE: Lazy<MarkService> = Lazy::new(MarkService::new_lazy);

pub async fn record_mark(
    req: HttpRequest,
    body: web::Json<RecordMarkRequest>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE.record_mark(&req, body.into_inner()).await
}

// 配置路由
pub fn configure_marks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/marks")
            // 仅教师可以录入成绩
            .wrap(middlewares::RequirePrincipal::new(PrincipalKind::Teacher))
            .wrap(middlewares::RequireSession)
            .route("", web::post().to(record_mark)),
    );
}
