use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::results::requests::ResultsQuery;
use crate::services::ResultsService;

static RESULTS_SERVICE: Lazy<ResultsService> = Lazy::new(ResultsService::new_lazy);

pub async fn get_results(
    req: HttpRequest,
    query: web::Query<ResultsQuery>,
) -> ActixResult<HttpResponse> {
    RESULTS_SERVICE.get_results(&req, query.into_inner()).await
}

// 配置路由，任意已登录主体可访问，学生只能查看自己
pub fn configure_results_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/results")
            .wrap(middlewares::RequireSession)
            .route("", web::get().to(get_results)),
    );
}
