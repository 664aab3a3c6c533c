use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::session::{destroy_session, expired_session_cookie};
use crate::middlewares::require_session::session_tokens;
use crate::models::ApiResponse;
use crate::services::cache_from_request;

/// 处理登出
/// 删除请求携带的全部会话并下发过期 cookie，没有会话时同样返回成功
pub async fn handle_logout(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let tokens = session_tokens(request);
    if !tokens.is_empty() {
        let cache = cache_from_request(request);
        for token in &tokens {
            destroy_session(cache.as_ref(), token).await;
        }
        info!("Session closed");
    }

    Ok(HttpResponse::Ok()
        .cookie(expired_session_cookie())
        .json(ApiResponse::success_empty("Logged out")))
}
