/*!
 * 会话认证中间件
 *
 * 从 Cookie（`session.cookie_name`）和 `Authorization: Bearer <token>` 中取出令牌，
 * 依次在对象缓存中查找 `session:{token}`，找到后把 `Session` 放入请求扩展。
 *
 * ```rust,ignore
 * web::scope("/api/v1/results")
 *     .wrap(RequireSession)
 *     .route("", web::get().to(get_results))
 *
 * async fn get_results(req: HttpRequest) -> Result<HttpResponse> {
 *     let session = RequireSession::extract_session(&req);
 *     // ...
 * }
 * ```
 */

use crate::cache::ObjectCache;
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::auth::entities::{Principal, Session};
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::AUTHORIZATION,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireSession;

/// 请求携带的候选会话令牌，Cookie 在前，Bearer 在后
///
/// 浏览器可能还留着过期会话的 Cookie，因此 Cookie 对应的会话找不到时仍会尝试 Bearer 令牌。
pub fn session_tokens(req: &HttpRequest) -> Vec<String> {
    let cookie_name = &AppConfig::get().session.cookie_name;
    let mut tokens = Vec::with_capacity(2);
    if let Some(cookie) = req.cookie(cookie_name)
        && !cookie.value().is_empty()
    {
        tokens.push(cookie.value().to_string());
    }

    if let Some(bearer) = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        && !tokens.iter().any(|t| t == bearer)
    {
        tokens.push(bearer.to_string());
    }
    tokens
}

async fn load_session(req: &ServiceRequest) -> Result<Session, &'static str> {
    let tokens = session_tokens(req.request());
    if tokens.is_empty() {
        return Err("Missing session token");
    }

    let cache = req
        .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
        .expect("Cache not found in app data")
        .get_ref()
        .clone();

    for token in tokens {
        if let Some(session) = cache
            .get_json::<Session>(&Session::cache_key(&token))
            .await
            .filter(|session| session.token == token)
        {
            return Ok(session);
        }
    }
    Err("Session expired or invalid")
}

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireSessionMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            match load_session(&req).await {
                Ok(session) => {
                    debug!(
                        "Session accepted for {} {}",
                        session.principal.kind, session.principal.id
                    );
                    req.extensions_mut().insert(session);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!("Session check failed for {}: {}", req.path(), err);
                    let code = if err == "Missing session token" {
                        ErrorCode::Unauthorized
                    } else {
                        ErrorCode::SessionExpired
                    };
                    Ok(req.into_response(
                        create_error_response(StatusCode::UNAUTHORIZED, code, err)
                            .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取会话信息
impl RequireSession {
    /// 只能在应用了 RequireSession 的路由中使用
    pub fn extract_session(req: &HttpRequest) -> Option<Session> {
        req.extensions().get::<Session>().cloned()
    }

    pub fn extract_principal(req: &HttpRequest) -> Option<Principal> {
        req.extensions()
            .get::<Session>()
            .map(|session| session.principal.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;

    #[test]
    fn test_token_from_bearer_header() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer abc-123"))
            .to_http_request();
        assert_eq!(session_tokens(&req), vec!["abc-123".to_string()]);
    }

    #[test]
    fn test_cookie_is_tried_before_bearer() {
        let cookie_name = AppConfig::get().session.cookie_name.clone();
        let req = TestRequest::default()
            .cookie(Cookie::new(cookie_name.clone(), "from-cookie"))
            .insert_header((AUTHORIZATION, "Bearer from-header"))
            .to_http_request();
        assert_eq!(
            session_tokens(&req),
            vec!["from-cookie".to_string(), "from-header".to_string()]
        );

        let same = TestRequest::default()
            .cookie(Cookie::new(cookie_name, "abc"))
            .insert_header((AUTHORIZATION, "Bearer abc"))
            .to_http_request();
        assert_eq!(session_tokens(&same), vec!["abc".to_string()]);
    }

    #[test]
    fn test_missing_token() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert!(session_tokens(&req).is_empty());
    }
}
