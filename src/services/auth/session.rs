use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::cache::ObjectCache;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::middlewares::RequireSession;
use crate::models::auth::entities::{Principal, Session};
use crate::models::auth::responses::SessionInfoResponse;
use crate::models::{ApiResponse, timestamp_to_datetime};

/// 为登录主体创建服务端会话，有效期取 `session.ttl`
pub async fn create_session(cache: &dyn ObjectCache, principal: Principal) -> Result<Session> {
    let session = Session {
        token: uuid::Uuid::new_v4().to_string(),
        principal,
        created_at: chrono::Utc::now().timestamp(),
    };
    cache
        .insert_json(
            Session::cache_key(&session.token),
            &session,
            AppConfig::get().session.ttl,
        )
        .await?;
    Ok(session)
}

/// 删除会话，令牌不存在时什么也不做
pub async fn destroy_session(cache: &dyn ObjectCache, token: &str) {
    cache.remove(&Session::cache_key(token)).await;
}

pub(crate) fn session_cookie(token: &str) -> Cookie<'static> {
    let config = AppConfig::get();
    Cookie::build(config.session.cookie_name.clone(), token.to_string())
        .path("/")
        .max_age(Duration::seconds(config.session.ttl as i64))
        .same_site(SameSite::Lax)
        .http_only(true)
        .secure(config.session.cookie_secure)
        .finish()
}

// max_age=0 让浏览器删除该 cookie
pub(crate) fn expired_session_cookie() -> Cookie<'static> {
    let config = AppConfig::get();
    Cookie::build(config.session.cookie_name.clone(), "")
        .path("/")
        .max_age(Duration::seconds(0))
        .same_site(SameSite::Lax)
        .http_only(true)
        .secure(config.session.cookie_secure)
        .finish()
}

pub async fn handle_me(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let Some(session) = RequireSession::extract_session(request) else {
        return Ok(crate::services::unauthorized_response());
    };

    let response = SessionInfoResponse {
        principal: session.principal,
        created_at: timestamp_to_datetime(session.created_at),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Session is active")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::models::auth::entities::PrincipalKind;

    #[tokio::test]
    async fn test_session_lifecycle_in_cache() {
        let cache = MokaCacheWrapper::with_settings(100, 60);
        let principal = Principal {
            kind: PrincipalKind::Teacher,
            id: 3,
            display_name: "Grace Wanjiku".to_string(),
        };

        let session = create_session(&cache, principal.clone()).await.unwrap();
        let cache: &dyn ObjectCache = &cache;
        let stored: Option<Session> = cache.get_json(&Session::cache_key(&session.token)).await;
        assert_eq!(stored.map(|s| s.principal), Some(principal));

        destroy_session(cache, &session.token).await;
        let gone: Option<Session> = cache.get_json(&Session::cache_key(&session.token)).await;
        assert!(gone.is_none());
    }

    #[test]
    fn test_session_cookie_flags() {
        let cookie = session_cookie("abc");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));

        let expired = expired_session_cookie();
        assert_eq!(expired.value(), "");
        assert_eq!(expired.max_age(), Some(Duration::seconds(0)));
    }
}
