/*!
 * 速率限制中间件
 *
 * 固定时间窗口计数，超过上限返回 429。计数保存在限制器自己的 Moka 缓存中，
 * 同一个限制器在各 worker 之间共享计数。
 *
 * ```rust,ignore
 * web::resource("/student/login")
 *     .wrap(RateLimit::login())  // 5次/分钟/IP
 *     .route(web::post().to(student_login))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{CONTENT_TYPE, HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode};

/// 一个窗口内的计数
#[derive(Clone, Copy)]
struct Window {
    count: u32,
    started: Instant,
}

/// 速率限制配置
#[derive(Clone)]
pub struct RateLimit {
    /// 时间窗口内允许的最大请求数
    max_requests: u32,
    /// 时间窗口（秒）
    window_secs: u64,
    /// 限制键前缀（用于区分不同端点）
    key_prefix: String,
    counters: Cache<String, Window>,
}

impl RateLimit {
    /// 创建新的速率限制器
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
            key_prefix: String::new(),
            counters: Cache::builder()
                .time_to_live(Duration::from_secs(window_secs.max(1)))
                .max_capacity(100_000)
                .build(),
        }
    }

    /// 设置限制键前缀
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// 登录端点限制：5次/分钟/IP
    pub fn login() -> Self {
        Self::new(5, 60).with_prefix("login")
    }

    /// 找回密码限制：3次/分钟/IP
    pub fn password_reset() -> Self {
        Self::new(3, 60).with_prefix("password_reset")
    }

    /// 公开表单（入学申请、联系表单）：10次/分钟/IP
    pub fn public_form() -> Self {
        Self::new(10, 60).with_prefix("public_form")
    }

    /// 记录一次请求，返回是否放行以及剩余次数
    async fn hit(&self, key: String) -> (bool, u32) {
        let now = Instant::now();
        let window = Duration::from_secs(self.window_secs);
        let current = match self.counters.get(&key).await {
            Some(w) if now.duration_since(w.started) < window => w,
            _ => Window {
                count: 0,
                started: now,
            },
        };

        if current.count >= self.max_requests {
            return (false, 0);
        }

        let next = Window {
            count: current.count + 1,
            started: current.started,
        };
        self.counters.insert(key, next).await;
        (true, self.max_requests - next.count)
    }
}

/// 从请求中提取客户端 IP
///
/// 部署在反向代理后面时需要代理正确设置 X-Forwarded-For / X-Real-IP，
/// 直接暴露在不可信网络时这些头可以被伪造。
fn extract_client_ip(req: &ServiceRequest) -> String {
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    if let Some(ref ip) = connection_ip
        && is_valid_ip(ip)
    {
        return ip.clone();
    }

    // 只取 X-Forwarded-For 中的第一个 IP
    if let Some(forwarded) = req.headers().get("X-Forwarded-For")
        && let Ok(value) = forwarded.to_str()
        && let Some(ip) = value.split(',').next()
    {
        let ip = ip.trim();
        if is_valid_ip(ip) {
            return ip.to_string();
        }
    }

    if let Some(real_ip) = req.headers().get("X-Real-IP")
        && let Ok(ip) = real_ip.to_str()
    {
        let ip = ip.trim();
        if is_valid_ip(ip) {
            return ip.to_string();
        }
    }

    connection_ip.unwrap_or_else(|| "unknown".to_string())
}

fn is_valid_ip(ip: &str) -> bool {
    use std::net::IpAddr;
    ip.parse::<IpAddr>().is_ok()
}

/// 创建速率限制错误响应
fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limiter: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limiter: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let limiter = self.limiter.clone();

        Box::pin(async move {
            let identifier = format!("ip:{}", extract_client_ip(&req));
            let cache_key = if limiter.key_prefix.is_empty() {
                identifier
            } else {
                format!("{}:{}", limiter.key_prefix, identifier)
            };

            let (allowed, remaining) = limiter.hit(cache_key.clone()).await;
            if !allowed {
                warn!(
                    "Rate limit exceeded for key: {} (limit: {}/{}s)",
                    cache_key, limiter.max_requests, limiter.window_secs
                );
                return Ok(req.into_response(
                    create_rate_limit_response(limiter.window_secs).map_into_right_body(),
                ));
            }

            let mut res = srv.call(req).await?.map_into_left_body();
            res.headers_mut().insert(
                HeaderName::from_static("x-ratelimit-remaining"),
                HeaderValue::from(remaining),
            );
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.window_secs, 60);
        assert_eq!(login.key_prefix, "login");

        let reset = RateLimit::password_reset();
        assert_eq!(reset.max_requests, 3);

        let form = RateLimit::public_form();
        assert_eq!(form.max_requests, 10);
    }

    #[tokio::test]
    async fn test_window_blocks_after_limit() {
        let limiter = RateLimit::new(2, 60);
        assert_eq!(limiter.hit("ip:1".to_string()).await, (true, 1));
        assert_eq!(limiter.hit("ip:1".to_string()).await, (true, 0));
        assert_eq!(limiter.hit("ip:1".to_string()).await, (false, 0));
        // 不同客户端互不影响
        assert_eq!(limiter.hit("ip:2".to_string()).await, (true, 1));
    }

    #[tokio::test]
    async fn test_clones_share_counters() {
        let limiter = RateLimit::new(1, 60);
        let clone = limiter.clone();
        assert!(limiter.hit("ip:1".to_string()).await.0);
        assert!(!clone.hit("ip:1".to_string()).await.0);
    }
}
