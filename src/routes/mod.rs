pub mod applications;

pub mod auth;

pub mod marks;

pub mod public;

pub mod results;

pub mod staff;

pub mod students;

pub mod teachers;

use actix_web::web;

use crate::middlewares::RateLimit;

pub use applications::configure_applications_routes;
pub use auth::configure_auth_routes;
pub use marks::configure_marks_routes;
pub use public::configure_public_routes;
pub use results::configure_results_routes;
pub use staff::configure_staff_routes;
pub use students::configure_students_routes;
pub use teachers::configure_teachers_routes;

/// 各类限流器，在进程内创建一次后克隆到每个 worker 以共享计数
#[derive(Clone)]
pub struct RateLimits {
    pub login: RateLimit,
    pub password_reset: RateLimit,
    pub public_form: RateLimit,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            login: RateLimit::login(),
            password_reset: RateLimit::password_reset(),
            public_form: RateLimit::public_form(),
        }
    }
}

/// 注册全部 API 路由
pub fn configure_routes(cfg: &mut web::ServiceConfig, limits: &RateLimits) {
    configure_auth_routes(cfg, limits);
    configure_teachers_routes(cfg, limits);
    configure_marks_routes(cfg);
    configure_results_routes(cfg);
    configure_applications_routes(cfg, limits);
    configure_students_routes(cfg);
    configure_staff_routes(cfg);
    configure_public_routes(cfg, limits);
}
