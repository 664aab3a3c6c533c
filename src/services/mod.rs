pub mod academics;
pub mod applications;
pub mod auth;
pub mod content;
pub mod marks;
pub mod results;
pub mod staff;
pub mod students;
pub mod teachers;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, http::StatusCode};
use tracing::error;

use crate::cache::ObjectCache;
use crate::errors::PortalError;
use crate::models::{ApiResponse, ErrorCode, FieldError};
use crate::notifier::Notifier;
use crate::storage::Storage;

pub use academics::AcademicsService;
pub use applications::ApplicationService;
pub use auth::AuthService;
pub use content::ContentService;
pub use marks::MarkService;
pub use results::ResultsService;
pub use staff::StaffService;
pub use students::StudentService;
pub use teachers::TeacherService;

pub(crate) fn storage_from_request(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}

pub(crate) fn cache_from_request(request: &HttpRequest) -> Arc<dyn ObjectCache> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
        .expect("Cache not found in app data")
        .get_ref()
        .clone()
}

pub(crate) fn notifier_from_request(request: &HttpRequest) -> Arc<dyn Notifier> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn Notifier>>>()
        .expect("Notifier not found in app data")
        .get_ref()
        .clone()
}

/// 错误到 HTTP 状态与默认错误码的映射
fn classify(err: &PortalError) -> (StatusCode, ErrorCode) {
    match err {
        PortalError::Validation(_) | PortalError::DateParse(_) => {
            (StatusCode::BAD_REQUEST, ErrorCode::ValidationFailed)
        }
        PortalError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
        PortalError::Conflict(_) | PortalError::InvalidState(_) => {
            (StatusCode::CONFLICT, ErrorCode::Conflict)
        }
        PortalError::Authentication(_) => (StatusCode::UNAUTHORIZED, ErrorCode::AuthFailed),
        PortalError::Authorization(_) => (StatusCode::FORBIDDEN, ErrorCode::Forbidden),
        PortalError::Notification(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::NotificationFailed,
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalServerError,
        ),
    }
}

/// 业务错误转换为统一响应，服务端错误只记录日志不外泄细节
pub(crate) fn error_response(err: PortalError) -> HttpResponse {
    let (_, code) = classify(&err);
    error_response_as(err, code)
}

/// 与 `error_response` 相同的状态码，但使用指定的错误码
pub(crate) fn error_response_as(err: PortalError, code: ErrorCode) -> HttpResponse {
    let (status, _) = classify(&err);
    if status.is_server_error() {
        error!("{}", err);
        return HttpResponse::build(status).json(ApiResponse::error_empty(
            code,
            "Internal server error",
        ));
    }
    HttpResponse::build(status).json(ApiResponse::error_empty(code, err.message()))
}

/// 字段级校验失败
pub(crate) fn validation_error_response(errors: Vec<FieldError>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error(
        ErrorCode::ValidationFailed,
        errors,
        "Validation failed",
    ))
}

/// 需要会话的处理函数在中间件之外被调用时的兜底响应
pub(crate) fn unauthorized_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Authentication required",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_keep_their_message() {
        let resp = error_response(PortalError::not_found("Term not found"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = error_response_as(
            PortalError::conflict("email taken"),
            ErrorCode::EmailAlreadyRegistered,
        );
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_server_errors_map_to_500() {
        let resp = error_response(PortalError::database_operation("disk I/O error"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_errors_are_400() {
        let resp = validation_error_response(vec![FieldError {
            field: "score".to_string(),
            message: "Score must be a number".to_string(),
        }]);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
