use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::AuthService;
use crate::cache::ObjectCache;
use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use crate::models::applications::responses::NotificationStatus;
use crate::models::auth::entities::PasswordResetTicket;
use crate::models::auth::requests::{
    ForgotPasswordRequest, PasswordReset, PasswordResetLookup, ResetPasswordRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::notifier::{Notifier, OutboundMessage};
use crate::services::{
    cache_from_request, error_response, notifier_from_request, validation_error_response,
};
use crate::storage::Storage;
use crate::utils::generate_random_code;
use crate::utils::password::hash_password;

const RESET_TOKEN_LENGTH: usize = 48;

/// 发起重置的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetRequestOutcome {
    Issued(NotificationStatus),
    // 注册号与邮箱没有同时匹配
    NoMatch,
}

/// 注册号和邮箱同时匹配时签发一次性令牌并发送重置链接
pub async fn request_password_reset(
    storage: &dyn Storage,
    cache: &dyn ObjectCache,
    notifier: &dyn Notifier,
    lookup: PasswordResetLookup,
) -> Result<ResetRequestOutcome> {
    let student = storage
        .get_student_by_registration_number(&lookup.registration_number.to_uppercase())
        .await?
        .filter(|student| student.email.eq_ignore_ascii_case(&lookup.email));
    let Some(student) = student else {
        return Ok(ResetRequestOutcome::NoMatch);
    };

    let config = AppConfig::get();
    let token = generate_random_code(RESET_TOKEN_LENGTH);
    let ticket = PasswordResetTicket {
        student_id: student.id,
        issued_at: chrono::Utc::now().timestamp(),
    };
    cache
        .insert_json(
            PasswordResetTicket::cache_key(&token),
            &ticket,
            config.auth.reset_token_ttl,
        )
        .await?;

    let link = format!("{}/students/reset-password?token={token}", config.site_url());
    let message = OutboundMessage::new(
        student.email.clone(),
        "Password reset request",
        format!(
            "Hello {},\n\nUse the link below to choose a new password. \
             It expires in {} minutes.\n\n{link}\n\n\
             If you did not request this, you can ignore this message.",
            student.full_name(),
            config.auth.reset_token_ttl / 60,
        ),
    );

    let status = match notifier.send(message).await {
        Ok(()) => NotificationStatus::Delivered,
        Err(e) => {
            warn!("Password reset notice for student {} failed: {}", student.id, e);
            NotificationStatus::Failed {
                reason: e.message().to_string(),
            }
        }
    };
    info!("Password reset issued for student {}", student.id);
    Ok(ResetRequestOutcome::Issued(status))
}

/// 使用令牌设置新密码，令牌无效或已使用返回 false
pub async fn reset_password(
    storage: &dyn Storage,
    cache: &dyn ObjectCache,
    reset: PasswordReset,
) -> Result<bool> {
    let key = PasswordResetTicket::cache_key(&reset.token);
    let Some(ticket) = cache.get_json::<PasswordResetTicket>(&key).await else {
        return Ok(false);
    };
    // 先作废令牌，保证只能使用一次
    cache.remove(&key).await;

    let hash = hash_password(&reset.new_password)?;
    if !storage
        .update_student_password(ticket.student_id, &hash)
        .await?
    {
        return Err(PortalError::not_found("Student not found"));
    }
    info!("Password reset completed for student {}", ticket.student_id);
    Ok(true)
}

pub async fn handle_forgot_password(
    service: &AuthService,
    request: &HttpRequest,
    body: ForgotPasswordRequest,
) -> ActixResult<HttpResponse> {
    let lookup = match body.validate() {
        Ok(lookup) => lookup,
        Err(errors) => return Ok(validation_error_response(errors)),
    };

    let storage = service.get_storage(request);
    let cache = cache_from_request(request);
    let notifier = notifier_from_request(request);

    match request_password_reset(storage.as_ref(), cache.as_ref(), notifier.as_ref(), lookup)
        .await
    {
        Ok(ResetRequestOutcome::Issued(status)) => {
            let message = if status.is_degraded() {
                "Reset token issued but the notification could not be delivered"
            } else {
                "Password reset link sent"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(status, message)))
        }
        Ok(ResetRequestOutcome::NoMatch) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::StudentNotFound, "No matching record found"),
        )),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn handle_reset_password(
    service: &AuthService,
    request: &HttpRequest,
    body: ResetPasswordRequest,
) -> ActixResult<HttpResponse> {
    let reset = match body.validate() {
        Ok(reset) => reset,
        Err(errors) => return Ok(validation_error_response(errors)),
    };

    let storage = service.get_storage(request);
    let cache = cache_from_request(request);

    match reset_password(storage.as_ref(), cache.as_ref(), reset).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Password has been reset",
        ))),
        Ok(false) => Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ResetTokenInvalid,
            "Reset token is invalid or has expired",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}
