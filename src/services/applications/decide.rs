use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::ApplicationService;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::applications::entities::StudentApplication;
use crate::models::applications::requests::{DecisionAction, DecisionRequest};
use crate::models::applications::responses::{DecisionResponse, NotificationStatus};
use crate::models::{ApiResponse, ErrorCode};
use crate::notifier::{Notifier, OutboundMessage};
use crate::services::{error_response, notifier_from_request};
use crate::storage::Storage;

/// 审核结果
#[derive(Debug, Clone)]
pub enum DecisionOutcome {
    Decided(DecisionResponse),
    NotFound,
    // 已完成注册的申请不能再改状态
    AlreadyRegistered,
}

/// 完成注册的链接
pub fn registration_link(registration_number: &str) -> String {
    format!(
        "{}/students/register?reg_no={registration_number}",
        AppConfig::get().site_url()
    )
}

fn approval_message(application: &StudentApplication) -> OutboundMessage {
    let link = registration_link(&application.registration_number);
    OutboundMessage::new(
        application.email.clone(),
        "Application approved - complete your registration",
        format!(
            "Dear {},\n\nYour application has been approved. \
             Your registration number is {}.\n\n\
             Complete your registration using this link:\n{link}\n",
            application.student_name, application.registration_number
        ),
    )
}

/// 更新申请状态；批准时通知申请人，通知失败不回滚审核
pub async fn decide_application(
    storage: &dyn Storage,
    notifier: &dyn Notifier,
    application_id: i64,
    action: DecisionAction,
) -> Result<DecisionOutcome> {
    let Some(existing) = storage.get_application_by_id(application_id).await? else {
        return Ok(DecisionOutcome::NotFound);
    };
    if existing.is_registered {
        return Ok(DecisionOutcome::AlreadyRegistered);
    }

    let Some(application) = storage
        .update_application_status(application_id, action.target_status())
        .await?
    else {
        // 读取之后被并发完成注册
        return Ok(DecisionOutcome::AlreadyRegistered);
    };
    info!("Application {} marked {}", application.id, application.status);

    let notification = match action {
        DecisionAction::Reject => NotificationStatus::NotRequired,
        DecisionAction::Approve => match notifier.send(approval_message(&application)).await {
            Ok(()) => NotificationStatus::Delivered,
            Err(e) => {
                warn!(
                    "Application {} approved but notification failed: {}",
                    application.id, e
                );
                NotificationStatus::Failed {
                    reason: e.message().to_string(),
                }
            }
        },
    };

    Ok(DecisionOutcome::Decided(DecisionResponse {
        application,
        notification,
    }))
}

pub async fn handle_decide_application(
    service: &ApplicationService,
    request: &HttpRequest,
    application_id: i64,
    body: DecisionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let notifier = notifier_from_request(request);

    match decide_application(storage.as_ref(), notifier.as_ref(), application_id, body.action)
        .await
    {
        Ok(DecisionOutcome::Decided(response)) => {
            let message = match (&body.action, response.notification.is_degraded()) {
                (DecisionAction::Approve, false) => "Application approved and applicant notified",
                (DecisionAction::Approve, true) => {
                    "Application approved but the notification could not be delivered"
                }
                (DecisionAction::Reject, _) => "Application rejected",
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, message)))
        }
        Ok(DecisionOutcome::NotFound) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::ApplicationNotFound, "Application not found"),
        )),
        Ok(DecisionOutcome::AlreadyRegistered) => {
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::AlreadyRegistered,
                "Application has already been used to register",
            )))
        }
        Err(e) => Ok(error_response(e)),
    }
}
