use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ApplicationService;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::applications::requests::{NewApplication, SubmitApplicationRequest};
use crate::models::applications::responses::SubmitApplicationResponse;
use crate::models::{ApiResponse, FieldError};
use crate::services::{error_response, validation_error_response};
use crate::storage::Storage;

/// 提交结果
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    Submitted(SubmitApplicationResponse),
    ClassNotFound,
}

/// 保存申请，注册号由存储层在同一事务内按申请 id 生成
pub async fn submit_application(
    storage: &dyn Storage,
    application: NewApplication,
) -> Result<SubmitOutcome> {
    if storage
        .get_class_by_id(application.applied_class_id)
        .await?
        .is_none()
    {
        return Ok(SubmitOutcome::ClassNotFound);
    }

    let prefix = AppConfig::get()
        .admissions
        .registration_prefix
        .trim()
        .to_uppercase();
    let saved = storage.submit_application(application, &prefix).await?;
    info!(
        "Application {} submitted with registration number {}",
        saved.id, saved.registration_number
    );

    Ok(SubmitOutcome::Submitted(SubmitApplicationResponse {
        id: saved.id,
        registration_number: saved.registration_number.clone(),
        application: saved,
    }))
}

pub async fn handle_submit_application(
    service: &ApplicationService,
    request: &HttpRequest,
    body: SubmitApplicationRequest,
) -> ActixResult<HttpResponse> {
    let application = match body.validate() {
        Ok(application) => application,
        Err(errors) => return Ok(validation_error_response(errors)),
    };

    let storage = service.get_storage(request);
    match submit_application(storage.as_ref(), application).await {
        Ok(SubmitOutcome::Submitted(response)) => Ok(HttpResponse::Created().json(
            ApiResponse::success(response, "Application submitted successfully"),
        )),
        Ok(SubmitOutcome::ClassNotFound) => Ok(validation_error_response(vec![FieldError {
            field: "applied_class_id".to_string(),
            message: "Selected class does not exist".to_string(),
        }])),
        Err(e) => Ok(error_response(e)),
    }
}
