use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ApplicationService;
use crate::errors::{PortalError, Result};
use crate::models::students::entities::RegistrationOutcome;
use crate::models::students::requests::{RegisterStudentRequest, StudentRegistration};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, error_response_as, validation_error_response};
use crate::storage::Storage;
use crate::utils::password::hash_password;

/// 使用已批准的申请创建学生账号
///
/// 申请的占用与学生的插入在同一事务内完成，重复调用只会得到 AlreadyRegistered。
pub async fn finalize_registration(
    storage: &dyn Storage,
    registration: StudentRegistration,
) -> Result<RegistrationOutcome> {
    let password_hash = hash_password(&registration.password)?;
    let outcome = storage
        .finalize_registration(registration.into_new_student(password_hash))
        .await?;
    if let RegistrationOutcome::Registered(ref student) = outcome {
        info!(
            "Student {} registered with {}",
            student.id, student.registration_number
        );
    }
    Ok(outcome)
}

pub async fn handle_finalize_registration(
    service: &ApplicationService,
    request: &HttpRequest,
    body: RegisterStudentRequest,
) -> ActixResult<HttpResponse> {
    let registration = match body.validate() {
        Ok(registration) => registration,
        Err(errors) => return Ok(validation_error_response(errors)),
    };

    let storage = service.get_storage(request);
    match finalize_registration(storage.as_ref(), registration).await {
        Ok(RegistrationOutcome::Registered(student)) => Ok(HttpResponse::Created().json(
            ApiResponse::success(student, "Registration completed successfully"),
        )),
        Ok(RegistrationOutcome::ApplicationNotFound) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(
                ErrorCode::ApplicationNotFound,
                "No application matches this registration number",
            ),
        )),
        Ok(RegistrationOutcome::NotApproved) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::ApplicationNotApproved,
                "Application has not been approved",
            ),
        )),
        Ok(RegistrationOutcome::AlreadyRegistered) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::AlreadyRegistered, "Already registered"),
        )),
        Err(PortalError::Conflict(_)) => Ok(error_response_as(
            PortalError::conflict("Email is already registered"),
            ErrorCode::EmailAlreadyRegistered,
        )),
        Err(e) => Ok(error_response(e)),
    }
}
