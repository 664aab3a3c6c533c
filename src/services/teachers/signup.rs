use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::errors::{PortalError, Result};
use crate::models::teachers::entities::Teacher;
use crate::models::teachers::requests::{TeacherSignup, TeacherSignupRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, error_response_as, validation_error_response};
use crate::storage::Storage;
use crate::utils::password::hash_password;

/// 创建教师账号，身份证号或邮箱冲突由唯一索引拒绝
pub async fn signup_teacher(storage: &dyn Storage, signup: TeacherSignup) -> Result<Teacher> {
    let password_hash = hash_password(&signup.password)?;
    let teacher = storage
        .create_teacher(signup.into_new_teacher(password_hash))
        .await?;
    info!("Teacher {} signed up", teacher.id);
    Ok(teacher)
}

pub async fn handle_signup(
    service: &TeacherService,
    request: &HttpRequest,
    body: TeacherSignupRequest,
) -> ActixResult<HttpResponse> {
    let signup = match body.validate() {
        Ok(signup) => signup,
        Err(errors) => return Ok(validation_error_response(errors)),
    };

    let storage = service.get_storage(request);
    match signup_teacher(storage.as_ref(), signup).await {
        Ok(teacher) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(teacher, "Teacher account created"))),
        Err(PortalError::Conflict(_)) => Ok(error_response_as(
            PortalError::conflict("A teacher with this national ID or email already exists"),
            ErrorCode::TeacherAlreadyExists,
        )),
        Err(e) => Ok(error_response(e)),
    }
}
