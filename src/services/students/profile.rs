use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::errors::Result;
use crate::middlewares::RequireSession;
use crate::models::students::responses::StudentProfileResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, unauthorized_response};
use crate::storage::Storage;

/// 读取学生资料及其所在班级，学生不存在时返回 None
pub async fn student_profile(
    storage: &dyn Storage,
    student_id: i64,
) -> Result<Option<StudentProfileResponse>> {
    let Some(student) = storage.get_student_by_id(student_id).await? else {
        return Ok(None);
    };
    let class = match student.class_id {
        Some(class_id) => storage.get_class_by_id(class_id).await?,
        None => None,
    };
    Ok(Some(StudentProfileResponse { student, class }))
}

pub async fn handle_get_profile(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(principal) = RequireSession::extract_principal(request) else {
        return Ok(unauthorized_response());
    };

    let storage = service.get_storage(request);
    match student_profile(storage.as_ref(), principal.id).await {
        Ok(Some(profile)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            profile,
            "Profile retrieved successfully",
        ))),
        // 会话仍在但账号已被删除
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}
