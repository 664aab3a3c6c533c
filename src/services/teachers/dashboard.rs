use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::errors::Result;
use crate::middlewares::RequireSession;
use crate::models::common::validation::optional_text;
use crate::models::teachers::requests::TeacherDashboardQuery;
use crate::models::teachers::responses::TeacherDashboardResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, unauthorized_response};
use crate::storage::Storage;

const STUDENT_SEARCH_LIMIT: u64 = 50;

/// 组装教师工作台；注册号完全匹配时附带该学生的全部成绩
pub async fn teacher_dashboard(
    storage: &dyn Storage,
    teacher_id: i64,
    registration_fragment: Option<String>,
) -> Result<Option<TeacherDashboardResponse>> {
    let Some(teacher) = storage.get_teacher_by_id(teacher_id).await? else {
        return Ok(None);
    };

    let subjects = storage.list_teacher_subjects(teacher.id).await?;
    let classes = storage.list_teacher_classes(teacher.id).await?;
    let terms = storage.list_terms().await?;

    let mut students = Vec::new();
    let mut selected_student = None;
    let mut marks = Vec::new();

    if let Some(fragment) = optional_text(registration_fragment) {
        let fragment = fragment.to_uppercase();
        students = storage
            .search_students_by_registration_number(&fragment, STUDENT_SEARCH_LIMIT)
            .await?;
        selected_student = storage
            .get_student_by_registration_number(&fragment)
            .await?;
        if let Some(ref student) = selected_student {
            marks = storage.list_mark_views(student.id, None).await?;
        }
    }

    Ok(Some(TeacherDashboardResponse {
        teacher,
        subjects,
        classes,
        terms,
        students,
        selected_student,
        marks,
    }))
}

pub async fn handle_dashboard(
    service: &TeacherService,
    request: &HttpRequest,
    query: TeacherDashboardQuery,
) -> ActixResult<HttpResponse> {
    let Some(principal) = RequireSession::extract_principal(request) else {
        return Ok(unauthorized_response());
    };

    let storage = service.get_storage(request);
    match teacher_dashboard(storage.as_ref(), principal.id, query.registration_number).await {
        Ok(Some(dashboard)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            dashboard,
            "Dashboard retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotFound,
            "Teacher not found",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}
