use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde::Serialize;
use tracing::info;
use ts_rs::TS;

use super::TeacherService;
use crate::errors::Result;
use crate::models::academics::entities::{Class, Subject};
use crate::models::teachers::requests::AssignIdsRequest;
use crate::models::{ApiResponse, ErrorCode, FieldError};
use crate::services::{error_response, validation_error_response};
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentKind {
    Subjects,
    Classes,
}

/// 分配后的完整集合
#[derive(Debug, Clone, Serialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "teacher.ts")]
pub enum Assigned {
    Subjects(Vec<Subject>),
    Classes(Vec<Class>),
}

#[derive(Debug, Clone)]
pub enum AssignOutcome {
    Assigned(Assigned),
    TeacherNotFound,
    // 列表中有不存在的科目或班级
    UnknownIds,
}

/// 用给定 id 集合整体替换教师的科目或班级
pub async fn assign_to_teacher(
    storage: &dyn Storage,
    teacher_id: i64,
    kind: AssignmentKind,
    ids: &[i64],
) -> Result<AssignOutcome> {
    if storage.get_teacher_by_id(teacher_id).await?.is_none() {
        return Ok(AssignOutcome::TeacherNotFound);
    }

    let assigned = match kind {
        AssignmentKind::Subjects => storage
            .assign_teacher_subjects(teacher_id, ids)
            .await?
            .map(Assigned::Subjects),
        AssignmentKind::Classes => storage
            .assign_teacher_classes(teacher_id, ids)
            .await?
            .map(Assigned::Classes),
    };

    Ok(match assigned {
        Some(assigned) => {
            info!("Teacher {} assignments replaced ({:?})", teacher_id, kind);
            AssignOutcome::Assigned(assigned)
        }
        None => AssignOutcome::UnknownIds,
    })
}

pub async fn handle_assign(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
    kind: AssignmentKind,
    body: AssignIdsRequest,
) -> ActixResult<HttpResponse> {
    if body.ids.iter().any(|id| *id <= 0) {
        return Ok(validation_error_response(vec![FieldError {
            field: "ids".to_string(),
            message: "Every id must be a positive identifier".to_string(),
        }]));
    }

    let storage = service.get_storage(request);
    match assign_to_teacher(storage.as_ref(), teacher_id, kind, &body.ids).await {
        Ok(AssignOutcome::Assigned(assigned)) => Ok(HttpResponse::Ok().json(
            ApiResponse::success(assigned, "Assignments updated successfully"),
        )),
        Ok(AssignOutcome::TeacherNotFound) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::TeacherNotFound, "Teacher not found"),
        )),
        Ok(AssignOutcome::UnknownIds) => {
            let (code, message) = match kind {
                AssignmentKind::Subjects => (ErrorCode::SubjectNotFound, "Subject not found"),
                AssignmentKind::Classes => (ErrorCode::ClassNotFound, "Class not found"),
            };
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(code, message)))
        }
        Err(e) => Ok(error_response(e)),
    }
}
