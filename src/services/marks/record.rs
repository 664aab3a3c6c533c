use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MarkService;
use crate::errors::Result;
use crate::middlewares::RequireSession;
use crate::models::ApiResponse;
use crate::models::FieldError;
use crate::models::auth::entities::PrincipalKind;
use crate::models::marks::entities::{MarkEntry, MarkView};
use crate::models::marks::requests::{RecordMarkRequest, StudentRef, ValidatedMark};
use crate::models::marks::responses::RecordMarkResponse;
use crate::services::{error_response, unauthorized_response, validation_error_response};
use crate::storage::Storage;

/// 录入结果
#[derive(Debug, Clone)]
pub enum MarkRecording {
    Recorded(RecordMarkResponse),
    // 学生、科目或学期不存在，按字段报告
    Rejected(Vec<FieldError>),
}

/// 成绩单地址
pub fn results_url(student_id: i64, term_id: i64) -> String {
    format!("/api/v1/results?student={student_id}&term={term_id}")
}

fn reject(field: &str, message: &str) -> MarkRecording {
    MarkRecording::Rejected(vec![FieldError {
        field: field.to_string(),
        message: message.to_string(),
    }])
}

/// 按 (学生, 科目, 学期) 写入成绩，已有记录时覆盖分数和评语
pub async fn record_mark(
    storage: &dyn Storage,
    teacher_id: Option<i64>,
    mark: ValidatedMark,
) -> Result<MarkRecording> {
    let student = match &mark.student {
        StudentRef::Id(id) => storage.get_student_by_id(*id).await?,
        StudentRef::RegistrationNumber(reg_no) => {
            storage
                .get_student_by_registration_number(&reg_no.to_uppercase())
                .await?
        }
    };
    let Some(student) = student else {
        return Ok(reject("student", "Student not found"));
    };

    let Some(subject) = storage.get_subject_by_id(mark.subject_id).await? else {
        return Ok(reject("subject_id", "Subject not found"));
    };
    if storage.get_term_by_id(mark.term_id).await?.is_none() {
        return Ok(reject("term_id", "Term not found"));
    }

    let (saved, created) = storage
        .upsert_mark(MarkEntry {
            student_id: student.id,
            subject_id: subject.id,
            term_id: mark.term_id,
            teacher_id,
            score: mark.score,
            comment: mark.comment,
        })
        .await?;

    let teacher_name = match teacher_id {
        Some(id) => storage.get_teacher_by_id(id).await?.map(|t| t.full_name),
        None => None,
    };

    info!(
        "Mark for student {} in subject {} term {} {}",
        student.id,
        subject.id,
        mark.term_id,
        if created { "created" } else { "updated" }
    );

    Ok(MarkRecording::Recorded(RecordMarkResponse {
        mark: MarkView::new(saved, subject.name, teacher_name),
        created,
        results_url: results_url(student.id, mark.term_id),
    }))
}

pub async fn handle_record_mark(
    service: &MarkService,
    request: &HttpRequest,
    body: RecordMarkRequest,
) -> ActixResult<HttpResponse> {
    let Some(principal) = RequireSession::extract_principal(request) else {
        return Ok(unauthorized_response());
    };

    let mark = match body.validate() {
        Ok(mark) => mark,
        Err(errors) => return Ok(validation_error_response(errors)),
    };

    let teacher_id = principal.is(PrincipalKind::Teacher).then_some(principal.id);
    let storage = service.get_storage(request);

    match record_mark(storage.as_ref(), teacher_id, mark).await {
        Ok(MarkRecording::Recorded(response)) => {
            let mut builder = if response.created {
                HttpResponse::Created()
            } else {
                HttpResponse::Ok()
            };
            let message = if response.created {
                "Mark recorded"
            } else {
                "Mark updated"
            };
            Ok(builder
                .insert_header((LOCATION, response.results_url.clone()))
                .json(ApiResponse::success(response, message)))
        }
        Ok(MarkRecording::Rejected(errors)) => Ok(validation_error_response(errors)),
        Err(e) => Ok(error_response(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_url() {
        assert_eq!(results_url(7, 2), "/api/v1/results?student=7&term=2");
    }
}
