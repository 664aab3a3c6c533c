use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultsService;
use super::ranking::{mean, position_of, rank_averages};
use crate::errors::Result;
use crate::middlewares::RequireSession;
use crate::models::auth::entities::PrincipalKind;
use crate::models::marks::entities::round2;
use crate::models::results::requests::ResultsQuery;
use crate::models::results::responses::{ResultsState, StudentResults};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, unauthorized_response};
use crate::storage::Storage;

/// 成绩单查询结果
#[derive(Debug, Clone)]
pub enum ResultsLookup {
    Found(Box<StudentResults>),
    StudentNotFound,
    TermNotFound,
}

/// 计算学生某学期的成绩单，每次请求重新计算
///
/// 未指定学期时使用当前学期；两者都没有时返回 NotReady 状态。
pub async fn compute_results(
    storage: &dyn Storage,
    student_id: i64,
    term_id: Option<i64>,
) -> Result<ResultsLookup> {
    let Some(student) = storage.get_student_by_id(student_id).await? else {
        return Ok(ResultsLookup::StudentNotFound);
    };
    let terms = storage.list_terms().await?;

    let term = match term_id {
        Some(id) => match storage.get_term_by_id(id).await? {
            Some(term) => Some(term),
            None => return Ok(ResultsLookup::TermNotFound),
        },
        None => storage.get_active_term().await?,
    };

    let Some(term) = term else {
        return Ok(ResultsLookup::Found(Box::new(StudentResults {
            state: ResultsState::NotReady,
            student,
            term: None,
            terms,
            marks: Vec::new(),
            average: None,
            position: None,
            ranked_students: 0,
        })));
    };

    let marks = storage.list_mark_views(student.id, Some(term.id)).await?;
    let scores: Vec<f64> = marks.iter().map(|m| m.score).collect();
    let average = mean(&scores).map(round2);

    // 没有班级的学生在同样没有班级的学生中排名
    let class_scores = storage
        .list_class_term_scores(student.class_id, term.id)
        .await?;
    let ranking = rank_averages(&class_scores);

    Ok(ResultsLookup::Found(Box::new(StudentResults {
        state: ResultsState::Ready,
        position: position_of(&ranking, student.id),
        ranked_students: ranking.len() as u32,
        student,
        term: Some(term),
        terms,
        marks,
        average,
    })))
}

pub async fn handle_get_results(
    service: &ResultsService,
    request: &HttpRequest,
    query: ResultsQuery,
) -> ActixResult<HttpResponse> {
    let Some(principal) = RequireSession::extract_principal(request) else {
        return Ok(unauthorized_response());
    };

    let student_id = match (principal.kind, query.student) {
        (PrincipalKind::Student, Some(id)) if id != principal.id => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "Students may only view their own results",
            )));
        }
        (PrincipalKind::Student, _) => principal.id,
        (_, Some(id)) => id,
        (_, None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "Query parameter 'student' is required",
            )));
        }
    };

    let storage = service.get_storage(request);
    match compute_results(storage.as_ref(), student_id, query.term).await {
        Ok(ResultsLookup::Found(results)) => {
            let message = match results.state {
                ResultsState::Ready => "Results retrieved successfully",
                ResultsState::NotReady => "Results are not ready yet",
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(*results, message)))
        }
        Ok(ResultsLookup::StudentNotFound) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::StudentNotFound, "Student not found"),
        )),
        Ok(ResultsLookup::TermNotFound) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::TermNotFound, "Term not found"),
        )),
        Err(e) => Ok(error_response(e)),
    }
}
