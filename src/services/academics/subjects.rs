use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AcademicsService;
use crate::models::academics::requests::{CreateSubjectRequest, SubjectListQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, validation_error_response};

pub async fn handle_list_subjects(
    service: &AcademicsService,
    request: &HttpRequest,
    query: SubjectListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_subjects(query.class_id).await {
        Ok(subjects) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subjects,
            "Subjects retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn handle_create_subject(
    service: &AcademicsService,
    request: &HttpRequest,
    body: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let subject = match body.validate() {
        Ok(subject) => subject,
        Err(errors) => return Ok(validation_error_response(errors)),
    };

    let storage = service.get_storage(request);
    match storage.get_class_by_id(subject.class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found",
            )));
        }
        Err(e) => return Ok(error_response(e)),
    }

    match storage.create_subject(subject).await {
        Ok(subject) => {
            info!("Subject {} created for class {}", subject.name, subject.class_id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(subject, "Subject created successfully")))
        }
        Err(e) => Ok(error_response(e)),
    }
}
