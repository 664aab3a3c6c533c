use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AcademicsService;
use crate::models::academics::requests::CreateClassRequest;
use crate::models::{ApiResponse, FieldError};
use crate::services::{error_response, validation_error_response};

pub async fn handle_list_classes(
    service: &AcademicsService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_classes().await {
        Ok(classes) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            classes,
            "Classes retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn handle_create_class(
    service: &AcademicsService,
    request: &HttpRequest,
    body: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let class = match body.validate() {
        Ok(class) => class,
        Err(errors) => return Ok(validation_error_response(errors)),
    };

    let storage = service.get_storage(request);

    // 班主任必须是已存在的教师
    if let Some(advisor_id) = class.advisor_id {
        match storage.get_teacher_by_id(advisor_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(validation_error_response(vec![FieldError {
                    field: "advisor_id".to_string(),
                    message: "Teacher does not exist".to_string(),
                }]));
            }
            Err(e) => return Ok(error_response(e)),
        }
    }

    match storage.create_class(class).await {
        Ok(class) => {
            info!("Class {} created", class.name);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(class, "Class created successfully")))
        }
        Err(e) => Ok(error_response(e)),
    }
}
