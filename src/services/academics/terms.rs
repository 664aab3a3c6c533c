use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AcademicsService;
use crate::models::academics::requests::{CreateTermRequest, UpdateTermRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, validation_error_response};

fn term_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::TermNotFound,
        "Term not found",
    ))
}

pub async fn handle_list_terms(
    service: &AcademicsService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_terms().await {
        Ok(terms) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            terms,
            "Terms retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn handle_create_term(
    service: &AcademicsService,
    request: &HttpRequest,
    body: CreateTermRequest,
) -> ActixResult<HttpResponse> {
    let term = match body.validate() {
        Ok(term) => term,
        Err(errors) => return Ok(validation_error_response(errors)),
    };

    let storage = service.get_storage(request);
    match storage.create_term(term).await {
        Ok(term) => {
            info!("Term {} created (active: {})", term.name, term.is_active);
            Ok(HttpResponse::Created().json(ApiResponse::success(term, "Term created successfully")))
        }
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn handle_update_term(
    service: &AcademicsService,
    request: &HttpRequest,
    term_id: i64,
    body: UpdateTermRequest,
) -> ActixResult<HttpResponse> {
    let update = match body.validate() {
        Ok(update) => update,
        Err(errors) => return Ok(validation_error_response(errors)),
    };

    let storage = service.get_storage(request);
    match storage.update_term(term_id, update).await {
        Ok(Some(term)) => {
            info!("Term {} updated", term.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(term, "Term updated successfully")))
        }
        Ok(None) => Ok(term_not_found()),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn handle_activate_term(
    service: &AcademicsService,
    request: &HttpRequest,
    term_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.activate_term(term_id).await {
        Ok(Some(term)) => {
            info!("Term {} is now the active term", term.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(term, "Term activated")))
        }
        Ok(None) => Ok(term_not_found()),
        Err(e) => Ok(error_response(e)),
    }
}
