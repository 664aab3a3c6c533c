use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ContentService;
use crate::models::content::requests::{
    CreateGalleryItemRequest, CreateLeadershipProfileRequest, CreateSchoolUpdateRequest,
    CreateStudentLifeItemRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, validation_error_response};

/// 网站内容类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Update,
    Gallery,
    StudentLife,
    Leadership,
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::Update => write!(f, "school update"),
            ContentKind::Gallery => write!(f, "gallery item"),
            ContentKind::StudentLife => write!(f, "student life item"),
            ContentKind::Leadership => write!(f, "leadership profile"),
        }
    }
}

/// 把校验和存储结果统一转成响应
macro_rules! create_content {
    ($service:expr, $request:expr, $body:expr, $create:ident, $kind:expr) => {{
        let item = match $body.validate() {
            Ok(item) => item,
            Err(errors) => return Ok(validation_error_response(errors)),
        };
        let storage = $service.get_storage($request);
        match storage.$create(item).await {
            Ok(created) => {
                info!("Created {} {}", $kind, created.id);
                Ok(HttpResponse::Created().json(ApiResponse::success(
                    created,
                    format!("Created {}", $kind),
                )))
            }
            Err(e) => Ok(error_response(e)),
        }
    }};
}

pub async fn handle_create_update(
    service: &ContentService,
    request: &HttpRequest,
    body: CreateSchoolUpdateRequest,
) -> ActixResult<HttpResponse> {
    create_content!(service, request, body, create_school_update, ContentKind::Update)
}

pub async fn handle_create_gallery_item(
    service: &ContentService,
    request: &HttpRequest,
    body: CreateGalleryItemRequest,
) -> ActixResult<HttpResponse> {
    create_content!(service, request, body, create_gallery_item, ContentKind::Gallery)
}

pub async fn handle_create_student_life_item(
    service: &ContentService,
    request: &HttpRequest,
    body: CreateStudentLifeItemRequest,
) -> ActixResult<HttpResponse> {
    create_content!(
        service,
        request,
        body,
        create_student_life_item,
        ContentKind::StudentLife
    )
}

pub async fn handle_create_leadership_profile(
    service: &ContentService,
    request: &HttpRequest,
    body: CreateLeadershipProfileRequest,
) -> ActixResult<HttpResponse> {
    create_content!(
        service,
        request,
        body,
        create_leadership_profile,
        ContentKind::Leadership
    )
}

// 职员列表不分组、不截断
pub async fn handle_list_all(
    service: &ContentService,
    request: &HttpRequest,
    kind: ContentKind,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let message = "Content retrieved successfully";

    let response = match kind {
        ContentKind::Update => storage
            .list_school_updates(None)
            .await
            .map(|items| HttpResponse::Ok().json(ApiResponse::success(items, message))),
        ContentKind::Gallery => storage
            .list_gallery_items()
            .await
            .map(|items| HttpResponse::Ok().json(ApiResponse::success(items, message))),
        ContentKind::StudentLife => storage
            .list_student_life_items()
            .await
            .map(|items| HttpResponse::Ok().json(ApiResponse::success(items, message))),
        ContentKind::Leadership => storage
            .list_leadership_profiles()
            .await
            .map(|items| HttpResponse::Ok().json(ApiResponse::success(items, message))),
    };

    Ok(response.unwrap_or_else(error_response))
}

pub async fn handle_delete(
    service: &ContentService,
    request: &HttpRequest,
    kind: ContentKind,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let deleted = match kind {
        ContentKind::Update => storage.delete_school_update(id).await,
        ContentKind::Gallery => storage.delete_gallery_item(id).await,
        ContentKind::StudentLife => storage.delete_student_life_item(id).await,
        ContentKind::Leadership => storage.delete_leadership_profile(id).await,
    };

    match deleted {
        Ok(true) => {
            info!("Deleted {} {}", kind, id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(format!("Deleted {kind}"))))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ContentNotFound,
            format!("The {kind} does not exist"),
        ))),
        Err(e) => Ok(error_response(e)),
    }
}
