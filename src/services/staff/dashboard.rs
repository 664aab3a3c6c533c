use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StaffService;
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::staff::responses::StaffDashboardResponse;
use crate::services::error_response;
use crate::storage::Storage;

pub async fn staff_dashboard(storage: &dyn Storage) -> Result<StaffDashboardResponse> {
    Ok(StaffDashboardResponse {
        total_students: storage.count_students().await? as i64,
        total_teachers: storage.count_teachers().await? as i64,
        total_classes: storage.count_classes().await? as i64,
        applications: storage.application_counts().await?,
    })
}

pub async fn handle_dashboard(
    service: &StaffService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match staff_dashboard(storage.as_ref()).await {
        Ok(dashboard) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            dashboard,
            "Dashboard retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}
