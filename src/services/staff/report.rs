use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StaffService;
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::staff::responses::AdmissionsReport;
use crate::services::error_response;
use crate::storage::Storage;

/// 招生汇总及按申请班级的分布
pub async fn admissions_report(storage: &dyn Storage) -> Result<AdmissionsReport> {
    Ok(AdmissionsReport {
        summary: storage.application_counts().await?,
        by_class: storage.admissions_by_class().await?,
    })
}

pub async fn handle_admissions_report(
    service: &StaffService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match admissions_report(storage.as_ref()).await {
        Ok(report) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            report,
            "Admissions report generated",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}
