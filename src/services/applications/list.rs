use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ApplicationService;
use crate::models::ApiResponse;
use crate::models::applications::requests::ApplicationListParams;
use crate::services::error_response;

pub async fn handle_list_applications(
    service: &ApplicationService,
    request: &HttpRequest,
    query: ApplicationListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_applications_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Applications retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}
