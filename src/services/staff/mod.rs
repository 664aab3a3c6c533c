pub mod dashboard;
pub mod report;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct StaffService {
    storage: Option<Arc<dyn Storage>>,
}

impl StaffService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 后台首页统计
    pub async fn dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        dashboard::handle_dashboard(self, request).await
    }

    // 招生报表
    pub async fn admissions_report(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        report::handle_admissions_report(self, request).await
    }
}
