pub mod record;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::marks::requests::RecordMarkRequest;
use crate::storage::Storage;

pub struct MarkService {
    storage: Option<Arc<dyn Storage>>,
}

impl MarkService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 录入或覆盖成绩
    pub async fn record_mark(
        &self,
        request: &HttpRequest,
        body: RecordMarkRequest,
    ) -> ActixResult<HttpResponse> {
        record::handle_record_mark(self, request, body).await
    }
}
