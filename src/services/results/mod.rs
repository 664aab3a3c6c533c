pub mod compute;
pub mod ranking;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::results::requests::ResultsQuery;
use crate::storage::Storage;

pub struct ResultsService {
    storage: Option<Arc<dyn Storage>>,
}

impl ResultsService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn get_results(
        &self,
        request: &HttpRequest,
        query: ResultsQuery,
    ) -> ActixResult<HttpResponse> {
        compute::handle_get_results(self, request, query).await
    }
}
