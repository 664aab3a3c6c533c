pub mod classes;
pub mod subjects;
pub mod terms;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::academics::requests::{
    CreateClassRequest, CreateSubjectRequest, CreateTermRequest, SubjectListQuery,
    UpdateTermRequest,
};
use crate::storage::Storage;

pub struct AcademicsService {
    storage: Option<Arc<dyn Storage>>,
}

impl AcademicsService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_classes(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        classes::handle_list_classes(self, request).await
    }

    pub async fn create_class(
        &self,
        request: &HttpRequest,
        body: CreateClassRequest,
    ) -> ActixResult<HttpResponse> {
        classes::handle_create_class(self, request, body).await
    }

    pub async fn list_subjects(
        &self,
        request: &HttpRequest,
        query: SubjectListQuery,
    ) -> ActixResult<HttpResponse> {
        subjects::handle_list_subjects(self, request, query).await
    }

    pub async fn create_subject(
        &self,
        request: &HttpRequest,
        body: CreateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::handle_create_subject(self, request, body).await
    }

    pub async fn list_terms(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        terms::handle_list_terms(self, request).await
    }

    pub async fn create_term(
        &self,
        request: &HttpRequest,
        body: CreateTermRequest,
    ) -> ActixResult<HttpResponse> {
        terms::handle_create_term(self, request, body).await
    }

    pub async fn update_term(
        &self,
        request: &HttpRequest,
        term_id: i64,
        body: UpdateTermRequest,
    ) -> ActixResult<HttpResponse> {
        terms::handle_update_term(self, request, term_id, body).await
    }

    // 设为当前学期
    pub async fn activate_term(
        &self,
        request: &HttpRequest,
        term_id: i64,
    ) -> ActixResult<HttpResponse> {
        terms::handle_activate_term(self, request, term_id).await
    }
}
