pub mod contact;
pub mod manage;
pub mod public;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::content::requests::{
    ContactRequest, CreateGalleryItemRequest, CreateLeadershipProfileRequest,
    CreateSchoolUpdateRequest, CreateStudentLifeItemRequest,
};
use crate::storage::Storage;

pub use manage::ContentKind;

pub struct ContentService {
    storage: Option<Arc<dyn Storage>>,
}

impl ContentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 公开页面
    pub async fn latest_updates(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        public::handle_latest_updates(self, request).await
    }

    pub async fn gallery(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        public::handle_gallery(self, request).await
    }

    pub async fn student_life(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        public::handle_student_life(self, request).await
    }

    pub async fn leadership(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        public::handle_leadership(self, request).await
    }

    pub async fn contact(
        &self,
        request: &HttpRequest,
        body: ContactRequest,
    ) -> ActixResult<HttpResponse> {
        contact::handle_contact(request, body).await
    }

    // 职员维护
    pub async fn list_all(
        &self,
        request: &HttpRequest,
        kind: ContentKind,
    ) -> ActixResult<HttpResponse> {
        manage::handle_list_all(self, request, kind).await
    }

    pub async fn create_update(
        &self,
        request: &HttpRequest,
        body: CreateSchoolUpdateRequest,
    ) -> ActixResult<HttpResponse> {
        manage::handle_create_update(self, request, body).await
    }

    pub async fn create_gallery_item(
        &self,
        request: &HttpRequest,
        body: CreateGalleryItemRequest,
    ) -> ActixResult<HttpResponse> {
        manage::handle_create_gallery_item(self, request, body).await
    }

    pub async fn create_student_life_item(
        &self,
        request: &HttpRequest,
        body: CreateStudentLifeItemRequest,
    ) -> ActixResult<HttpResponse> {
        manage::handle_create_student_life_item(self, request, body).await
    }

    pub async fn create_leadership_profile(
        &self,
        request: &HttpRequest,
        body: CreateLeadershipProfileRequest,
    ) -> ActixResult<HttpResponse> {
        manage::handle_create_leadership_profile(self, request, body).await
    }

    pub async fn delete(
        &self,
        request: &HttpRequest,
        kind: ContentKind,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::handle_delete(self, request, kind, id).await
    }
}
