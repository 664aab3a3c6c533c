pub mod decide;
pub mod finalize;
pub mod list;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::applications::requests::{
    ApplicationListParams, DecisionRequest, SubmitApplicationRequest,
};
use crate::models::students::requests::RegisterStudentRequest;
use crate::storage::Storage;

pub struct ApplicationService {
    storage: Option<Arc<dyn Storage>>,
}

impl ApplicationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 提交入学申请（公开）
    pub async fn submit_application(
        &self,
        request: &HttpRequest,
        body: SubmitApplicationRequest,
    ) -> ActixResult<HttpResponse> {
        submit::handle_submit_application(self, request, body).await
    }

    // 职员查看申请列表
    pub async fn list_applications(
        &self,
        request: &HttpRequest,
        query: ApplicationListParams,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_applications(self, request, query).await
    }

    // 批准或拒绝申请
    pub async fn decide_application(
        &self,
        request: &HttpRequest,
        application_id: i64,
        body: DecisionRequest,
    ) -> ActixResult<HttpResponse> {
        decide::handle_decide_application(self, request, application_id, body).await
    }

    // 使用已批准申请完成学生注册
    pub async fn finalize_registration(
        &self,
        request: &HttpRequest,
        body: RegisterStudentRequest,
    ) -> ActixResult<HttpResponse> {
        finalize::handle_finalize_registration(self, request, body).await
    }
}
