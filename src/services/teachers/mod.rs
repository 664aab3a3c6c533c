pub mod assign;
pub mod dashboard;
pub mod signup;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::teachers::requests::{
    AssignIdsRequest, TeacherDashboardQuery, TeacherSignupRequest,
};
use crate::storage::Storage;

pub use assign::AssignmentKind;

pub struct TeacherService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeacherService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn signup(
        &self,
        request: &HttpRequest,
        body: TeacherSignupRequest,
    ) -> ActixResult<HttpResponse> {
        signup::handle_signup(self, request, body).await
    }

    // 当前教师的工作台
    pub async fn dashboard(
        &self,
        request: &HttpRequest,
        query: TeacherDashboardQuery,
    ) -> ActixResult<HttpResponse> {
        dashboard::handle_dashboard(self, request, query).await
    }

    // 职员为教师分配科目或班级（整体替换）
    pub async fn assign(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
        kind: AssignmentKind,
        body: AssignIdsRequest,
    ) -> ActixResult<HttpResponse> {
        assign::handle_assign(self, request, teacher_id, kind, body).await
    }
}
