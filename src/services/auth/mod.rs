pub mod login;
pub mod logout;
pub mod password_reset;
pub mod session;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::auth::entities::PrincipalKind;
use crate::models::auth::requests::{ForgotPasswordRequest, ResetPasswordRequest};
use crate::storage::Storage;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 学生、教师、职员共用的登录流程
    pub async fn login(
        &self,
        request: &HttpRequest,
        kind: PrincipalKind,
        identifier: &str,
        password: &str,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, request, kind, identifier, password).await
    }

    pub async fn logout(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        logout::handle_logout(request).await
    }

    // 当前会话信息
    pub async fn me(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        session::handle_me(request).await
    }

    pub async fn forgot_password(
        &self,
        request: &HttpRequest,
        body: ForgotPasswordRequest,
    ) -> ActixResult<HttpResponse> {
        password_reset::handle_forgot_password(self, request, body).await
    }

    pub async fn reset_password(
        &self,
        request: &HttpRequest,
        body: ResetPasswordRequest,
    ) -> ActixResult<HttpResponse> {
        password_reset::handle_reset_password(self, request, body).await
    }
}
