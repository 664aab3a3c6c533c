use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::AuthService;
use super::session::{create_session, session_cookie};
use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use crate::models::auth::entities::{Principal, PrincipalKind};
use crate::models::auth::responses::LoginResponse;
use crate::models::staff::entities::StaffStatus;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{cache_from_request, error_response};
use crate::storage::Storage;
use crate::utils::password::{CredentialCheck, hash_password, verify_credential};

/// 登录时读取的账号快照
struct Account {
    principal: Principal,
    password_hash: String,
    active: bool,
}

async fn find_account(
    storage: &dyn Storage,
    kind: PrincipalKind,
    identifier: &str,
) -> Result<Option<Account>> {
    let account = match kind {
        PrincipalKind::Student => storage
            .get_student_by_registration_number(&identifier.to_uppercase())
            .await?
            .map(|student| Account {
                principal: Principal {
                    kind,
                    id: student.id,
                    display_name: student.full_name(),
                },
                password_hash: student.password_hash,
                active: true,
            }),
        PrincipalKind::Teacher => storage
            .get_teacher_by_national_id(identifier)
            .await?
            .map(|teacher| Account {
                principal: Principal {
                    kind,
                    id: teacher.id,
                    display_name: teacher.full_name,
                },
                password_hash: teacher.password_hash,
                active: true,
            }),
        PrincipalKind::Staff => storage
            .get_staff_user_by_username(identifier)
            .await?
            .map(|staff| Account {
                principal: Principal {
                    kind,
                    id: staff.id,
                    display_name: staff.username,
                },
                password_hash: staff.password_hash,
                active: staff.status == StaffStatus::Active,
            }),
    };
    Ok(account)
}

async fn store_password_hash(
    storage: &dyn Storage,
    kind: PrincipalKind,
    id: i64,
    password_hash: &str,
) -> Result<bool> {
    match kind {
        PrincipalKind::Student => storage.update_student_password(id, password_hash).await,
        PrincipalKind::Teacher => storage.update_teacher_password(id, password_hash).await,
        PrincipalKind::Staff => storage.update_staff_password(id, password_hash).await,
    }
}

/// 校验凭据，成功返回登录主体；账号或密码不匹配返回 None
///
/// 历史明文密码匹配时立即改写为 Argon2 哈希。
pub async fn authenticate(
    storage: &dyn Storage,
    kind: PrincipalKind,
    identifier: &str,
    password: &str,
) -> Result<Option<Principal>> {
    let identifier = identifier.trim();
    if identifier.is_empty() || password.is_empty() {
        return Ok(None);
    }

    let Some(account) = find_account(storage, kind, identifier).await? else {
        return Ok(None);
    };

    let allow_plaintext = AppConfig::get().auth.legacy_plaintext_upgrade;
    match verify_credential(password, &account.password_hash, allow_plaintext) {
        CredentialCheck::Valid => {}
        CredentialCheck::ValidLegacy => {
            warn!(
                "Upgrading legacy plaintext password for {} {}",
                kind, account.principal.id
            );
            let hash = hash_password(password)?;
            store_password_hash(storage, kind, account.principal.id, &hash).await?;
        }
        CredentialCheck::Invalid => return Ok(None),
    }

    if !account.active {
        return Err(PortalError::authorization("Account is suspended"));
    }

    let touched = match kind {
        PrincipalKind::Student => storage.update_student_last_login(account.principal.id).await,
        PrincipalKind::Staff => storage.update_staff_last_login(account.principal.id).await,
        PrincipalKind::Teacher => Ok(true),
    };
    if let Err(e) = touched {
        warn!("Failed to record last login for {}: {}", kind, e);
    }

    Ok(Some(account.principal))
}

pub async fn handle_login(
    service: &AuthService,
    request: &HttpRequest,
    kind: PrincipalKind,
    identifier: &str,
    password: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match authenticate(storage.as_ref(), kind, identifier, password).await {
        Ok(Some(principal)) => principal,
        Ok(None) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                "Invalid credentials",
            )));
        }
        Err(e) => return Ok(error_response(e)),
    };

    let cache = cache_from_request(request);
    let session = match create_session(cache.as_ref(), principal).await {
        Ok(session) => session,
        Err(e) => return Ok(error_response(e)),
    };

    info!(
        "{} {} logged in successfully",
        session.principal.kind, session.principal.id
    );

    let response = LoginResponse {
        token: session.token.clone(),
        expires_in: AppConfig::get().session.ttl,
        principal: session.principal,
    };
    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&session.token))
        .json(ApiResponse::success(response, "Login successful")))
}
