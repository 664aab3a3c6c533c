use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Principal;

// 登录响应，令牌同时以 HttpOnly Cookie 下发
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: u64,
    pub principal: Principal,
}

// 当前会话信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct SessionInfoResponse {
    pub principal: Principal,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
