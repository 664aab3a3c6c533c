use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 登录主体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "auth.ts")]
pub enum PrincipalKind {
    Student,
    Teacher,
    Staff,
}

impl std::fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrincipalKind::Student => write!(f, "student"),
            PrincipalKind::Teacher => write!(f, "teacher"),
            PrincipalKind::Staff => write!(f, "staff"),
        }
    }
}

// 当前登录主体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct Principal {
    pub kind: PrincipalKind,
    pub id: i64,
    pub display_name: String,
}

impl Principal {
    pub fn is(&self, kind: PrincipalKind) -> bool {
        self.kind == kind
    }
}

/// 服务端会话，保存在对象缓存 `session:{token}` 下，
/// 由 RequireSession 中间件放入请求扩展
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct Session {
    pub token: String,
    pub principal: Principal,
    pub created_at: i64,
}

impl Session {
    pub const KEY_PREFIX: &'static str = "session:";

    pub fn cache_key(token: &str) -> String {
        format!("{}{token}", Self::KEY_PREFIX)
    }
}

/// 密码重置令牌对应的缓存记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetTicket {
    pub student_id: i64,
    pub issued_at: i64,
}

impl PasswordResetTicket {
    pub fn cache_key(token: &str) -> String {
        format!("password_reset:{token}")
    }
}
