use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 后台职员角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "staff.ts")]
pub enum StaffRole {
    Staff,
    Admin,
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StaffRole::Staff => write!(f, "staff"),
            StaffRole::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staff" => Ok(StaffRole::Staff),
            "admin" => Ok(StaffRole::Admin),
            _ => Err(format!("Invalid staff role: {s}")),
        }
    }
}

// 账号状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "staff.ts")]
pub enum StaffStatus {
    Active,
    Suspended,
}

impl std::fmt::Display for StaffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StaffStatus::Active => write!(f, "active"),
            StaffStatus::Suspended => write!(f, "suspended"),
        }
    }
}

impl std::str::FromStr for StaffStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(StaffStatus::Active),
            "suspended" => Ok(StaffStatus::Suspended),
            _ => Err(format!("Invalid staff status: {s}")),
        }
    }
}

// 后台职员
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "staff.ts")]
pub struct StaffUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: StaffRole,
    pub status: StaffStatus,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 新建职员账号，密码已哈希
#[derive(Debug, Clone)]
pub struct NewStaffUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: StaffRole,
}
