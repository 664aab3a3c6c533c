use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::applications::entities::AdmissionStatus;

// 学生
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    // YYYY-MM-DD
    pub date_of_birth: String,
    pub phone_number: String,
    pub photo_url: Option<String>,
    pub registration_number: String,
    pub class_id: Option<i64>,
    pub status: AdmissionStatus,
    pub applied_at: chrono::DateTime<chrono::Utc>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// 完成注册时写入的学生资料，密码已哈希
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub registration_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub date_of_birth: String,
    pub phone_number: String,
    pub photo_url: Option<String>,
}

/// 完成注册的结果，业务上的拒绝不算错误
#[derive(Debug, Clone)]
pub enum RegistrationOutcome {
    Registered(Student),
    ApplicationNotFound,
    NotApproved,
    AlreadyRegistered,
}
