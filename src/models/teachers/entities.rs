use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教师
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct Teacher {
    pub id: i64,
    pub national_id: String,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 新建教师账号，密码已哈希
#[derive(Debug, Clone)]
pub struct NewTeacher {
    pub national_id: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
}
