use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 班级
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct Class {
    pub id: i64,
    pub name: String,
    pub academic_year: Option<String>,
    pub section: Option<String>,
    // 班主任（教师删除后置空）
    pub advisor_id: Option<i64>,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 科目，只属于一个班级
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub class_id: i64,
}

// 学期
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct Term {
    pub id: i64,
    pub name: String,
    // YYYY-MM-DD
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
