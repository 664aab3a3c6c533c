//! 业务数据模型
//!
//! 每个子模块按 `entities`（业务实体）、`requests`（请求体与校验）、
//! `responses`（响应体）划分。

pub mod academics;
pub mod applications;
pub mod auth;
pub mod common;
pub mod content;
pub mod marks;
pub mod results;
pub mod staff;
pub mod students;
pub mod teachers;

pub use common::{
    ApiResponse, ErrorCode, FieldError, FieldErrors, PaginatedResponse, PaginationInfo,
    PaginationQuery,
};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 把 unix 时间戳转换为 UTC 时间，非法值回落到纪元起点
pub(crate) fn timestamp_to_datetime(ts: i64) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::<chrono::Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
