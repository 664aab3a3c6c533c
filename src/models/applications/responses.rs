use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::StudentApplication;
use crate::models::common::PaginatedResponse;

pub type ApplicationListResponse = PaginatedResponse<StudentApplication>;

// 提交申请响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "application.ts")]
pub struct SubmitApplicationResponse {
    pub id: i64,
    pub registration_number: String,
    pub application: StudentApplication,
}

// 通知投递结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export, export_to = "application.ts")]
pub enum NotificationStatus {
    Delivered,
    Failed { reason: String },
    NotRequired,
}

impl NotificationStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, NotificationStatus::Failed { .. })
    }
}

// 审核结果
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "application.ts")]
pub struct DecisionResponse {
    pub application: StudentApplication,
    pub notification: NotificationStatus,
}
