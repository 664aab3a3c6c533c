use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 入学申请按状态计数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "staff.ts")]
pub struct ApplicationCounts {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    // 已完成注册的申请数
    pub registered: i64,
}

// 后台首页统计
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "staff.ts")]
pub struct StaffDashboardResponse {
    pub total_students: i64,
    pub total_teachers: i64,
    pub total_classes: i64,
    pub applications: ApplicationCounts,
}

// 招生报表中按申请班级汇总的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "staff.ts")]
pub struct AdmissionsByClass {
    // 班级被删除后为空
    pub class_id: Option<i64>,
    pub class_name: Option<String>,
    pub counts: ApplicationCounts,
}

// 招生报表
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "staff.ts")]
pub struct AdmissionsReport {
    pub summary: ApplicationCounts,
    pub by_class: Vec<AdmissionsByClass>,
}
