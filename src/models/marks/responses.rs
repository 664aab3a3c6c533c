use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::MarkView;

// 录入成绩响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "mark.ts")]
pub struct RecordMarkResponse {
    pub mark: MarkView,
    // true 表示新建，false 表示覆盖已有成绩
    pub created: bool,
    // 该学生该学期的成绩单地址
    pub results_url: String,
}
