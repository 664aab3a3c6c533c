use serde::Deserialize;
use ts_rs::TS;

// 成绩单查询参数，缺省时使用当前会话学生和当前学期
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "results.ts")]
pub struct ResultsQuery {
    pub student: Option<i64>,
    pub term: Option<i64>,
}
