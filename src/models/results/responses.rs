use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::academics::entities::Term;
use crate::models::marks::entities::MarkView;
use crate::models::students::entities::Student;

// 成绩单状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "results.ts")]
pub enum ResultsState {
    Ready,
    // 未指定学期且没有当前学期
    NotReady,
}

// 学生某学期的成绩单
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "results.ts")]
pub struct StudentResults {
    pub state: ResultsState,
    pub student: Student,
    pub term: Option<Term>,
    pub terms: Vec<Term>,
    pub marks: Vec<MarkView>,
    // 两位小数；该学期没有成绩时为空
    pub average: Option<f64>,
    // 班级排名，从 1 开始
    pub position: Option<u32>,
    // 参与排名的人数
    pub ranked_students: u32,
}
