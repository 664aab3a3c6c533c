use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Student;
use crate::models::academics::entities::Class;

// 学生本人资料，班级被删除时为空
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentProfileResponse {
    pub student: Student,
    pub class: Option<Class>,
}
