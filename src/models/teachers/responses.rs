use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Teacher;
use crate::models::academics::entities::{Class, Subject, Term};
use crate::models::marks::entities::MarkView;
use crate::models::students::entities::Student;

// 教师工作台
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherDashboardResponse {
    pub teacher: Teacher,
    pub subjects: Vec<Subject>,
    pub classes: Vec<Class>,
    pub terms: Vec<Term>,
    // 按注册号片段匹配到的学生
    pub students: Vec<Student>,
    // 注册号完全匹配的学生及其全部成绩
    pub selected_student: Option<Student>,
    pub marks: Vec<MarkView>,
}
