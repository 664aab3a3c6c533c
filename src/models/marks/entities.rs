use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 成绩记录，(student, subject, term) 唯一
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "mark.ts")]
pub struct Mark {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub teacher_id: Option<i64>,
    pub term_id: Option<i64>,
    pub score: f64,
    pub comment: Option<String>,
    pub recorded_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Mark {
    pub fn grade(&self) -> &'static str {
        letter_grade(self.score)
    }
}

/// 写入成绩的指令，分数已校验并保留两位小数
#[derive(Debug, Clone)]
pub struct MarkEntry {
    pub student_id: i64,
    pub subject_id: i64,
    pub term_id: i64,
    pub teacher_id: Option<i64>,
    pub score: f64,
    pub comment: Option<String>,
}

// 带科目、教师名称的成绩展示行
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "mark.ts")]
pub struct MarkView {
    pub id: i64,
    pub subject_id: i64,
    pub subject_name: String,
    pub teacher_name: Option<String>,
    pub term_id: Option<i64>,
    pub score: f64,
    pub grade: String,
    pub comment: Option<String>,
    pub recorded_at: chrono::DateTime<chrono::Utc>,
}

impl MarkView {
    pub fn new(mark: Mark, subject_name: String, teacher_name: Option<String>) -> Self {
        Self {
            grade: mark.grade().to_string(),
            id: mark.id,
            subject_id: mark.subject_id,
            subject_name,
            teacher_name,
            term_id: mark.term_id,
            score: mark.score,
            comment: mark.comment,
            recorded_at: mark.recorded_at,
        }
    }
}

/// 分数对应的等级：>=75 A，>=65 B，>=50 C，>=40 D，其余 E；非有限数返回空串
pub fn letter_grade(score: f64) -> &'static str {
    if !score.is_finite() {
        return "";
    }
    if score >= 75.0 {
        "A"
    } else if score >= 65.0 {
        "B"
    } else if score >= 50.0 {
        "C"
    } else if score >= 40.0 {
        "D"
    } else {
        "E"
    }
}

/// 保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(letter_grade(100.0), "A");
        assert_eq!(letter_grade(75.0), "A");
        assert_eq!(letter_grade(74.9), "B");
        assert_eq!(letter_grade(65.0), "B");
        assert_eq!(letter_grade(64.99), "C");
        assert_eq!(letter_grade(50.0), "C");
        assert_eq!(letter_grade(49.0), "D");
        assert_eq!(letter_grade(40.0), "D");
        assert_eq!(letter_grade(39.0), "E");
        assert_eq!(letter_grade(0.0), "E");
    }

    #[test]
    fn test_non_finite_score_has_no_grade() {
        assert_eq!(letter_grade(f64::NAN), "");
        assert_eq!(letter_grade(f64::INFINITY), "");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(70.0), 70.0);
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(12.344), 12.34);
    }
}
