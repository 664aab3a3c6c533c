use serde::Deserialize;
use ts_rs::TS;

use super::entities::round2;
use crate::models::common::validation::optional_text;
use crate::models::common::{FieldError, FieldErrors};

// 分数既可以是数字也可以是数字字符串
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "mark.ts")]
pub enum ScoreInput {
    Number(f64),
    Text(String),
}

impl ScoreInput {
    fn parse(&self) -> Option<f64> {
        let value = match self {
            ScoreInput::Number(n) => *n,
            ScoreInput::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

// 录入或更新成绩请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "mark.ts")]
pub struct RecordMarkRequest {
    pub student_id: Option<i64>,
    pub registration_number: Option<String>,
    pub subject_id: Option<i64>,
    pub term_id: Option<i64>,
    pub score: Option<ScoreInput>,
    pub comment: Option<String>,
}

/// 学生定位方式：ID 优先，其次注册号（大小写不敏感）
#[derive(Debug, Clone, PartialEq)]
pub enum StudentRef {
    Id(i64),
    RegistrationNumber(String),
}

/// 校验后的成绩录入
#[derive(Debug, Clone)]
pub struct ValidatedMark {
    pub student: StudentRef,
    pub subject_id: i64,
    pub term_id: i64,
    pub score: f64,
    pub comment: Option<String>,
}

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

impl RecordMarkRequest {
    pub fn validate(self) -> Result<ValidatedMark, Vec<FieldError>> {
        let mut errors = FieldErrors::new();

        let student = match (self.student_id, optional_text(self.registration_number)) {
            (Some(id), _) if id > 0 => Some(StudentRef::Id(id)),
            (Some(_), _) => {
                errors.push("student_id", "Must be a positive identifier");
                None
            }
            (None, Some(reg_no)) => Some(StudentRef::RegistrationNumber(reg_no)),
            (None, None) => {
                errors.push("student", "Either student_id or registration_number is required");
                None
            }
        };

        let subject_id = errors.required_id("subject_id", self.subject_id);
        let term_id = errors.required_id("term_id", self.term_id);

        let score = match self.score {
            None => {
                errors.push("score", "This field is required");
                None
            }
            Some(input) => match input.parse() {
                None => {
                    errors.push("score", "Score must be a number");
                    None
                }
                Some(value) if !(MIN_SCORE..=MAX_SCORE).contains(&value) => {
                    errors.push("score", "Score must be between 0 and 100");
                    None
                }
                Some(value) => Some(round2(value)),
            },
        };

        let comment = optional_text(self.comment);
        errors.finish(|| {
            Some(ValidatedMark {
                student: student?,
                subject_id: subject_id?,
                term_id: term_id?,
                score: score?,
                comment,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<ValidatedMark, Vec<FieldError>> {
        serde_json::from_str::<RecordMarkRequest>(json)
            .unwrap()
            .validate()
    }

    #[test]
    fn test_numeric_string_score_is_accepted_and_rounded() {
        let mark = parse(
            r#"{"registration_number":"vss2025-0001","subject_id":1,"term_id":2,"score":"78.456"}"#,
        )
        .unwrap();
        assert_eq!(
            mark.student,
            StudentRef::RegistrationNumber("vss2025-0001".to_string())
        );
        assert_eq!(mark.score, 78.46);
    }

    #[test]
    fn test_student_id_takes_precedence() {
        let mark = parse(
            r#"{"student_id":5,"registration_number":"X","subject_id":1,"term_id":2,"score":50}"#,
        )
        .unwrap();
        assert_eq!(mark.student, StudentRef::Id(5));
    }

    #[test]
    fn test_out_of_range_score() {
        let errors = parse(r#"{"student_id":5,"subject_id":1,"term_id":2,"score":100.5}"#)
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "score");
    }

    #[test]
    fn test_non_numeric_score() {
        let errors =
            parse(r#"{"student_id":5,"subject_id":1,"term_id":2,"score":"eighty"}"#).unwrap_err();
        assert_eq!(errors[0].message, "Score must be a number");
    }

    #[test]
    fn test_missing_everything() {
        let errors = parse("{}").unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["student", "subject_id", "term_id", "score"]);
    }

    #[test]
    fn test_blank_comment_is_dropped() {
        let mark =
            parse(r#"{"student_id":5,"subject_id":1,"term_id":2,"score":0,"comment":"  "}"#)
                .unwrap();
        assert_eq!(mark.comment, None);
        assert_eq!(mark.score, 0.0);
    }
}
