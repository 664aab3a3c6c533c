use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::validation::optional_text;
use crate::models::common::{FieldError, FieldErrors};

// 创建班级请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct CreateClassRequest {
    pub name: Option<String>,
    pub academic_year: Option<String>,
    pub section: Option<String>,
    pub advisor_id: Option<i64>,
    pub notes: Option<String>,
}

/// 校验后的班级数据
#[derive(Debug, Clone)]
pub struct NewClass {
    pub name: String,
    pub academic_year: Option<String>,
    pub section: Option<String>,
    pub advisor_id: Option<i64>,
    pub notes: Option<String>,
}

impl CreateClassRequest {
    pub fn validate(self) -> Result<NewClass, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let name = errors.required("name", self.name.as_deref());
        if let Some(id) = self.advisor_id
            && id <= 0
        {
            errors.push("advisor_id", "Must be a positive identifier");
        }
        errors.finish(|| {
            Some(NewClass {
                name: name?,
                academic_year: optional_text(self.academic_year),
                section: optional_text(self.section),
                advisor_id: self.advisor_id,
                notes: optional_text(self.notes),
            })
        })
    }
}

// 创建科目请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct CreateSubjectRequest {
    pub name: Option<String>,
    pub class_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewSubject {
    pub name: String,
    pub class_id: i64,
}

impl CreateSubjectRequest {
    pub fn validate(self) -> Result<NewSubject, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let name = errors.required("name", self.name.as_deref());
        let class_id = errors.required_id("class_id", self.class_id);
        errors.finish(|| {
            Some(NewSubject {
                name: name?,
                class_id: class_id?,
            })
        })
    }
}

// 科目列表查询参数
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct SubjectListQuery {
    pub class_id: Option<i64>,
}

// 创建学期请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct CreateTermRequest {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NewTerm {
    pub name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_active: bool,
}

impl CreateTermRequest {
    pub fn validate(self) -> Result<NewTerm, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let name = errors.required("name", self.name.as_deref());
        let start_date = errors.optional_date("start_date", self.start_date.as_deref());
        let end_date = errors.optional_date("end_date", self.end_date.as_deref());
        check_date_order(&mut errors, start_date.as_deref(), end_date.as_deref());
        errors.finish(|| {
            Some(NewTerm {
                name: name?,
                start_date,
                end_date,
                is_active: self.is_active.unwrap_or(false),
            })
        })
    }
}

// 更新学期请求，未提供的字段保持不变
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct UpdateTermRequest {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TermUpdate {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl UpdateTermRequest {
    pub fn validate(self) -> Result<TermUpdate, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let name = match self.name {
            Some(ref raw) => errors.required("name", Some(raw.as_str())),
            None => None,
        };
        let start_date = errors.optional_date("start_date", self.start_date.as_deref());
        let end_date = errors.optional_date("end_date", self.end_date.as_deref());
        check_date_order(&mut errors, start_date.as_deref(), end_date.as_deref());
        errors.finish(|| {
            Some(TermUpdate {
                name,
                start_date,
                end_date,
            })
        })
    }
}

// ISO 日期可以直接按字符串比较
fn check_date_order(errors: &mut FieldErrors, start: Option<&str>, end: Option<&str>) {
    if let (Some(start), Some(end)) = (start, end)
        && end < start
    {
        errors.push("end_date", "End date must not be before start date");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_term_defaults_inactive() {
        let term = CreateTermRequest {
            name: Some("Term 1".to_string()),
            start_date: Some("2025-01-06".to_string()),
            end_date: Some("2025-04-04".to_string()),
            is_active: None,
        }
        .validate()
        .unwrap();
        assert!(!term.is_active);
        assert_eq!(term.start_date.as_deref(), Some("2025-01-06"));
    }

    #[test]
    fn test_create_term_rejects_reversed_dates() {
        let errors = CreateTermRequest {
            name: Some("Term 1".to_string()),
            start_date: Some("2025-04-04".to_string()),
            end_date: Some("2025-01-06".to_string()),
            is_active: Some(true),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors[0].field, "end_date");
    }

    #[test]
    fn test_update_term_rejects_blank_name() {
        let errors = UpdateTermRequest {
            name: Some("   ".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn test_create_subject_requires_class() {
        let errors = CreateSubjectRequest {
            name: Some("Mathematics".to_string()),
            class_id: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "class_id");
    }

    #[test]
    fn test_create_class_trims_optional_fields() {
        let class = CreateClassRequest {
            name: Some(" Form 1 ".to_string()),
            section: Some("  ".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(class.name, "Form 1");
        assert_eq!(class.section, None);
    }
}
