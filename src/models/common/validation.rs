use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::utils::validate::{validate_email, validate_iso_date};

/// 字段级校验错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "api.ts")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// 收集请求校验过程中的字段错误
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// 必填字符串，返回去除首尾空白后的值
    pub fn required(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Some(v.to_string()),
            _ => {
                self.push(field, "This field is required");
                None
            }
        }
    }

    /// 必填且为合法邮箱，统一转小写
    pub fn required_email(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        let email = self.required(field, value)?;
        match validate_email(&email) {
            Ok(()) => Some(email.to_lowercase()),
            Err(msg) => {
                self.push(field, msg);
                None
            }
        }
    }

    /// 必填的 YYYY-MM-DD 日期
    pub fn required_date(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        let date = self.required(field, value)?;
        self.check_date(field, date)
    }

    /// 可选的 YYYY-MM-DD 日期，空字符串视为未填写
    pub fn optional_date(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        let date = value.map(str::trim).filter(|v| !v.is_empty())?;
        self.check_date(field, date.to_string())
    }

    fn check_date(&mut self, field: &str, date: String) -> Option<String> {
        match validate_iso_date(&date) {
            Ok(()) => Some(date),
            Err(msg) => {
                self.push(field, msg);
                None
            }
        }
    }

    /// 必填的正整数 ID
    pub fn required_id(&mut self, field: &str, value: Option<i64>) -> Option<i64> {
        match value {
            Some(id) if id > 0 => Some(id),
            Some(_) => {
                self.push(field, "Must be a positive identifier");
                None
            }
            None => {
                self.push(field, "This field is required");
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }

    /// 没有错误时返回构造好的值
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, Vec<FieldError>> {
        if !self.0.is_empty() {
            return Err(self.0);
        }
        build().ok_or_else(|| {
            vec![FieldError {
                field: "request".to_string(),
                message: "Request is incomplete".to_string(),
            }]
        })
    }
}

/// 可选文本：去掉首尾空白，空字符串视为 None
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_blank() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.required("name", Some("  ")), None);
        assert_eq!(errors.required("email", None), None);
        let list = errors.into_vec();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].field, "name");
    }

    #[test]
    fn test_required_email_lowercases() {
        let mut errors = FieldErrors::new();
        assert_eq!(
            errors.required_email("email", Some(" Jane.Doe@Example.com ")),
            Some("jane.doe@example.com".to_string())
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_dates() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.optional_date("start_date", Some("")), None);
        assert!(errors.is_empty());
        assert_eq!(errors.required_date("date_of_birth", Some("2010-13-01")), None);
        assert_eq!(errors.into_vec()[0].field, "date_of_birth");
    }

    #[test]
    fn test_finish_returns_collected_errors() {
        let mut errors = FieldErrors::new();
        errors.push("score", "Score must be between 0 and 100");
        let result: Result<i32, _> = errors.finish(|| Some(1));
        assert_eq!(result.unwrap_err()[0].field, "score");
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some("  ".to_string())), None);
        assert_eq!(optional_text(Some(" hi ".to_string())), Some("hi".to_string()));
    }
}
