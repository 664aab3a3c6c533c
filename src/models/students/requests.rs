use serde::Deserialize;
use ts_rs::TS;

use super::entities::NewStudent;
use crate::models::common::validation::optional_text;
use crate::models::common::{FieldError, FieldErrors};
use crate::utils::validate::validate_password;

// 完成注册请求：使用已批准申请的注册号创建学生账号
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct RegisterStudentRequest {
    pub registration_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub photo_url: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// 校验后的注册资料，密码仍为明文，由服务层哈希
#[derive(Debug, Clone)]
pub struct StudentRegistration {
    pub registration_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: String,
    pub phone_number: String,
    pub photo_url: Option<String>,
    pub password: String,
}

impl RegisterStudentRequest {
    pub fn validate(self) -> Result<StudentRegistration, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let registration_number =
            errors.required("registration_number", self.registration_number.as_deref());
        let first_name = errors.required("first_name", self.first_name.as_deref());
        let last_name = errors.required("last_name", self.last_name.as_deref());
        let email = errors.required_email("email", self.email.as_deref());
        let date_of_birth = errors.required_date("date_of_birth", self.date_of_birth.as_deref());
        let phone_number = errors.required("phone_number", self.phone_number.as_deref());
        let password = check_new_password(
            &mut errors,
            self.password.as_deref(),
            self.confirm_password.as_deref(),
        );
        errors.finish(|| {
            Some(StudentRegistration {
                registration_number: registration_number?.to_uppercase(),
                first_name: first_name?,
                last_name: last_name?,
                email: email?,
                date_of_birth: date_of_birth?,
                phone_number: phone_number?,
                photo_url: optional_text(self.photo_url),
                password: password?,
            })
        })
    }
}

impl StudentRegistration {
    /// 用哈希后的密码替换明文，得到可写入的学生资料
    pub fn into_new_student(self, password_hash: String) -> NewStudent {
        NewStudent {
            registration_number: self.registration_number,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password_hash,
            date_of_birth: self.date_of_birth,
            phone_number: self.phone_number,
            photo_url: self.photo_url,
        }
    }
}

/// 新密码需满足密码策略且两次输入一致
pub fn check_new_password(
    errors: &mut FieldErrors,
    password: Option<&str>,
    confirm: Option<&str>,
) -> Option<String> {
    let Some(password) = password.filter(|p| !p.is_empty()) else {
        errors.push("password", "This field is required");
        return None;
    };
    let policy = validate_password(password);
    if !policy.is_valid {
        errors.push("password", policy.error_message());
        return None;
    }
    if confirm != Some(password) {
        errors.push("confirm_password", "Passwords do not match");
        return None;
    }
    Some(password.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> RegisterStudentRequest {
        RegisterStudentRequest {
            registration_number: Some("vss2025-0001".to_string()),
            first_name: Some("Amina".to_string()),
            last_name: Some("Yusuf".to_string()),
            email: Some("Amina@Example.com".to_string()),
            date_of_birth: Some("2011-05-14".to_string()),
            phone_number: Some("+254700000001".to_string()),
            photo_url: None,
            password: Some("Str0ngPassw0rd".to_string()),
            confirm_password: Some("Str0ngPassw0rd".to_string()),
        }
    }

    #[test]
    fn test_valid_registration_normalizes_fields() {
        let reg = full_request().validate().unwrap();
        assert_eq!(reg.registration_number, "VSS2025-0001");
        assert_eq!(reg.email, "amina@example.com");
    }

    #[test]
    fn test_password_mismatch() {
        let mut req = full_request();
        req.confirm_password = Some("Different1Pass".to_string());
        let errors = req.validate().unwrap_err();
        assert_eq!(errors[0].field, "confirm_password");
    }

    #[test]
    fn test_weak_password() {
        let mut req = full_request();
        req.password = Some("short".to_string());
        req.confirm_password = Some("short".to_string());
        let errors = req.validate().unwrap_err();
        assert_eq!(errors[0].field, "password");
    }

    #[test]
    fn test_bad_birth_date() {
        let mut req = full_request();
        req.date_of_birth = Some("14/05/2011".to_string());
        let errors = req.validate().unwrap_err();
        assert_eq!(errors[0].field, "date_of_birth");
    }
}
