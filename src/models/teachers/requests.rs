use serde::Deserialize;
use ts_rs::TS;

use super::entities::NewTeacher;
use crate::models::common::{FieldError, FieldErrors};
use crate::models::students::requests::check_new_password;

// 教师注册请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherSignupRequest {
    pub national_id: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// 校验后的教师注册数据，密码仍为明文
#[derive(Debug, Clone)]
pub struct TeacherSignup {
    pub national_id: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl TeacherSignupRequest {
    pub fn validate(self) -> Result<TeacherSignup, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let national_id = errors.required("national_id", self.national_id.as_deref());
        if let Some(ref id) = national_id
            && (id.len() > 20 || !id.chars().all(|c| c.is_ascii_alphanumeric()))
        {
            errors.push(
                "national_id",
                "National ID must be at most 20 letters or digits",
            );
        }
        let full_name = errors.required("full_name", self.full_name.as_deref());
        let email = errors.required_email("email", self.email.as_deref());
        let password = check_new_password(
            &mut errors,
            self.password.as_deref(),
            self.confirm_password.as_deref(),
        );
        errors.finish(|| {
            Some(TeacherSignup {
                national_id: national_id?,
                full_name: full_name?,
                email: email?,
                password: password?,
            })
        })
    }
}

impl TeacherSignup {
    pub fn into_new_teacher(self, password_hash: String) -> NewTeacher {
        NewTeacher {
            national_id: self.national_id,
            full_name: self.full_name,
            email: self.email,
            password_hash,
        }
    }
}

// 为教师分配科目或班级
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct AssignIdsRequest {
    pub ids: Vec<i64>,
}

// 教师工作台查询参数
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherDashboardQuery {
    // 注册号片段，大小写不敏感
    pub registration_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_validation() {
        let signup = TeacherSignupRequest {
            national_id: Some("29384756".to_string()),
            full_name: Some("Grace Wanjiku".to_string()),
            email: Some("grace@example.com".to_string()),
            password: Some("Teach1ngIsFun".to_string()),
            confirm_password: Some("Teach1ngIsFun".to_string()),
        }
        .validate()
        .unwrap();
        assert_eq!(signup.national_id, "29384756");
    }

    #[test]
    fn test_signup_rejects_malformed_national_id() {
        let errors = TeacherSignupRequest {
            national_id: Some("29 384-756".to_string()),
            full_name: Some("Grace Wanjiku".to_string()),
            email: Some("grace@example.com".to_string()),
            password: Some("Teach1ngIsFun".to_string()),
            confirm_password: Some("Teach1ngIsFun".to_string()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors[0].field, "national_id");
    }
}
