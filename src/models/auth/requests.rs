use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::{FieldError, FieldErrors};
use crate::models::students::requests::check_new_password;

// 学生登录：注册号 + 密码
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct StudentLoginRequest {
    pub registration_number: String,
    pub password: String,
}

// 教师登录：身份证号 + 密码
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct TeacherLoginRequest {
    pub national_id: String,
    pub password: String,
}

// 职员登录：用户名 + 密码
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct StaffLoginRequest {
    pub username: String,
    pub password: String,
}

// 忘记密码：注册号和邮箱需同时匹配
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct ForgotPasswordRequest {
    pub registration_number: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PasswordResetLookup {
    pub registration_number: String,
    pub email: String,
}

impl ForgotPasswordRequest {
    pub fn validate(self) -> Result<PasswordResetLookup, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let registration_number =
            errors.required("registration_number", self.registration_number.as_deref());
        let email = errors.required_email("email", self.email.as_deref());
        errors.finish(|| {
            Some(PasswordResetLookup {
                registration_number: registration_number?,
                email: email?,
            })
        })
    }
}

// 使用重置令牌设置新密码
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct ResetPasswordRequest {
    pub token: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PasswordReset {
    pub token: String,
    pub new_password: String,
}

impl ResetPasswordRequest {
    pub fn validate(self) -> Result<PasswordReset, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let token = errors.required("token", self.token.as_deref());
        let new_password = check_new_password(
            &mut errors,
            self.new_password.as_deref(),
            self.confirm_password.as_deref(),
        );
        errors.finish(|| {
            Some(PasswordReset {
                token: token?,
                new_password: new_password?,
            })
        })
    }
}
