use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid date regex"));

const WEAK_PASSWORDS: &[&str] = &[
    "password",
    "12345678",
    "123456789",
    "qwerty123",
    "admin123",
    "password1",
    "abcd1234",
    "student1",
    "teacher1",
    "welcome1",
];

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.len() > 254 || !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// YYYY-MM-DD 且为真实存在的日期
pub fn validate_iso_date(date: &str) -> Result<(), &'static str> {
    if !ISO_DATE_RE.is_match(date) {
        return Err("Date must use the YYYY-MM-DD format");
    }
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| "Date does not exist")
}

/// 媒体只以 URL 引用：http(s) 绝对地址或站内绝对路径
pub fn validate_media_url(url: &str) -> Result<(), &'static str> {
    if url.len() > 2048 || url.chars().any(char::is_whitespace) {
        return Err("Media URL is invalid");
    }
    let lower = url.to_ascii_lowercase();
    let absolute = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"));
    match absolute {
        Some(rest) if !rest.is_empty() => Ok(()),
        Some(_) => Err("Media URL is invalid"),
        None if url.starts_with('/') && !url.starts_with("//") => Ok(()),
        None => Err("Media URL must be an http(s) address or a site path"),
    }
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
/// - 不能是常见弱密码
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }
    if WEAK_PASSWORDS
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_policy() {
        assert!(validate_password("SecurePass123").is_valid);

        let cases = [
            ("Ab1", "Password must be at least 8 characters long"),
            ("abcd12345", "Password must contain at least one uppercase letter"),
            ("ABCD12345", "Password must contain at least one lowercase letter"),
            ("AbcdEfghi", "Password must contain at least one digit"),
            ("Password1", "Password is too common, please choose a stronger password"),
        ];
        for (password, expected) in cases {
            let result = validate_password(password);
            assert!(!result.is_valid, "{password} should be rejected");
            assert!(result.errors.contains(&expected), "{password}: {result:?}");
        }
    }

    #[test]
    fn test_email() {
        assert!(validate_email("registrar@school.ac.ke").is_ok());
        assert!(validate_email("registrar@school").is_err());
        assert!(validate_email("no spaces@school.org").is_err());
    }

    #[test]
    fn test_iso_date() {
        assert!(validate_iso_date("2024-02-29").is_ok());
        assert_eq!(validate_iso_date("2023-02-29"), Err("Date does not exist"));
        assert!(validate_iso_date("29/02/2024").is_err());
    }

    #[test]
    fn test_media_url() {
        assert!(validate_media_url("https://cdn.example.com/a.jpg").is_ok());
        assert!(validate_media_url("/media/gallery/a.jpg").is_ok());
        assert!(validate_media_url("//evil.example.com/a.jpg").is_err());
        assert!(validate_media_url("javascript:alert(1)").is_err());
        assert!(validate_media_url("https://").is_err());
    }
}
