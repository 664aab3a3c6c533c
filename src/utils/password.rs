use crate::config::AppConfig;
use crate::errors::PortalError;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

/// 其他框架留下的哈希前缀，无法校验时直接拒绝，不走明文比较
const FOREIGN_HASH_PREFIXES: &[&str] = &["pbkdf2_", "bcrypt", "argon2$", "$2a$", "$2b$", "$2y$"];

/// 凭据校验结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialCheck {
    Valid,
    /// 存储的是明文且匹配，调用方需要立即重新哈希并保存
    ValidLegacy,
    Invalid,
}

impl CredentialCheck {
    pub fn is_valid(self) -> bool {
        !matches!(self, CredentialCheck::Invalid)
    }
}

/// 哈希密码
pub fn hash_password(password: &str) -> Result<String, PortalError> {
    let config = AppConfig::get();
    let params = Params::new(
        config.argon2.memory_cost,
        config.argon2.time_cost,
        config.argon2.parallelism,
        None,
    )
    .map_err(|e| PortalError::password_hash(format!("Argon2 参数错误: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PortalError::password_hash(format!("密码哈希失败: {e}")))?;
    Ok(hash.to_string())
}

/// 验证密码（参数从 PHC 字符串中读取）
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    }
}

/// 校验登录凭据
///
/// - 可解析的 PHC 哈希：按 Argon2 校验
/// - 带已知外部哈希前缀但无法解析：拒绝
/// - 其他值视为历史明文，仅在 `allow_plaintext` 时做常量时间比较
pub fn verify_credential(password: &str, stored: &str, allow_plaintext: bool) -> CredentialCheck {
    if PasswordHash::new(stored).is_ok() {
        return if verify_password(password, stored) {
            CredentialCheck::Valid
        } else {
            CredentialCheck::Invalid
        };
    }

    if stored.is_empty()
        || !allow_plaintext
        || FOREIGN_HASH_PREFIXES.iter().any(|p| stored.starts_with(p))
    {
        return CredentialCheck::Invalid;
    }

    if constant_time_eq(password.as_bytes(), stored.as_bytes()) {
        CredentialCheck::ValidLegacy
    } else {
        CredentialCheck::Invalid
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("Corr3ctHorse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert_eq!(
            verify_credential("Corr3ctHorse", &hash, true),
            CredentialCheck::Valid
        );
        assert_eq!(
            verify_credential("wrong", &hash, true),
            CredentialCheck::Invalid
        );
    }

    #[test]
    fn test_plaintext_legacy_path() {
        assert_eq!(
            verify_credential("letmein", "letmein", true),
            CredentialCheck::ValidLegacy
        );
        assert_eq!(
            verify_credential("letmein", "letmein", false),
            CredentialCheck::Invalid
        );
        assert_eq!(
            verify_credential("letmeout", "letmein", true),
            CredentialCheck::Invalid
        );
    }

    #[test]
    fn test_foreign_hash_prefix_is_rejected() {
        let stored = "pbkdf2_sha256$600000$salt$hash";
        assert_eq!(
            verify_credential(stored, stored, true),
            CredentialCheck::Invalid
        );
        assert_eq!(
            verify_credential("x", "$2b$12$abcdefghijklmnopqrstuv", true),
            CredentialCheck::Invalid
        );
    }

    #[test]
    fn test_empty_stored_value_never_matches() {
        assert_eq!(verify_credential("", "", true), CredentialCheck::Invalid);
    }
}
