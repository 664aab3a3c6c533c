//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use sea_orm::{DbErr, SqlErr};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_portal_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum PortalError {
            $($variant(String),)*
        }

        impl PortalError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(PortalError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PortalError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PortalError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_portal_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Conflict("E010", "Uniqueness Conflict"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
    InvalidState("E014", "Invalid Workflow State"),
    Notification("E015", "Notification Delivery Error"),
    PasswordHash("E016", "Password Hash Error"),
}

impl PortalError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否属于调用方可以修正的错误（4xx 类）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PortalError::Validation(_)
                | PortalError::NotFound(_)
                | PortalError::Conflict(_)
                | PortalError::InvalidState(_)
                | PortalError::Authentication(_)
                | PortalError::Authorization(_)
        )
    }
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PortalError {}

// 为常见的错误类型实现 From trait
impl From<DbErr> for PortalError {
    fn from(err: DbErr) -> Self {
        // 唯一约束冲突单独归类，便于上层返回 409
        if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            return PortalError::Conflict(detail);
        }
        PortalError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for PortalError {
    fn from(err: std::io::Error) -> Self {
        PortalError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for PortalError {
    fn from(err: chrono::ParseError) -> Self {
        PortalError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(PortalError::cache_connection("test").code(), "E001");
        assert_eq!(PortalError::database_config("test").code(), "E003");
        assert_eq!(PortalError::validation("test").code(), "E007");
        assert_eq!(PortalError::conflict("test").code(), "E010");
        assert_eq!(PortalError::authentication("test").code(), "E012");
        assert_eq!(PortalError::invalid_state("test").code(), "E014");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            PortalError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            PortalError::invalid_state("test").error_type(),
            "Invalid Workflow State"
        );
    }

    #[test]
    fn test_error_message() {
        let err = PortalError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = PortalError::not_found("Application VSS2025-0001");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("VSS2025-0001"));
    }

    #[test]
    fn test_client_error_classification() {
        assert!(PortalError::conflict("dup").is_client_error());
        assert!(PortalError::invalid_state("not approved").is_client_error());
        assert!(!PortalError::database_operation("boom").is_client_error());
        assert!(!PortalError::notification("smtp down").is_client_error());
    }

    #[test]
    fn test_plain_db_error_is_operation_error() {
        let err: PortalError = DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.code(), "E005");
    }
}
