use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 审核状态，学生与入学申请共用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "application.ts")]
pub enum AdmissionStatus {
    Pending,
    Approved,
    Rejected,
}

impl AdmissionStatus {
    pub const PENDING: &'static str = "pending";
    pub const APPROVED: &'static str = "approved";
    pub const REJECTED: &'static str = "rejected";
}

impl std::fmt::Display for AdmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdmissionStatus::Pending => write!(f, "{}", AdmissionStatus::PENDING),
            AdmissionStatus::Approved => write!(f, "{}", AdmissionStatus::APPROVED),
            AdmissionStatus::Rejected => write!(f, "{}", AdmissionStatus::REJECTED),
        }
    }
}

impl std::str::FromStr for AdmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            AdmissionStatus::PENDING => Ok(AdmissionStatus::Pending),
            AdmissionStatus::APPROVED => Ok(AdmissionStatus::Approved),
            AdmissionStatus::REJECTED => Ok(AdmissionStatus::Rejected),
            _ => Err(format!("Invalid admission status: {s}")),
        }
    }
}

// 入学申请
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "application.ts")]
pub struct StudentApplication {
    pub id: i64,
    pub student_name: String,
    pub email: String,
    // 提交时生成，之后不再变化
    pub registration_number: String,
    pub applied_class_id: Option<i64>,
    pub previous_grade_level: String,
    pub previous_grade_results: String,
    pub status: AdmissionStatus,
    pub is_registered: bool,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 按 `{prefix}-{seq:04}` 生成注册号
pub fn format_registration_number(prefix: &str, sequence: i64) -> String {
    format!("{prefix}-{sequence:04}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_number_format() {
        assert_eq!(format_registration_number("VSS2025", 1), "VSS2025-0001");
        assert_eq!(format_registration_number("VSS2025", 42), "VSS2025-0042");
        assert_eq!(format_registration_number("VSS2025", 12345), "VSS2025-12345");
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            AdmissionStatus::Pending,
            AdmissionStatus::Approved,
            AdmissionStatus::Rejected,
        ] {
            assert_eq!(status.to_string().parse::<AdmissionStatus>(), Ok(status));
        }
        assert!("archived".parse::<AdmissionStatus>().is_err());
    }
}
