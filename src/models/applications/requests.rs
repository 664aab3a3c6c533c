use serde::Deserialize;
use ts_rs::TS;

use super::entities::AdmissionStatus;
use crate::models::common::{FieldError, FieldErrors, PaginationQuery};

// 提交入学申请请求（公开接口）
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "application.ts")]
pub struct SubmitApplicationRequest {
    pub student_name: Option<String>,
    pub email: Option<String>,
    pub applied_class_id: Option<i64>,
    pub previous_grade_level: Option<String>,
    pub previous_grade_results: Option<String>,
}

/// 校验后的申请数据
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub student_name: String,
    pub email: String,
    pub applied_class_id: i64,
    pub previous_grade_level: String,
    pub previous_grade_results: String,
}

impl SubmitApplicationRequest {
    pub fn validate(self) -> Result<NewApplication, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let student_name = errors.required("student_name", self.student_name.as_deref());
        let email = errors.required_email("email", self.email.as_deref());
        let applied_class_id = errors.required_id("applied_class_id", self.applied_class_id);
        let previous_grade_level =
            errors.required("previous_grade_level", self.previous_grade_level.as_deref());
        let previous_grade_results = errors.required(
            "previous_grade_results",
            self.previous_grade_results.as_deref(),
        );
        errors.finish(|| {
            Some(NewApplication {
                student_name: student_name?,
                email: email?,
                applied_class_id: applied_class_id?,
                previous_grade_level: previous_grade_level?,
                previous_grade_results: previous_grade_results?,
            })
        })
    }
}

// 审核动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "application.ts")]
pub enum DecisionAction {
    Approve,
    Reject,
}

impl DecisionAction {
    pub fn target_status(self) -> AdmissionStatus {
        match self {
            DecisionAction::Approve => AdmissionStatus::Approved,
            DecisionAction::Reject => AdmissionStatus::Rejected,
        }
    }
}

// 审核请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "application.ts")]
pub struct DecisionRequest {
    pub action: DecisionAction,
}

// 申请列表查询参数（来自HTTP请求）
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "application.ts")]
pub struct ApplicationListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<AdmissionStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> SubmitApplicationRequest {
        SubmitApplicationRequest {
            student_name: Some("Amina Yusuf".to_string()),
            email: Some("amina@example.com".to_string()),
            applied_class_id: Some(1),
            previous_grade_level: Some("Grade 6".to_string()),
            previous_grade_results: Some("Maths 82, English 77".to_string()),
        }
    }

    #[test]
    fn test_valid_application() {
        let app = full_request().validate().unwrap();
        assert_eq!(app.student_name, "Amina Yusuf");
        assert_eq!(app.applied_class_id, 1);
    }

    #[test]
    fn test_every_missing_field_is_reported() {
        let errors = SubmitApplicationRequest::default().validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "student_name",
                "email",
                "applied_class_id",
                "previous_grade_level",
                "previous_grade_results"
            ]
        );
    }

    #[test]
    fn test_malformed_email() {
        let mut req = full_request();
        req.email = Some("not-an-email".to_string());
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
    }

    #[test]
    fn test_decision_action_parsing() {
        let req: DecisionRequest = serde_json::from_str(r#"{"action":"approve"}"#).unwrap();
        assert_eq!(req.action.target_status(), AdmissionStatus::Approved);
        assert!(serde_json::from_str::<DecisionRequest>(r#"{"action":"archive"}"#).is_err());
    }
}
