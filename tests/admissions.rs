mod common;

use common::*;
use school_portal::errors::PortalError;
use school_portal::models::applications::entities::AdmissionStatus;
use school_portal::models::applications::requests::{DecisionAction, NewApplication};
use school_portal::models::applications::responses::NotificationStatus;
use school_portal::models::students::entities::RegistrationOutcome;
use school_portal::models::students::requests::StudentRegistration;
use school_portal::services::applications::decide::{DecisionOutcome, decide_application};
use school_portal::services::applications::finalize::finalize_registration;
use school_portal::services::applications::submit::{SubmitOutcome, submit_application};
use school_portal::services::staff::report::admissions_report;
use school_portal::storage::Storage;

fn registration(registration_number: &str, email: &str) -> StudentRegistration {
    StudentRegistration {
        registration_number: registration_number.to_string(),
        first_name: "Amina".to_string(),
        last_name: "Yusuf".to_string(),
        email: email.to_string(),
        date_of_birth: "2011-05-14".to_string(),
        phone_number: "+254700000001".to_string(),
        photo_url: None,
        password: PASSWORD.to_string(),
    }
}

#[tokio::test]
async fn test_registration_numbers_follow_application_ids() {
    let (_dir, storage) = test_storage().await;
    let class = create_class(storage.as_ref(), "Form 1").await;

    let first = common::submit_application(storage.as_ref(), class.id, "Amina Yusuf").await;
    let second = common::submit_application(storage.as_ref(), class.id, "Brian Otieno").await;

    assert_eq!(
        first.registration_number,
        format!("{PREFIX}-{:04}", first.id)
    );
    assert_eq!(
        second.registration_number,
        format!("{PREFIX}-{:04}", second.id)
    );
    assert_eq!(first.status, AdmissionStatus::Pending);
    assert!(!first.is_registered);
}

#[tokio::test]
async fn test_submit_rejects_unknown_class() {
    let (_dir, storage) = test_storage().await;

    let outcome = submit_application(
        storage.as_ref(),
        NewApplication {
            student_name: "Chao Wei".to_string(),
            email: "chao@family.example".to_string(),
            applied_class_id: 42,
            previous_grade_level: "Grade 6".to_string(),
            previous_grade_results: "Maths 70".to_string(),
        },
    )
    .await
    .unwrap();
    assert!(matches!(outcome, SubmitOutcome::ClassNotFound));
}

#[tokio::test]
async fn test_approval_notifies_applicant_with_registration_link() {
    let (_dir, storage) = test_storage().await;
    let class = create_class(storage.as_ref(), "Form 1").await;
    let application = common::submit_application(storage.as_ref(), class.id, "Amina Yusuf").await;
    let notifier = RecordingNotifier::default();

    let outcome = decide_application(
        storage.as_ref(),
        &notifier,
        application.id,
        DecisionAction::Approve,
    )
    .await
    .unwrap();
    let DecisionOutcome::Decided(response) = outcome else {
        panic!("application was not decided");
    };
    assert_eq!(response.application.status, AdmissionStatus::Approved);
    assert_eq!(response.notification, NotificationStatus::Delivered);

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, application.email);
    assert!(sent[0].body.contains(&format!(
        "/students/register?reg_no={}",
        application.registration_number
    )));
}

#[tokio::test]
async fn test_failed_notification_does_not_undo_approval() {
    let (_dir, storage) = test_storage().await;
    let class = create_class(storage.as_ref(), "Form 1").await;
    let application = common::submit_application(storage.as_ref(), class.id, "Amina Yusuf").await;

    let outcome = decide_application(
        storage.as_ref(),
        &FailingNotifier,
        application.id,
        DecisionAction::Approve,
    )
    .await
    .unwrap();
    let DecisionOutcome::Decided(response) = outcome else {
        panic!("application was not decided");
    };
    assert!(response.notification.is_degraded());
    assert_eq!(response.application.status, AdmissionStatus::Approved);

    let stored = storage
        .get_application_by_id(application.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, AdmissionStatus::Approved);
}

#[tokio::test]
async fn test_rejection_sends_nothing() {
    let (_dir, storage) = test_storage().await;
    let class = create_class(storage.as_ref(), "Form 1").await;
    let application = common::submit_application(storage.as_ref(), class.id, "Amina Yusuf").await;
    let notifier = RecordingNotifier::default();

    let DecisionOutcome::Decided(response) = decide_application(
        storage.as_ref(),
        &notifier,
        application.id,
        DecisionAction::Reject,
    )
    .await
    .unwrap() else {
        panic!("application was not decided");
    };
    assert_eq!(response.application.status, AdmissionStatus::Rejected);
    assert_eq!(response.notification, NotificationStatus::NotRequired);
    assert!(notifier.sent.lock().unwrap().is_empty());

    let missing = decide_application(storage.as_ref(), &notifier, 999, DecisionAction::Reject)
        .await
        .unwrap();
    assert!(matches!(missing, DecisionOutcome::NotFound));
}

#[tokio::test]
async fn test_finalize_registration_happens_once() {
    let (_dir, storage) = test_storage().await;
    let class = create_class(storage.as_ref(), "Form 1").await;
    let application = common::submit_application(storage.as_ref(), class.id, "Amina Yusuf").await;
    let reg_no = application.registration_number.clone();

    let pending = finalize_registration(
        storage.as_ref(),
        registration(&reg_no, "amina@family.example"),
    )
    .await
    .unwrap();
    assert!(matches!(pending, RegistrationOutcome::NotApproved));

    decide_application(
        storage.as_ref(),
        &RecordingNotifier::default(),
        application.id,
        DecisionAction::Approve,
    )
    .await
    .unwrap();

    let first = finalize_registration(
        storage.as_ref(),
        registration(&reg_no, "amina@family.example"),
    )
    .await
    .unwrap();
    let RegistrationOutcome::Registered(student) = first else {
        panic!("first registration failed: {first:?}");
    };
    assert_eq!(student.registration_number, reg_no);
    assert_eq!(student.class_id, Some(class.id));
    assert_ne!(student.password_hash, PASSWORD);

    let second = finalize_registration(
        storage.as_ref(),
        registration(&reg_no, "someone.else@family.example"),
    )
    .await
    .unwrap();
    assert!(matches!(second, RegistrationOutcome::AlreadyRegistered));
    assert_eq!(storage.count_students().await.unwrap(), 1);

    // 已注册的申请不能再被审核
    let decided = decide_application(
        storage.as_ref(),
        &RecordingNotifier::default(),
        application.id,
        DecisionAction::Reject,
    )
    .await
    .unwrap();
    assert!(matches!(decided, DecisionOutcome::AlreadyRegistered));
}

#[tokio::test]
async fn test_finalize_with_taken_email_keeps_application_open() {
    let (_dir, storage) = test_storage().await;
    let class = create_class(storage.as_ref(), "Form 1").await;
    let existing = enroll_student(storage.as_ref(), class.id, "Amina Yusuf").await;
    let application = common::submit_application(storage.as_ref(), class.id, "Brian Otieno").await;
    storage
        .update_application_status(application.id, AdmissionStatus::Approved)
        .await
        .unwrap();

    let taken = finalize_registration(
        storage.as_ref(),
        registration(&application.registration_number, &existing.email),
    )
    .await;
    assert!(matches!(taken, Err(PortalError::Conflict(_))), "{taken:?}");

    // 邮箱冲突时对申请的占用随事务一起回滚
    let stored = storage
        .get_application_by_id(application.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.is_registered);
    assert_eq!(storage.count_students().await.unwrap(), 1);

    let retry = finalize_registration(
        storage.as_ref(),
        registration(&application.registration_number, "brian.o@family.example"),
    )
    .await
    .unwrap();
    assert!(matches!(retry, RegistrationOutcome::Registered(_)));
    assert_eq!(storage.count_students().await.unwrap(), 2);
}

#[tokio::test]
async fn test_finalize_unknown_registration_number() {
    let (_dir, storage) = test_storage().await;

    let outcome = finalize_registration(
        storage.as_ref(),
        registration("VSS2025-0404", "ghost@family.example"),
    )
    .await
    .unwrap();
    assert!(matches!(outcome, RegistrationOutcome::ApplicationNotFound));
}

#[tokio::test]
async fn test_admissions_report_counts_by_status() {
    let (_dir, storage) = test_storage().await;
    let form_one = create_class(storage.as_ref(), "Form 1").await;
    let form_two = create_class(storage.as_ref(), "Form 2").await;

    enroll_student(storage.as_ref(), form_one.id, "Amina Yusuf").await;
    let rejected = common::submit_application(storage.as_ref(), form_one.id, "Brian Otieno").await;
    storage
        .update_application_status(rejected.id, AdmissionStatus::Rejected)
        .await
        .unwrap();
    common::submit_application(storage.as_ref(), form_two.id, "Chao Wei").await;

    let report = admissions_report(storage.as_ref()).await.unwrap();
    assert_eq!(report.summary.total, 3);
    assert_eq!(report.summary.pending, 1);
    assert_eq!(report.summary.approved, 1);
    assert_eq!(report.summary.rejected, 1);
    assert_eq!(report.summary.registered, 1);

    let form_one_counts = report
        .by_class
        .iter()
        .find(|row| row.class_id == Some(form_one.id))
        .expect("form one row");
    assert_eq!(form_one_counts.counts.total, 2);
    assert_eq!(form_one_counts.class_name.as_deref(), Some("Form 1"));
}
