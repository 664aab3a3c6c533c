mod common;

use common::*;
use school_portal::cache::object_cache::moka::MokaCacheWrapper;
use school_portal::models::applications::responses::NotificationStatus;
use school_portal::models::auth::entities::PrincipalKind;
use school_portal::models::auth::requests::{PasswordReset, PasswordResetLookup};
use school_portal::models::teachers::entities::NewTeacher;
use school_portal::services::auth::login::authenticate;
use school_portal::services::auth::password_reset::{
    ResetRequestOutcome, request_password_reset, reset_password,
};
use school_portal::storage::Storage;

#[tokio::test]
async fn test_student_login_is_case_insensitive_on_registration_number() {
    let (_dir, storage) = test_storage().await;
    let class = create_class(storage.as_ref(), "Form 1").await;
    let student = enroll_student(storage.as_ref(), class.id, "Amina Yusuf").await;

    let principal = authenticate(
        storage.as_ref(),
        PrincipalKind::Student,
        &student.registration_number.to_lowercase(),
        PASSWORD,
    )
    .await
    .unwrap()
    .expect("valid credentials");
    assert_eq!(principal.kind, PrincipalKind::Student);
    assert_eq!(principal.id, student.id);

    let wrong = authenticate(
        storage.as_ref(),
        PrincipalKind::Student,
        &student.registration_number,
        "not-the-password",
    )
    .await
    .unwrap();
    assert!(wrong.is_none());

    let refreshed = storage.get_student_by_id(student.id).await.unwrap().unwrap();
    assert!(refreshed.last_login.is_some());
}

#[tokio::test]
async fn test_unknown_account_and_wrong_kind_fail_alike() {
    let (_dir, storage) = test_storage().await;
    let teacher = create_teacher(storage.as_ref(), "T2001").await;

    let as_student = authenticate(
        storage.as_ref(),
        PrincipalKind::Student,
        &teacher.national_id,
        PASSWORD,
    )
    .await
    .unwrap();
    assert!(as_student.is_none());

    let as_teacher = authenticate(storage.as_ref(), PrincipalKind::Teacher, "T2001", PASSWORD)
        .await
        .unwrap();
    assert_eq!(as_teacher.map(|p| p.id), Some(teacher.id));
}

#[tokio::test]
async fn test_legacy_plaintext_password_is_upgraded_on_login() {
    let (_dir, storage) = test_storage().await;
    let teacher = storage
        .create_teacher(NewTeacher {
            national_id: "T3001".to_string(),
            full_name: "Legacy Teacher".to_string(),
            email: "legacy@school.example".to_string(),
            password_hash: "plain-secret".to_string(),
        })
        .await
        .unwrap();

    let principal = authenticate(storage.as_ref(), PrincipalKind::Teacher, "T3001", "plain-secret")
        .await
        .unwrap();
    assert_eq!(principal.map(|p| p.id), Some(teacher.id));

    let stored = storage
        .get_teacher_by_national_id("T3001")
        .await
        .unwrap()
        .unwrap();
    assert!(stored.password_hash.starts_with("$argon2"));

    // 升级后仍可用同一密码登录
    let again = authenticate(storage.as_ref(), PrincipalKind::Teacher, "T3001", "plain-secret")
        .await
        .unwrap();
    assert!(again.is_some());
}

#[tokio::test]
async fn test_password_reset_token_is_single_use() {
    let (_dir, storage) = test_storage().await;
    let cache = MokaCacheWrapper::with_settings(1_000, 300);
    let notifier = RecordingNotifier::default();
    let class = create_class(storage.as_ref(), "Form 1").await;
    let student = enroll_student(storage.as_ref(), class.id, "Amina Yusuf").await;

    let outcome = request_password_reset(
        storage.as_ref(),
        &cache,
        &notifier,
        PasswordResetLookup {
            registration_number: student.registration_number.to_lowercase(),
            email: student.email.to_uppercase(),
        },
    )
    .await
    .unwrap();
    assert_eq!(
        outcome,
        ResetRequestOutcome::Issued(NotificationStatus::Delivered)
    );

    let token = {
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let body = &sent[0].body;
        let start = body.find("token=").expect("reset link in body") + "token=".len();
        body[start..]
            .split_whitespace()
            .next()
            .expect("token value")
            .to_string()
    };

    let new_password = "N3wPassw0rdXyz";
    let reset = |token: &str| PasswordReset {
        token: token.to_string(),
        new_password: new_password.to_string(),
    };
    assert!(reset_password(storage.as_ref(), &cache, reset(&token)).await.unwrap());
    assert!(!reset_password(storage.as_ref(), &cache, reset(&token)).await.unwrap());

    let old = authenticate(
        storage.as_ref(),
        PrincipalKind::Student,
        &student.registration_number,
        PASSWORD,
    )
    .await
    .unwrap();
    assert!(old.is_none());
    let new = authenticate(
        storage.as_ref(),
        PrincipalKind::Student,
        &student.registration_number,
        new_password,
    )
    .await
    .unwrap();
    assert!(new.is_some());
}

#[tokio::test]
async fn test_password_reset_requires_matching_email() {
    let (_dir, storage) = test_storage().await;
    let cache = MokaCacheWrapper::with_settings(1_000, 300);
    let notifier = RecordingNotifier::default();
    let class = create_class(storage.as_ref(), "Form 1").await;
    let student = enroll_student(storage.as_ref(), class.id, "Amina Yusuf").await;

    let outcome = request_password_reset(
        storage.as_ref(),
        &cache,
        &notifier,
        PasswordResetLookup {
            registration_number: student.registration_number.clone(),
            email: "someone@else.example".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(outcome, ResetRequestOutcome::NoMatch);
    assert!(notifier.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_password_reset_survives_notifier_failure() {
    let (_dir, storage) = test_storage().await;
    let cache = MokaCacheWrapper::with_settings(1_000, 300);
    let class = create_class(storage.as_ref(), "Form 1").await;
    let student = enroll_student(storage.as_ref(), class.id, "Amina Yusuf").await;

    let outcome = request_password_reset(
        storage.as_ref(),
        &cache,
        &FailingNotifier,
        PasswordResetLookup {
            registration_number: student.registration_number.clone(),
            email: student.email.clone(),
        },
    )
    .await
    .unwrap();
    match outcome {
        ResetRequestOutcome::Issued(status) => assert!(status.is_degraded()),
        ResetRequestOutcome::NoMatch => panic!("student should match"),
    }
}
