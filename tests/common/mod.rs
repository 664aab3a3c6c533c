#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use school_portal::errors::{PortalError, Result};
use school_portal::models::academics::entities::{Class, Subject, Term};
use school_portal::models::academics::requests::{NewClass, NewSubject, NewTerm};
use school_portal::models::applications::entities::{AdmissionStatus, StudentApplication};
use school_portal::models::applications::requests::NewApplication;
use school_portal::models::students::entities::{NewStudent, RegistrationOutcome, Student};
use school_portal::models::teachers::entities::{NewTeacher, Teacher};
use school_portal::notifier::{Notifier, OutboundMessage};
use school_portal::storage::Storage;
use school_portal::storage::sea_orm_storage::SeaOrmStorage;
use school_portal::utils::password::hash_password;

pub const PREFIX: &str = "VSS2025";
pub const PASSWORD: &str = "Str0ngPassw0rd";

/// 每个测试独占一个临时 SQLite 数据库
pub async fn test_storage() -> (TempDir, Arc<dyn Storage>) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("portal.db").display());
    let storage = SeaOrmStorage::connect(&url)
        .await
        .expect("connect test database");
    (dir, Arc::new(storage))
}

pub async fn create_class(storage: &dyn Storage, name: &str) -> Class {
    storage
        .create_class(NewClass {
            name: name.to_string(),
            academic_year: Some("2025".to_string()),
            section: None,
            advisor_id: None,
            notes: None,
        })
        .await
        .expect("create class")
}

pub async fn create_subject(storage: &dyn Storage, class_id: i64, name: &str) -> Subject {
    storage
        .create_subject(NewSubject {
            name: name.to_string(),
            class_id,
        })
        .await
        .expect("create subject")
}

pub async fn create_term(storage: &dyn Storage, name: &str, active: bool) -> Term {
    storage
        .create_term(NewTerm {
            name: name.to_string(),
            start_date: Some("2025-01-06".to_string()),
            end_date: Some("2025-04-04".to_string()),
            is_active: active,
        })
        .await
        .expect("create term")
}

pub async fn create_teacher(storage: &dyn Storage, national_id: &str) -> Teacher {
    storage
        .create_teacher(NewTeacher {
            national_id: national_id.to_string(),
            full_name: format!("Teacher {national_id}"),
            email: format!("{}@school.example", national_id.to_lowercase()),
            password_hash: hash_password(PASSWORD).expect("hash password"),
        })
        .await
        .expect("create teacher")
}

pub async fn submit_application(
    storage: &dyn Storage,
    class_id: i64,
    name: &str,
) -> StudentApplication {
    storage
        .submit_application(
            NewApplication {
                student_name: name.to_string(),
                email: format!("{}@family.example", name.to_lowercase().replace(' ', ".")),
                applied_class_id: class_id,
                previous_grade_level: "Grade 6".to_string(),
                previous_grade_results: "Maths 80".to_string(),
            },
            PREFIX,
        )
        .await
        .expect("submit application")
}

pub fn new_student(application: &StudentApplication) -> NewStudent {
    let (first, last) = application
        .student_name
        .split_once(' ')
        .unwrap_or((application.student_name.as_str(), "Student"));
    NewStudent {
        registration_number: application.registration_number.clone(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: application.email.clone(),
        password_hash: hash_password(PASSWORD).expect("hash password"),
        date_of_birth: "2011-05-14".to_string(),
        phone_number: "+254700000001".to_string(),
        photo_url: None,
    }
}

/// 走完申请、批准、注册三步，得到一个在读学生
pub async fn enroll_student(storage: &dyn Storage, class_id: i64, name: &str) -> Student {
    let application = submit_application(storage, class_id, name).await;
    storage
        .update_application_status(application.id, AdmissionStatus::Approved)
        .await
        .expect("approve application")
        .expect("application exists");
    match storage
        .finalize_registration(new_student(&application))
        .await
        .expect("finalize registration")
    {
        RegistrationOutcome::Registered(student) => student,
        other => panic!("unexpected registration outcome: {other:?}"),
    }
}

/// 记录所有发出的消息
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<OutboundMessage>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: OutboundMessage) -> Result<()> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

/// 总是投递失败
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _message: OutboundMessage) -> Result<()> {
        Err(PortalError::notification("mail relay unavailable"))
    }
}
