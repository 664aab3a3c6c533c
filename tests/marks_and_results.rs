mod common;

use common::*;
use school_portal::models::marks::entities::MarkEntry;
use school_portal::models::marks::requests::{StudentRef, ValidatedMark};
use school_portal::models::results::responses::ResultsState;
use school_portal::services::marks::record::{MarkRecording, record_mark};
use school_portal::services::results::compute::{ResultsLookup, compute_results};
use school_portal::storage::Storage;

fn entry(student_id: i64, subject_id: i64, term_id: i64, score: f64) -> MarkEntry {
    MarkEntry {
        student_id,
        subject_id,
        term_id,
        teacher_id: None,
        score,
        comment: None,
    }
}

async fn results_for(
    storage: &dyn Storage,
    student_id: i64,
    term_id: Option<i64>,
) -> school_portal::models::results::responses::StudentResults {
    match compute_results(storage, student_id, term_id)
        .await
        .expect("compute results")
    {
        ResultsLookup::Found(results) => *results,
        other => panic!("unexpected lookup: {other:?}"),
    }
}

#[tokio::test]
async fn test_upsert_keeps_single_mark_per_student_subject_term() {
    let (_dir, storage) = test_storage().await;
    let class = create_class(storage.as_ref(), "Form 1").await;
    let subject = create_subject(storage.as_ref(), class.id, "Mathematics").await;
    let term = create_term(storage.as_ref(), "Term 1", true).await;
    let student = enroll_student(storage.as_ref(), class.id, "Amina Yusuf").await;

    let (first, created) = storage
        .upsert_mark(entry(student.id, subject.id, term.id, 55.0))
        .await
        .unwrap();
    assert!(created);

    let (second, created) = storage
        .upsert_mark(entry(student.id, subject.id, term.id, 81.5))
        .await
        .unwrap();
    assert!(!created);
    assert_eq!(second.id, first.id);
    assert_eq!(second.score, 81.5);

    let count = storage
        .count_marks(student.id, subject.id, term.id)
        .await
        .unwrap();
    assert_eq!(count, 1);

    let views = storage
        .list_mark_views(student.id, Some(term.id))
        .await
        .unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].score, 81.5);
    assert_eq!(views[0].grade, "A");
    assert_eq!(views[0].subject_name, "Mathematics");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_upserts_leave_one_mark() {
    let (_dir, storage) = test_storage().await;
    let class = create_class(storage.as_ref(), "Form 1").await;
    let subject = create_subject(storage.as_ref(), class.id, "Mathematics").await;
    let term = create_term(storage.as_ref(), "Term 1", true).await;
    let student = enroll_student(storage.as_ref(), class.id, "Amina Yusuf").await;

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let storage = storage.clone();
            let entry = entry(student.id, subject.id, term.id, 40.0 + i as f64);
            tokio::spawn(async move { storage.upsert_mark(entry).await })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        let (_, was_created) = handle.await.unwrap().expect("concurrent upsert");
        if was_created {
            created += 1;
        }
    }
    assert_eq!(created, 1);
    assert_eq!(
        storage
            .count_marks(student.id, subject.id, term.id)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn test_record_mark_by_registration_number_and_overwrite() {
    let (_dir, storage) = test_storage().await;
    let class = create_class(storage.as_ref(), "Form 1").await;
    let subject = create_subject(storage.as_ref(), class.id, "English").await;
    let term = create_term(storage.as_ref(), "Term 1", true).await;
    let teacher = create_teacher(storage.as_ref(), "T1001").await;
    let student = enroll_student(storage.as_ref(), class.id, "Brian Otieno").await;

    let mark = |score: f64| ValidatedMark {
        student: StudentRef::RegistrationNumber(student.registration_number.to_lowercase()),
        subject_id: subject.id,
        term_id: term.id,
        score,
        comment: Some("Good effort".to_string()),
    };

    let MarkRecording::Recorded(first) =
        record_mark(storage.as_ref(), Some(teacher.id), mark(62.0))
            .await
            .unwrap()
    else {
        panic!("first mark rejected");
    };
    assert!(first.created);
    assert_eq!(first.mark.grade, "C");
    assert_eq!(first.mark.teacher_name.as_deref(), Some("Teacher T1001"));
    assert_eq!(
        first.results_url,
        format!("/api/v1/results?student={}&term={}", student.id, term.id)
    );

    let MarkRecording::Recorded(second) =
        record_mark(storage.as_ref(), Some(teacher.id), mark(70.0))
            .await
            .unwrap()
    else {
        panic!("second mark rejected");
    };
    assert!(!second.created);
    assert_eq!(second.mark.id, first.mark.id);
    assert_eq!(second.mark.grade, "B");
}

#[tokio::test]
async fn test_record_mark_rejects_unknown_references() {
    let (_dir, storage) = test_storage().await;
    let class = create_class(storage.as_ref(), "Form 1").await;
    let term = create_term(storage.as_ref(), "Term 1", true).await;
    let student = enroll_student(storage.as_ref(), class.id, "Chao Wei").await;

    let outcome = record_mark(
        storage.as_ref(),
        None,
        ValidatedMark {
            student: StudentRef::Id(student.id),
            subject_id: 999,
            term_id: term.id,
            score: 50.0,
            comment: None,
        },
    )
    .await
    .unwrap();
    match outcome {
        MarkRecording::Rejected(errors) => assert_eq!(errors[0].field, "subject_id"),
        MarkRecording::Recorded(_) => panic!("mark for unknown subject was recorded"),
    }

    let outcome = record_mark(
        storage.as_ref(),
        None,
        ValidatedMark {
            student: StudentRef::RegistrationNumber("VSS2025-9999".to_string()),
            subject_id: 1,
            term_id: term.id,
            score: 50.0,
            comment: None,
        },
    )
    .await
    .unwrap();
    match outcome {
        MarkRecording::Rejected(errors) => assert_eq!(errors[0].field, "student"),
        MarkRecording::Recorded(_) => panic!("mark for unknown student was recorded"),
    }
}

#[tokio::test]
async fn test_class_ranking_leaves_students_without_marks_unranked() {
    let (_dir, storage) = test_storage().await;
    let class = create_class(storage.as_ref(), "Form 2").await;
    let subject = create_subject(storage.as_ref(), class.id, "Science").await;
    let term = create_term(storage.as_ref(), "Term 1", true).await;

    let first = enroll_student(storage.as_ref(), class.id, "Ada One").await;
    let second = enroll_student(storage.as_ref(), class.id, "Ben Two").await;
    let third = enroll_student(storage.as_ref(), class.id, "Cy Three").await;
    let unmarked = enroll_student(storage.as_ref(), class.id, "Dee Four").await;

    for (student, score) in [(&first, 90.0), (&second, 70.0), (&third, 50.0)] {
        storage
            .upsert_mark(entry(student.id, subject.id, term.id, score))
            .await
            .unwrap();
    }

    let results = results_for(storage.as_ref(), second.id, None).await;
    assert_eq!(results.state, ResultsState::Ready);
    assert_eq!(results.term.as_ref().map(|t| t.id), Some(term.id));
    assert_eq!(results.average, Some(70.0));
    assert_eq!(results.position, Some(2));
    assert_eq!(results.ranked_students, 3);

    let top = results_for(storage.as_ref(), first.id, Some(term.id)).await;
    assert_eq!(top.position, Some(1));

    let results = results_for(storage.as_ref(), unmarked.id, Some(term.id)).await;
    assert_eq!(results.state, ResultsState::Ready);
    assert!(results.marks.is_empty());
    assert_eq!(results.average, None);
    assert_eq!(results.position, None);
    assert_eq!(results.ranked_students, 3);
}

#[tokio::test]
async fn test_average_is_rounded_to_two_decimals() {
    let (_dir, storage) = test_storage().await;
    let class = create_class(storage.as_ref(), "Form 3").await;
    let term = create_term(storage.as_ref(), "Term 2", true).await;
    let student = enroll_student(storage.as_ref(), class.id, "Esi Mensah").await;

    for (name, score) in [("Maths", 70.0), ("English", 66.0), ("History", 64.0)] {
        let subject = create_subject(storage.as_ref(), class.id, name).await;
        storage
            .upsert_mark(entry(student.id, subject.id, term.id, score))
            .await
            .unwrap();
    }

    let results = results_for(storage.as_ref(), student.id, Some(term.id)).await;
    assert_eq!(results.marks.len(), 3);
    assert_eq!(results.average, Some(66.67));
    assert_eq!(results.position, Some(1));
}

#[tokio::test]
async fn test_results_not_ready_without_active_term() {
    let (_dir, storage) = test_storage().await;
    let class = create_class(storage.as_ref(), "Form 1").await;
    create_term(storage.as_ref(), "Inactive term", false).await;
    let student = enroll_student(storage.as_ref(), class.id, "Femi Ade").await;

    let results = results_for(storage.as_ref(), student.id, None).await;
    assert_eq!(results.state, ResultsState::NotReady);
    assert!(results.term.is_none());
    assert_eq!(results.terms.len(), 1);
    assert_eq!(results.position, None);
}

#[tokio::test]
async fn test_results_for_unknown_student_or_term() {
    let (_dir, storage) = test_storage().await;
    let class = create_class(storage.as_ref(), "Form 1").await;
    let student = enroll_student(storage.as_ref(), class.id, "Gita Rao").await;

    assert!(matches!(
        compute_results(storage.as_ref(), 4242, None).await.unwrap(),
        ResultsLookup::StudentNotFound
    ));
    assert!(matches!(
        compute_results(storage.as_ref(), student.id, Some(77))
            .await
            .unwrap(),
        ResultsLookup::TermNotFound
    ));
}
