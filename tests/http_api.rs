mod common;

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, HeaderName, LOCATION};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use common::*;
use school_portal::cache::ObjectCache;
use school_portal::cache::object_cache::moka::MokaCacheWrapper;
use school_portal::config::AppConfig;
use school_portal::models::staff::entities::{NewStaffUser, StaffRole};
use school_portal::notifier::Notifier;
use school_portal::routes::{RateLimits, configure_routes};
use school_portal::storage::Storage;
use school_portal::utils::password::hash_password;
use school_portal::utils::{json_error_handler, query_error_handler};

// 与 main 相同的 app_data 组合，限流器每个应用独立
macro_rules! portal_app {
    ($storage:expr) => {{
        let storage: Arc<dyn Storage> = $storage;
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(1_000, 300));
        let notifier: Arc<dyn Notifier> = Arc::new(RecordingNotifier::default());
        let limits = RateLimits::default();
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(cache))
                .app_data(web::Data::new(notifier))
                .configure(|cfg| configure_routes(cfg, &limits)),
        )
        .await
    }};
}

// 登录并返回会话令牌
macro_rules! login {
    ($app:expr, $kind:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/auth/{}/login", $kind))
            .set_json($body)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{} login failed", $kind);
        let body = body_json(resp).await;
        body["data"]["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }};
}

async fn body_json<B>(resp: ServiceResponse<B>) -> Value
where
    B: actix_web::body::MessageBody,
{
    test::read_body_json(resp).await
}

fn bearer(token: &str) -> (HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {token}"))
}

async fn create_staff(storage: &dyn Storage) {
    storage
        .create_staff_user(NewStaffUser {
            username: "registrar".to_string(),
            email: "registrar@school.example".to_string(),
            password_hash: hash_password(PASSWORD).unwrap(),
            role: StaffRole::Admin,
        })
        .await
        .unwrap();
}

#[actix_web::test]
async fn test_admission_to_results_flow() {
    let (_dir, storage) = test_storage().await;
    let class = create_class(storage.as_ref(), "Form 1").await;
    let subject = create_subject(storage.as_ref(), class.id, "Mathematics").await;
    let term = create_term(storage.as_ref(), "Term 1", true).await;
    create_teacher(storage.as_ref(), "T1001").await;
    create_staff(storage.as_ref()).await;
    let app = portal_app!(storage.clone());

    // 公开提交申请
    let req = test::TestRequest::post()
        .uri("/api/v1/applications")
        .set_json(json!({
            "student_name": "Amina Yusuf",
            "email": "amina@family.example",
            "applied_class_id": class.id,
            "previous_grade_level": "Grade 6",
            "previous_grade_results": "Maths 82"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    let application_id = body["data"]["id"].as_i64().unwrap();
    let reg_no = body["data"]["registration_number"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(reg_no, format!("{PREFIX}-{application_id:04}"));

    // 职员批准
    let staff_token = login!(
        app,
        "staff",
        json!({"username": "registrar", "password": PASSWORD})
    );
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/staff/applications/{application_id}/decision"))
        .insert_header(bearer(&staff_token))
        .set_json(json!({"action": "approve"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["application"]["status"], "approved");
    assert_eq!(body["data"]["notification"]["status"], "delivered");

    // 完成注册，重复提交被拒绝
    let registration = json!({
        "registration_number": reg_no.to_lowercase(),
        "first_name": "Amina",
        "last_name": "Yusuf",
        "email": "amina@family.example",
        "date_of_birth": "2011-05-14",
        "phone_number": "+254700000001",
        "password": PASSWORD,
        "confirm_password": PASSWORD
    });
    let req = test::TestRequest::post()
        .uri("/api/v1/students/register")
        .set_json(registration.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    let student_id = body["data"]["id"].as_i64().unwrap();
    assert!(body["data"].get("password_hash").is_none());

    let req = test::TestRequest::post()
        .uri("/api/v1/students/register")
        .set_json(registration)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // 教师录入成绩：首次 201，覆盖 200
    let teacher_token = login!(
        app,
        "teacher",
        json!({"national_id": "T1001", "password": PASSWORD})
    );
    let expected_location = format!("/api/v1/results?student={student_id}&term={}", term.id);
    for (score, status) in [(json!("58"), StatusCode::CREATED), (json!(72), StatusCode::OK)] {
        let req = test::TestRequest::post()
            .uri("/api/v1/marks")
            .insert_header(bearer(&teacher_token))
            .set_json(json!({
                "registration_number": reg_no,
                "subject_id": subject.id,
                "term_id": term.id,
                "score": score
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), status);
        assert_eq!(
            resp.headers().get(LOCATION).unwrap().to_str().unwrap(),
            expected_location
        );
    }
    assert_eq!(
        storage
            .count_marks(student_id, subject.id, term.id)
            .await
            .unwrap(),
        1
    );

    // 学生查看自己的成绩单
    let student_token = login!(
        app,
        "student",
        json!({"registration_number": reg_no, "password": PASSWORD})
    );
    let req = test::TestRequest::get()
        .uri("/api/v1/results")
        .insert_header(bearer(&student_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["state"], "ready");
    assert_eq!(body["data"]["average"], 72.0);
    assert_eq!(body["data"]["position"], 1);
    assert_eq!(body["data"]["marks"][0]["grade"], "B");

    // 学生不能查看别人的成绩单，也不能录入成绩
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/results?student={}", student_id + 1))
        .insert_header(bearer(&student_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/v1/marks")
        .insert_header(bearer(&student_token))
        .set_json(json!({"student_id": student_id, "subject_id": subject.id, "term_id": term.id, "score": 99}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 教师按 student 参数查看
    let req = test::TestRequest::get()
        .uri(&expected_location)
        .insert_header(bearer(&teacher_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_session_lifecycle() {
    let (_dir, storage) = test_storage().await;
    create_teacher(storage.as_ref(), "T1001").await;
    let app = portal_app!(storage);

    let req = test::TestRequest::get().uri("/api/v1/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let token = login!(
        app,
        "teacher",
        json!({"national_id": "T1001", "password": PASSWORD})
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["principal"]["kind"], "teacher");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_stale_cookie_falls_back_to_bearer_token() {
    let (_dir, storage) = test_storage().await;
    create_teacher(storage.as_ref(), "T1001").await;
    let app = portal_app!(storage);

    let token = login!(
        app,
        "teacher",
        json!({"national_id": "T1001", "password": PASSWORD})
    );
    let cookie_name = AppConfig::get().session.cookie_name.clone();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .cookie(Cookie::new(cookie_name.clone(), "expired-session"))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .cookie(Cookie::new(cookie_name, "expired-session"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_student_views_own_profile() {
    let (_dir, storage) = test_storage().await;
    let class = create_class(storage.as_ref(), "Form 1").await;
    let student = enroll_student(storage.as_ref(), class.id, "Amina Yusuf").await;
    create_teacher(storage.as_ref(), "T1001").await;
    let app = portal_app!(storage);

    let req = test::TestRequest::get()
        .uri("/api/v1/students/me")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let student_token = login!(
        app,
        "student",
        json!({"registration_number": student.registration_number, "password": PASSWORD})
    );
    let req = test::TestRequest::get()
        .uri("/api/v1/students/me")
        .insert_header(bearer(&student_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["student"]["id"], student.id);
    assert_eq!(
        body["data"]["student"]["registration_number"],
        student.registration_number.as_str()
    );
    assert_eq!(body["data"]["student"]["status"], "approved");
    assert!(body["data"]["student"].get("password_hash").is_none());
    assert_eq!(body["data"]["class"]["name"], "Form 1");

    // 教师会话不能访问学生资料
    let teacher_token = login!(
        app,
        "teacher",
        json!({"national_id": "T1001", "password": PASSWORD})
    );
    let req = test::TestRequest::get()
        .uri("/api/v1/students/me")
        .insert_header(bearer(&teacher_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 注册接口仍然公开
    let req = test::TestRequest::post()
        .uri("/api/v1/students/register")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_ne!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_login_failures_are_indistinguishable_and_rate_limited() {
    let (_dir, storage) = test_storage().await;
    create_teacher(storage.as_ref(), "T1001").await;
    let app = portal_app!(storage);

    let attempt = |national_id: &str| {
        test::TestRequest::post()
            .uri("/api/v1/auth/teacher/login")
            .set_json(json!({"national_id": national_id, "password": "wrong-password"}))
            .to_request()
    };

    let unknown = test::call_service(&app, attempt("T9999")).await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown_body = body_json(unknown).await;

    let wrong = test::call_service(&app, attempt("T1001")).await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong_body = body_json(wrong).await;
    assert_eq!(unknown_body["code"], wrong_body["code"]);
    assert_eq!(unknown_body["message"], wrong_body["message"]);

    for _ in 0..3 {
        let resp = test::call_service(&app, attempt("T1001")).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
    let resp = test::call_service(&app, attempt("T1001")).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[actix_web::test]
async fn test_staff_routes_require_staff_principal() {
    let (_dir, storage) = test_storage().await;
    create_teacher(storage.as_ref(), "T1001").await;
    let app = portal_app!(storage);

    let req = test::TestRequest::get()
        .uri("/api/v1/staff/dashboard")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let token = login!(
        app,
        "teacher",
        json!({"national_id": "T1001", "password": PASSWORD})
    );
    let req = test::TestRequest::get()
        .uri("/api/v1/staff/dashboard")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_public_content_and_validation() {
    let (_dir, storage) = test_storage().await;
    create_class(storage.as_ref(), "Form 1").await;
    create_staff(storage.as_ref()).await;
    let app = portal_app!(storage);

    let staff_token = login!(
        app,
        "staff",
        json!({"username": "registrar", "password": PASSWORD})
    );
    let req = test::TestRequest::post()
        .uri("/api/v1/staff/updates")
        .insert_header(bearer(&staff_token))
        .set_json(json!({
            "title": "Sports day",
            "summary": "Friday on the main field",
            "content": "All classes assemble at 9am.",
            "category": "events"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/api/v1/public/updates")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"][0]["title"], "Sports day");

    let req = test::TestRequest::get()
        .uri("/api/v1/public/classes")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"][0]["name"], "Form 1");

    // 缺字段的申请按字段报告
    let req = test::TestRequest::post()
        .uri("/api/v1/applications")
        .set_json(json!({"student_name": "Amina Yusuf"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    let fields: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"applied_class_id"));
}
