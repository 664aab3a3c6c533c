use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn bad_path_parameter(message: String) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

/// 解析路径参数中的 `id`，只接受正整数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("id") {
            None => Err(bad_path_parameter("Missing path parameter: id".to_string())),
            Some(raw) => match raw.parse::<i64>() {
                Ok(id) if id > 0 => Ok(SafeIDI64(id)),
                _ => Err(bad_path_parameter(format!("Invalid id: {raw}"))),
            },
        };
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_parses_positive_id() {
        let (req, mut payload) = TestRequest::default()
            .param("id", "42")
            .to_http_parts();
        let id = SafeIDI64::from_request(&req, &mut payload).await.unwrap();
        assert_eq!(id, SafeIDI64(42));
    }

    #[actix_web::test]
    async fn test_rejects_non_numeric_and_zero() {
        for raw in ["abc", "0", "-3"] {
            let (req, mut payload) = TestRequest::default().param("id", raw).to_http_parts();
            let err = SafeIDI64::from_request(&req, &mut payload).await.unwrap_err();
            assert_eq!(
                err.as_response_error().status_code(),
                actix_web::http::StatusCode::BAD_REQUEST
            );
        }
    }
}
