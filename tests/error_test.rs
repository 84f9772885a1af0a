///! Tests for the error-to-HTTP mapping and the 500 response body shape.
///!
///! Run with: `cargo test --test error_test`
use actix_web::ResponseError;
use actix_web::http::StatusCode;
use sea_orm::DbErr;

use servihub_backend::errors::{ApiError, internal_error_body};

#[test]
fn test_status_codes_per_variant() {
    let cases = [
        (ApiError::Validation("bad".into()), StatusCode::BAD_REQUEST),
        (ApiError::Unauthorized("no".into()), StatusCode::UNAUTHORIZED),
        (ApiError::Forbidden("no".into()), StatusCode::FORBIDDEN),
        (ApiError::NotFound("gone".into()), StatusCode::NOT_FOUND),
        (ApiError::Conflict("busy".into()), StatusCode::CONFLICT),
        (
            ApiError::Database(DbErr::Custom("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, expected) in cases {
        assert_eq!(error.status_code(), expected, "wrong code for {error:?}");
    }
}

#[test]
fn test_db_errors_convert_via_from() {
    let err: ApiError = DbErr::RecordNotFound("users".to_string()).into();
    assert!(matches!(err, ApiError::Database(_)));
}

#[test]
fn test_display_is_the_client_message() {
    let err = ApiError::Conflict("This request is no longer available".to_string());
    assert_eq!(err.to_string(), "This request is no longer available");
}

#[test]
fn test_internal_error_body_hides_detail_in_production() {
    let body = internal_error_body("connection refused", false);

    assert_eq!(body["error"], "internal server error");
    assert!(body.get("details").is_none());
}

#[test]
fn test_internal_error_body_carries_detail_in_development() {
    let body = internal_error_body("connection refused", true);

    assert_eq!(body["error"], "internal server error");
    assert_eq!(body["details"], "connection refused");
}
