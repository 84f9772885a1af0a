use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use std::sync::OnceLock;
use thiserror::Error;

/// Error taxonomy for the whole API surface.
///
/// Every handler returns `Result<HttpResponse, ApiError>`; the
/// `ResponseError` impl turns each variant into the JSON shape the frontend
/// expects (`{"error": "..."}`). Database failures are logged server-side
/// and their detail is only exposed to clients in development mode.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing/malformed required field, bad enum value, unparsable date.
    #[error("{0}")]
    Validation(String),
    /// Missing or invalid credentials/token, or a deactivated account.
    #[error("{0}")]
    Unauthorized(String),
    /// Caller lacks the required role or does not own the resource.
    #[error("{0}")]
    Forbidden(String),
    /// Referenced request/proposal/user/category does not exist.
    #[error("{0}")]
    NotFound(String),
    /// State-machine precondition violated: request not open, proposal not
    /// pending, duplicate proposal/evaluation, accepted proposal blocking
    /// deletion.
    #[error("{0}")]
    Conflict(String),
    /// Storage failure or any other unexpected error.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Database(e) => {
                tracing::error!("database error: {e}");
                HttpResponse::InternalServerError()
                    .json(internal_error_body(&e.to_string(), details_enabled()))
            }
            other => HttpResponse::build(other.status_code()).json(serde_json::json!({
                "error": other.to_string(),
            })),
        }
    }
}

/// Body for 500 responses. The raw detail is attached only when the server
/// runs in development mode; production clients get the generic message.
pub fn internal_error_body(detail: &str, include_details: bool) -> serde_json::Value {
    if include_details {
        serde_json::json!({
            "error": "internal server error",
            "details": detail,
        })
    } else {
        serde_json::json!({
            "error": "internal server error",
        })
    }
}

/// Whether 500 responses may carry internal detail. Anything other than
/// `APP_ENV=production` counts as development.
fn details_enabled() -> bool {
    static DEV: OnceLock<bool> = OnceLock::new();
    *DEV.get_or_init(|| {
        std::env::var("APP_ENV")
            .map(|v| v != "production")
            .unwrap_or(true)
    })
}
