use actix_web::{http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;

#[derive(Debug, Clone)]
pub enum AppError {
    MissingField(String),
    InvalidFormat(String),
    InvalidDate(String),
    DateRangeReversed,
    NotFound(String),
    Conflict(String),
    StoreFailure(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingField(msg)
            | AppError::InvalidFormat(msg)
            | AppError::InvalidDate(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => write!(f, "{}", msg),
            AppError::DateRangeReversed => write!(f, "Query dates in wrong order."),
            AppError::StoreFailure(msg) => write!(f, "Store failure: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::StoreFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// Single formatting stage for handler-level errors. Validation errors render
/// as `{"error": message}` JSON with their status; store failures are logged
/// and answered with a plain-text 500 that never leaks internals.
pub fn error_response(err: &AppError) -> HttpResponse {
    match err {
        AppError::StoreFailure(msg) => {
            log::error!("❌ Store failure: {}", msg);
            HttpResponse::InternalServerError()
                .content_type("text/plain")
                .body("Internal Server Error")
        }
        other => HttpResponse::build(other.status()).json(json!({ "error": other.to_string() })),
    }
}

/// Accumulated validation errors (the log endpoint can report several at
/// once) render as a JSON array of `{"error": …}` entries. A lone error keeps
/// the single-object shape.
pub fn errors_response(errors: &[AppError]) -> HttpResponse {
    if let Some(failure) = errors
        .iter()
        .find(|e| matches!(e, AppError::StoreFailure(_)))
    {
        return error_response(failure);
    }
    if let [single] = errors {
        return error_response(single);
    }
    let body: Vec<_> = errors
        .iter()
        .map(|e| json!({ "error": e.to_string() }))
        .collect();
    HttpResponse::BadRequest().json(body)
}
