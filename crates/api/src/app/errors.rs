use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use cardbox_core::DomainError;

/// Map a domain error onto the HTTP boundary.
///
/// Conflicts map to 400 (not 409): the wire contract treats a duplicate
/// (suit, rank) pair the same as any other bad request.
pub fn error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, msg),
        DomainError::Conflict(msg) => json_error(StatusCode::BAD_REQUEST, msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "Card not found"),
        DomainError::Store(msg) => {
            tracing::error!(error = %msg, "store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, msg)
        }
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
        })),
    )
        .into_response()
}
