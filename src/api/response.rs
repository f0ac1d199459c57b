/*!
 * Response Conversions
 * Handler outcomes to HTTP responses
 */

use crate::core::errors::{ApiError, SerializableError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// 200 with an empty body
pub fn ok() -> Response {
    StatusCode::OK.into_response()
}

/// 204, used when a process was not admitted
pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// 200 with a JSON body
pub fn json<T: Serialize>(value: T) -> Response {
    Json(value).into_response()
}

/// JSON error body `{ "error_type", "message" }` with the given status
pub fn error(status: StatusCode, err: impl Into<SerializableError>) -> Response {
    (status, Json(err.into())).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error(StatusCode::BAD_REQUEST, self)
    }
}
