use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use qrgen_derive::api_model;

#[api_model]
/// Error payload returned by every endpoint.
pub struct ErrorBody {
    /// Human-readable failure message
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }

    /// Pairs the payload with `status`; unknown codes degrade to `500`.
    pub fn into_response_with(self, status: u16) -> Response {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
