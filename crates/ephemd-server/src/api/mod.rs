//! HTTP API handlers and error mapping.

pub mod meta;
pub mod metrics;
pub mod tasks;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use ephemd_core::error::{ClientCode, EphemdError};

/// Boundary wrapper turning `EphemdError` into an HTTP response carrying
/// the stable client-code vocabulary.
pub struct ApiError(pub EphemdError);

impl From<EphemdError> for ApiError {
    fn from(e: EphemdError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let status = match code {
            ClientCode::NotFound => StatusCode::NOT_FOUND,
            ClientCode::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            ClientCode::BadRequest => StatusCode::BAD_REQUEST,
            ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({
            "error": code.as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
