//! Error types for the gateway layer

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;
use whois_lookup_core::LookupError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<LookupError> for ApiError {
    fn from(lookup_error: LookupError) -> Self {
        let status = match lookup_error {
            LookupError::InvalidInput { .. } | LookupError::UpstreamRejected(_) => {
                StatusCode::BAD_REQUEST
            }
            LookupError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            LookupError::NetworkError { .. } | LookupError::UpstreamMalformed { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            error!(
                kind = lookup_error.kind(),
                detail = %lookup_error.detail(),
                "error fetching from whois api"
            );
        } else {
            warn!(
                kind = lookup_error.kind(),
                detail = %lookup_error.detail(),
                "whois lookup rejected"
            );
        }

        Self::new(status, lookup_error.to_string())
    }
}
