use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

use finetune::UpstreamError;

/// Error body for errors the proxy itself produces. Upstream rejections are
/// relayed with their original payload instead and do not take this shape.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
}

pub struct ErrorResponse {
    status: StatusCode,
    payload: Value,
}

impl ErrorResponse {
    fn with_message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            payload: json!({ "message": message.into() }),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<UpstreamError> for ErrorResponse {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Config(detail) => {
                tracing::error!(%detail, "upstream configuration error");
                Self::with_message(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error",
                )
            }
            // Relayed intact so callers can react to e.g. rate limiting.
            UpstreamError::Upstream { status, payload } => Self {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                payload,
            },
            UpstreamError::InvalidShape(detail) => {
                tracing::warn!(%detail, "rejecting unrecognized upstream payload");
                Self::with_message(
                    StatusCode::BAD_GATEWAY,
                    "Upstream service returned an unexpected response",
                )
            }
            UpstreamError::Validation(validation) => {
                Self::with_message(StatusCode::BAD_REQUEST, validation.to_string())
            }
            UpstreamError::Http(e) => {
                tracing::error!(error = %e, "upstream request failed");
                Self::with_message(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.payload)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_rejection_keeps_status_and_payload() {
        let response = ErrorResponse::from(UpstreamError::Upstream {
            status: 429,
            payload: json!({"error": "Rate limit"}),
        });
        assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.payload, json!({"error": "Rate limit"}));
    }

    #[test]
    fn invalid_shape_maps_to_generic_bad_gateway() {
        let response =
            ErrorResponse::from(UpstreamError::InvalidShape("secret detail".to_string()));
        assert_eq!(response.status, StatusCode::BAD_GATEWAY);
        assert!(!response.payload.to_string().contains("secret detail"));
    }

    #[test]
    fn config_error_hides_detail() {
        let response =
            ErrorResponse::from(UpstreamError::Config("Missing FINE_TUNE_API_KEY".to_string()));
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.payload,
            json!({"message": "Server configuration error"})
        );
    }
}
