//! Axum HTTP boundary.

pub mod routes;
pub mod server;
pub mod session;

pub use server::{build_router, start_server, AppState};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

use crate::error::GreenroomError;

/// Wrapper that maps crate errors onto HTTP responses.
///
/// `InvalidRequest` is the client's fault (400), `Provider` means the
/// upstream model API let us down (502), anything else is a 500. History
/// failures never reach this type — the cache degrades silently.
pub struct ApiError(GreenroomError);

impl From<GreenroomError> for ApiError {
    fn from(err: GreenroomError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            GreenroomError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GreenroomError::Provider(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!(%status, error = %self.0, "request failed");
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_maps_to_400() {
        let response = ApiError(GreenroomError::InvalidRequest("no file".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_provider_error_maps_to_502() {
        let response = ApiError(GreenroomError::Provider("model down".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_other_errors_map_to_500() {
        let response = ApiError(GreenroomError::Config("bad".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
