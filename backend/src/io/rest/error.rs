//! Translation of domain errors into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;
use tracing::{error, warn};

use crate::domain::error::FarmError;

impl FarmError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FarmError::NotFound { .. } => StatusCode::NOT_FOUND,
            FarmError::Validation(_) => StatusCode::BAD_REQUEST,
            FarmError::Conflict(_) => StatusCode::CONFLICT,
            FarmError::Decode(_)
            | FarmError::CorruptColumn { .. }
            | FarmError::Storage(_)
            | FarmError::Timeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for FarmError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            error!("Request failed: {}", self);
            "internal server error".to_string()
        } else {
            warn!("Request rejected: {}", self);
            self.to_string()
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_status_codes() {
        assert_eq!(FarmError::not_found("animal", "a1").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(FarmError::validation("bad").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(FarmError::Conflict("dup".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(
            FarmError::Timeout(Duration::from_secs(7)).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
