use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cordon::GuardError;
use serde::Serialize;

/// JSON error envelope for rejected requests
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

/// Why a request never reached the inner service
#[derive(Debug)]
pub enum GuardRejection {
    /// The guard settled on a denial
    Denied,
    /// Guard resolution or evaluation failed
    Failed(GuardError),
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            GuardRejection::Denied => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Request denied by guard".to_string(),
            ),
            GuardRejection::Failed(err) => {
                tracing::error!(error = %err, "Guard evaluation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GUARD_FAILURE",
                    "Authorization check failed".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetails {
                code: code.to_string(),
                message,
            },
        });

        (status, body).into_response()
    }
}
