use askdocs::SessionError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, error};

/// A custom error type for the server application.
///
/// Each variant maps to one HTTP status. Bodies carry a short plain-language
/// message.
#[derive(Debug)]
pub enum AppError {
    /// The requested chat session does not exist (or has ended).
    SessionNotFound,
    /// The request was rejected by the session state machine.
    Session(SessionError),
    /// The turn task failed to complete. Detail is logged, never returned.
    Internal(anyhow::Error),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::Session(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::SessionNotFound => (
                StatusCode::NOT_FOUND,
                "Chat session not found. Please reload the page.".to_string(),
            ),
            AppError::Session(err) => {
                let status = match err {
                    SessionError::EmptyInput => StatusCode::BAD_REQUEST,
                    SessionError::Busy | SessionError::NoPendingTurn => StatusCode::CONFLICT,
                };
                debug!(error = %err, "Rejected chat message.");
                (status, err.to_string())
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
