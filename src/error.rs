use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;
use tracing::error;

/// Everything a request can fail with. All variants are recovered at the
/// request boundary and rendered as a user-visible message; none of them
/// terminate the process.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("Email already registered!")]
    DuplicateEmail,
    #[error("Invalid email or password!")]
    AuthFailure,
    #[error("Please login to continue!")]
    RequiresLogin,
    #[error("{0}")]
    NotFound(String),
    #[error("database error")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::RequiresLogin => return Redirect::to("/login").into_response(),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::DuplicateEmail => {
                (StatusCode::CONFLICT, "Email already registered!".to_string())
            }
            ApiError::AuthFailure => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password!".to_string(),
            ),
            ApiError::Database(e) => {
                error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong! Please try again.".to_string(),
                )
            }
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong! Please try again.".to_string(),
                )
            }
        };
        (status, message).into_response()
    }
}

/// Trimmed, non-empty form field, or a validation error naming it.
pub fn require_field(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::Validation(format!("{field} is required"))),
    }
}
