use auth::AuthError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Whether the client may retry the request unchanged
    pub retryable: bool,
}

/// Translates core errors into HTTP responses. Business errors keep their
/// user-facing message; internal kinds are replaced with a generic one.
#[derive(Debug)]
pub struct ApiError(pub AuthError);

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AuthError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AuthError::AlreadyExists(_) | AuthError::Conflict(_) => StatusCode::CONFLICT,
            AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::NotFound(_) => StatusCode::NOT_FOUND,
            AuthError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::ConfigError(_) | AuthError::Hashing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "internal error");
            "internal server error".to_string()
        } else {
            self.0.to_string()
        };

        let body = ErrorResponse {
            error: message,
            retryable: self.0.is_retryable(),
        };

        (status, Json(body)).into_response()
    }
}
