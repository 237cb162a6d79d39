use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Client data failed validation; the message names the first violated rule.
    #[error("{0}")]
    InvalidInput(String),

    #[error("Email already registered: {0}")]
    AlreadyExists(String),

    #[error("{0}")]
    Forbidden(String),

    /// Bad credentials or a missing/invalid session. The message is generic
    /// on purpose: callers must not be able to tell "no such email" from
    /// "wrong password".
    #[error("invalid email or password")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    /// Missing or unusable configuration. Fatal at startup, never per-request.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Storage-level race on a uniqueness constraint. Callers treat this
    /// exactly like AlreadyExists.
    #[error("storage conflict: {0}")]
    Conflict(String),

    /// Storage connectivity failure. The only class eligible for transient
    /// retry by the caller.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

impl AuthError {
    /// Whether the caller may retry the operation unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AuthError::Unavailable(_))
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) => AuthError::Conflict(msg),
            StoreError::Unavailable(msg) => AuthError::Unavailable(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
