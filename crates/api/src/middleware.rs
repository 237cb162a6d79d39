use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::error::ErrorResponse;
use crate::AppState;
use auth::{Identity, Role, AUTH_COOKIE_NAME};

/// Pull the session token out of the request: the session cookie first,
/// with an Authorization Bearer fallback for non-browser clients.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = token_from_cookie(headers) {
        return Some(token);
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn token_from_cookie(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    for cookie in cookies.split(';') {
        let Some((name, value)) = cookie.trim().split_once('=') else {
            continue;
        };
        if name == AUTH_COOKIE_NAME && !value.is_empty() {
            return Some(value.to_string());
        }
    }
    None
}

fn unauthorized() -> Response {
    let error = ErrorResponse {
        error: "missing or invalid session".to_string(),
        retryable: false,
    };
    (StatusCode::UNAUTHORIZED, Json(error)).into_response()
}

/// Resolve the session cookie into an Identity; anonymous requests are
/// rejected with 401.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let Some(token) = token_from_headers(request.headers()) else {
        return Err(unauthorized());
    };

    let Some(identity) = state.sessions.resolve(&token).await else {
        return Err(unauthorized());
    };

    // Store identity in request extensions for handlers to access
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Like require_auth, but additionally gates on the ADMIN role.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let Some(token) = token_from_headers(request.headers()) else {
        return Err(unauthorized());
    };

    let Some(identity) = state.sessions.resolve(&token).await else {
        return Err(unauthorized());
    };

    if identity.role != Role::Admin {
        let error = ErrorResponse {
            error: "Access denied. Admin role required".to_string(),
            retryable: false,
        };
        return Err((StatusCode::FORBIDDEN, Json(error)).into_response());
    }

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Extractor for the authenticated identity.
/// Use this in handlers that sit behind require_auth or require_admin.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl<S> axum::extract::FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentIdentity)
            .ok_or_else(|| {
                let error = ErrorResponse {
                    error: "User not authenticated".to_string(),
                    retryable: false,
                };
                (StatusCode::UNAUTHORIZED, Json(error))
            })
    }
}
