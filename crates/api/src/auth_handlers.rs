use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::CurrentIdentity;
use crate::AppState;
use auth::{Account, Registration, Role};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl AuthResponse {
    pub fn for_account(message: &str, account: &Account) -> Self {
        Self {
            message: message.to_string(),
            email: Some(account.email.clone()),
            role: Some(account.role),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
            role: account.role,
        }
    }
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Registration>,
) -> Result<impl IntoResponse, ApiError> {
    let account = state.accounts.register_buyer(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::for_account(
            "User registered successfully",
            &account,
        )),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = state
        .accounts
        .authenticate(&payload.email, &payload.password)
        .await?;

    let cookie = state.sessions.issue(&identity)?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie.header_value())],
        Json(AuthResponse {
            message: "Login successful".to_string(),
            email: Some(identity.email),
            role: Some(identity.role),
        }),
    ))
}

pub async fn logout(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cookie = state.sessions.clear();

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie.header_value())],
        Json(AuthResponse {
            message: "Logout successful".to_string(),
            email: None,
            role: None,
        }),
    )
}

/// Current account, resolved from the session cookie
pub async fn me(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state.accounts.load_by_email(&identity.email).await?;
    Ok(Json(AccountResponse::from(account)))
}
