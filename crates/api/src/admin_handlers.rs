use axum::{extract::State, Json};
use std::sync::Arc;

use crate::auth_handlers::AuthResponse;
use crate::error::ApiError;
use crate::middleware::CurrentIdentity;
use crate::AppState;
use auth::Registration;

pub async fn create_agent(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
    Json(payload): Json<Registration>,
) -> Result<Json<AuthResponse>, ApiError> {
    let requester = state.accounts.load_by_email(&identity.email).await?;
    let agent = state.accounts.create_agent(payload, &requester).await?;

    Ok(Json(AuthResponse::for_account(
        "Agent created successfully",
        &agent,
    )))
}

pub async fn create_admin(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
    Json(payload): Json<Registration>,
) -> Result<Json<AuthResponse>, ApiError> {
    let requester = state.accounts.load_by_email(&identity.email).await?;
    let admin = state.accounts.create_admin(payload, &requester).await?;

    Ok(Json(AuthResponse::for_account(
        "Admin created successfully",
        &admin,
    )))
}
