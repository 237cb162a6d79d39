use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{admin_handlers, auth_handlers, middleware as auth_middleware, AppState};

pub fn router(state: Arc<AppState>) -> Router {
    // Public routes (no authentication required). Logout only clears the
    // client-held cookie, so it needs no resolved identity.
    let public_routes = Router::new()
        .route("/", get(|| async { "HotProperties API running" }))
        .route("/api/auth/register", post(auth_handlers::register))
        .route("/api/auth/login", post(auth_handlers::login))
        .route("/api/auth/logout", post(auth_handlers::logout));

    // Routes requiring a resolved identity
    let session_routes = Router::new()
        .route("/api/auth/me", get(auth_handlers::me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_auth,
        ));

    // Admin-only provisioning routes
    let admin_routes = Router::new()
        .route("/api/admin/create-agent", post(admin_handlers::create_agent))
        .route("/api/admin/create-admin", post(admin_handlers::create_admin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_admin,
        ));

    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .merge(admin_routes)
        .with_state(state)
}
