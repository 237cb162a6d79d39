mod seed;

use std::sync::Arc;

use anyhow::Context;
use api::{router, AppState};
use auth::{AccountService, MemoryAccountStore, SessionBoundary, TokenService};
use shared::AppConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // An empty signing secret is fatal here, not per-request
    let tokens = TokenService::new(&config.auth.jwt_secret, config.auth.token_ttl_ms)
        .context("token service configuration")?;

    let store = Arc::new(MemoryAccountStore::new());
    let accounts = AccountService::new(store.clone());
    let sessions = SessionBoundary::new(tokens, store.clone(), config.auth.secure_cookies);

    seed::seed_admin(store.as_ref()).await?;

    let state = Arc::new(AppState::new(accounts, sessions));
    let app = router::router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
