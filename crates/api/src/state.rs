use auth::{AccountService, SessionBoundary};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub sessions: SessionBoundary,
}

impl AppState {
    pub fn new(accounts: AccountService, sessions: SessionBoundary) -> Self {
        Self { accounts, sessions }
    }
}
