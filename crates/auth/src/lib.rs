// Core modules
mod error;
mod password;
mod token;

// Domain modules
pub mod model;
pub mod service;
pub mod session;
pub mod store;

// Re-export error types
pub use error::{AuthError, Result};

// Re-export crypto primitives (for standalone use)
pub use password::{hash_password, unmatchable_hash, verify_password};
pub use token::{Claims, TokenError, TokenService};

// Re-export domain types
pub use model::{Account, Identity, Registration, Role};
pub use service::AccountService;
pub use session::{SessionBoundary, SessionCookie, AUTH_COOKIE_NAME};
pub use store::{AccountStore, MemoryAccountStore, StoreError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Account, AccountService, AccountStore, AuthError, Identity, Registration, Result, Role,
        SessionBoundary, TokenService,
    };
}
