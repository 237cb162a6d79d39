use std::sync::Arc;

use crate::error::Result;
use crate::model::Identity;
use crate::store::AccountStore;
use crate::token::TokenService;

/// Cookie the session token travels in
pub const AUTH_COOKIE_NAME: &str = "hotproperties_jwt";

/// A cookie directive for the web layer to apply. Pure data: the core does
/// not speak HTTP, it only says what the client-held token should become.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: &'static str,
    pub value: String,
    pub max_age_secs: i64,
    pub secure: bool,
}

impl SessionCookie {
    /// Render as a `Set-Cookie` header value
    pub fn header_value(&self) -> String {
        let mut header = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly",
            self.name, self.value, self.max_age_secs
        );
        if self.secure {
            header.push_str("; Secure");
        }
        header
    }
}

/// Translates an inbound token into an authenticated identity, and hands
/// out the cookie directives for issuing and clearing sessions.
///
/// Every verification failure degrades to anonymous: the boundary's job is
/// to yield "no identity", never to fail the request.
#[derive(Clone)]
pub struct SessionBoundary {
    tokens: TokenService,
    store: Arc<dyn AccountStore>,
    secure_cookies: bool,
}

impl SessionBoundary {
    pub fn new(tokens: TokenService, store: Arc<dyn AccountStore>, secure_cookies: bool) -> Self {
        Self {
            tokens,
            store,
            secure_cookies,
        }
    }

    /// Verify a token and re-resolve its subject against the store.
    pub async fn resolve(&self, token: &str) -> Option<Identity> {
        let claims = match self.tokens.verify(token) {
            Ok(claims) => claims,
            Err(kind) => {
                tracing::warn!(%kind, "rejected session token");
                return None;
            }
        };

        match self.store.find_by_email(&claims.sub).await {
            Ok(Some(account)) => Some(Identity::from(&account)),
            Ok(None) => {
                tracing::warn!(subject = %claims.sub, "session subject no longer exists");
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "store lookup failed during session resolution");
                None
            }
        }
    }

    /// Sign a token for the identity and wrap it in the session cookie.
    pub fn issue(&self, identity: &Identity) -> Result<SessionCookie> {
        let token = self.tokens.sign(&identity.email)?;
        Ok(SessionCookie {
            name: AUTH_COOKIE_NAME,
            value: token,
            max_age_secs: self.tokens.ttl_seconds(),
            secure: self.secure_cookies,
        })
    }

    /// The directive that expires the client-held token immediately.
    pub fn clear(&self) -> SessionCookie {
        SessionCookie {
            name: AUTH_COOKIE_NAME,
            value: String::new(),
            max_age_secs: 0,
            secure: self.secure_cookies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Account, Role};
    use crate::password::hash_password;
    use crate::store::MemoryAccountStore;

    const DAY_MS: i64 = 86_400_000;

    async fn boundary_with_account(email: &str) -> SessionBoundary {
        let store = Arc::new(MemoryAccountStore::new());
        let hash = hash_password("secret").unwrap();
        store
            .save(Account::new(
                "A".to_string(),
                "B".to_string(),
                email.to_string(),
                hash,
                Role::Buyer,
            ))
            .await
            .unwrap();

        let tokens = TokenService::new("test_secret", DAY_MS).unwrap();
        SessionBoundary::new(tokens, store, false)
    }

    #[tokio::test]
    async fn test_issue_then_resolve() {
        let boundary = boundary_with_account("a@x.com").await;
        let identity = Identity {
            email: "a@x.com".to_string(),
            role: Role::Buyer,
        };

        let cookie = boundary.issue(&identity).unwrap();
        assert_eq!(cookie.name, AUTH_COOKIE_NAME);
        assert_eq!(cookie.max_age_secs, DAY_MS / 1000);

        let resolved = boundary.resolve(&cookie.value).await.unwrap();
        assert_eq!(resolved, identity);
    }

    #[tokio::test]
    async fn test_bad_tokens_degrade_to_anonymous() {
        let boundary = boundary_with_account("a@x.com").await;

        assert!(boundary.resolve("garbage").await.is_none());
        assert!(boundary.resolve("").await.is_none());

        // Valid shape, wrong key
        let other = TokenService::new("other_secret", DAY_MS).unwrap();
        let forged = other.sign("a@x.com").unwrap();
        assert!(boundary.resolve(&forged).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_subject_degrades_to_anonymous() {
        let boundary = boundary_with_account("a@x.com").await;

        let tokens = TokenService::new("test_secret", DAY_MS).unwrap();
        let token = tokens.sign("deleted@x.com").unwrap();
        assert!(boundary.resolve(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_clear_expires_cookie() {
        let boundary = boundary_with_account("a@x.com").await;

        let cookie = boundary.clear();
        assert!(cookie.value.is_empty());
        assert_eq!(cookie.max_age_secs, 0);
        assert_eq!(
            cookie.header_value(),
            "hotproperties_jwt=; Path=/; Max-Age=0; HttpOnly"
        );
    }

    #[test]
    fn test_secure_flag_rendering() {
        let cookie = SessionCookie {
            name: AUTH_COOKIE_NAME,
            value: "tok".to_string(),
            max_age_secs: 60,
            secure: true,
        };
        assert_eq!(
            cookie.header_value(),
            "hotproperties_jwt=tok; Path=/; Max-Age=60; HttpOnly; Secure"
        );
    }
}
