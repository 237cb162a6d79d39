use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Account role, assigned at creation and immutable thereafter.
/// Determines provisioning privileges: only admins may create agents or
/// further admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Buyer,
    Agent,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "BUYER",
            Role::Agent => "AGENT",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted user record. The id is assigned by the store on first save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// One-way Argon2 hash; the plaintext is never persisted or logged.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        password_hash: String,
        role: Role,
    ) -> Self {
        Self {
            id: None,
            first_name,
            last_name,
            email,
            password_hash,
            role,
            created_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Inbound registration data, shared by buyer self-registration and
/// admin-driven agent/admin provisioning. Wire form is camelCase
/// ({firstName, lastName, email, password}).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Who is making this request, derived from verified credentials or a
/// verified session token. Carried explicitly through the call chain;
/// there is no ambient "current principal".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub email: String,
    pub role: Role,
}

impl From<&Account> for Identity {
    fn from(account: &Account) -> Self {
        Self {
            email: account.email.clone(),
            role: account.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_display_matches_wire_form() {
        assert_eq!(Role::Buyer.to_string(), "BUYER");
        assert_eq!(Role::Agent.to_string(), "AGENT");
        assert_eq!(Role::Admin.to_string(), "ADMIN");
    }

    #[test]
    fn test_identity_from_account() {
        let account = Account::new(
            "A".to_string(),
            "B".to_string(),
            "a@x.com".to_string(),
            "hash".to_string(),
            Role::Agent,
        );

        let identity = Identity::from(&account);
        assert_eq!(identity.email, "a@x.com");
        assert_eq!(identity.role, Role::Agent);
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let account = Account::new(
            "A".to_string(),
            "B".to_string(),
            "a@x.com".to_string(),
            "super-secret-hash".to_string(),
            Role::Buyer,
        );

        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("super-secret-hash"));
        assert!(!json.contains("password_hash"));
    }
}
