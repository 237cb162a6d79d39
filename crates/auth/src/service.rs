use std::sync::Arc;

use crate::error::{AuthError, Result};
use crate::model::{Account, Identity, Registration, Role};
use crate::password::{hash_password, unmatchable_hash, verify_password};
use crate::store::AccountStore;

const MIN_PASSWORD_LEN: usize = 6;

/// Orchestrates registration, role-gated provisioning, and credential
/// authentication over an [`AccountStore`].
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Self-service registration; the new account always gets the BUYER role.
    pub async fn register_buyer(&self, registration: Registration) -> Result<Account> {
        self.create_account(registration, Role::Buyer).await
    }

    /// Provision an agent account. Only admins may do this.
    pub async fn create_agent(
        &self,
        registration: Registration,
        requester: &Account,
    ) -> Result<Account> {
        if !requester.is_admin() {
            return Err(AuthError::Forbidden(
                "Only admins can create agent accounts".to_string(),
            ));
        }
        self.create_account(registration, Role::Agent).await
    }

    /// Provision a further admin account. Only admins may do this.
    pub async fn create_admin(
        &self,
        registration: Registration,
        requester: &Account,
    ) -> Result<Account> {
        if !requester.is_admin() {
            return Err(AuthError::Forbidden(
                "Only admins can create admin accounts".to_string(),
            ));
        }
        self.create_account(registration, Role::Admin).await
    }

    /// Verify credentials and return the caller's identity.
    ///
    /// Unknown email and wrong password fail identically, in kind, message
    /// and hashing work, so that the response cannot be used to enumerate
    /// registered emails.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Identity> {
        let Some(account) = self.store.find_by_email(email).await? else {
            // Burn the same Argon2 work as the password-check path
            let _ = verify_password(password, unmatchable_hash());
            return Err(AuthError::Unauthorized);
        };

        if !verify_password(password, &account.password_hash) {
            return Err(AuthError::Unauthorized);
        }

        Ok(Identity::from(&account))
    }

    pub async fn load_by_id(&self, id: uuid::Uuid) -> Result<Account> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AuthError::NotFound(format!("User not found with id: {}", id)))
    }

    pub async fn load_by_email(&self, email: &str) -> Result<Account> {
        self.store
            .find_by_email(email)
            .await?
            .ok_or_else(|| AuthError::NotFound(format!("User not found with email: {}", email)))
    }

    async fn create_account(&self, registration: Registration, role: Role) -> Result<Account> {
        validate_registration(&registration)?;

        if self.store.exists_by_email(&registration.email).await? {
            return Err(AuthError::AlreadyExists(registration.email));
        }

        let password_hash = hash_password(&registration.password)?;
        let account = Account::new(
            registration.first_name,
            registration.last_name,
            registration.email,
            password_hash,
            role,
        );

        // The store re-checks uniqueness atomically; a concurrent
        // registration that slipped past exists_by_email surfaces as Conflict
        let account = self.store.save(account).await?;
        tracing::info!(email = %account.email, role = %account.role, "account created");
        Ok(account)
    }
}

/// Field validation in a fixed order; the error names the first violated
/// rule.
fn validate_registration(registration: &Registration) -> Result<()> {
    if registration.first_name.trim().is_empty() {
        return Err(AuthError::InvalidInput("First name is required".to_string()));
    }
    if registration.last_name.trim().is_empty() {
        return Err(AuthError::InvalidInput("Last name is required".to_string()));
    }
    if registration.email.trim().is_empty() {
        return Err(AuthError::InvalidInput("Email is required".to_string()));
    }
    if !valid_email(&registration.email) {
        return Err(AuthError::InvalidInput("Invalid email format".to_string()));
    }
    if registration.password.trim().is_empty() {
        return Err(AuthError::InvalidInput("Password is required".to_string()));
    }
    if registration.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::InvalidInput(
            "Password must be at least 6 characters long".to_string(),
        ));
    }
    Ok(())
}

/// local-part@domain: non-empty local part with no whitespace, non-empty
/// domain.
fn valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !local.contains(char::is_whitespace) && !domain.is_empty()
        }
        None => false,
    }
}
