use auth::{hash_password, Account, AccountStore, Role};

const DEFAULT_ADMIN_EMAIL: &str = "admin@hotproperties.local";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Create the first admin account when none exists. create_admin requires an
/// existing admin caller, so this is the only way the first one enters the
/// system.
pub async fn seed_admin(store: &dyn AccountStore) -> anyhow::Result<()> {
    if store.exists_by_email(DEFAULT_ADMIN_EMAIL).await? {
        tracing::info!("Admin account already exists");
        return Ok(());
    }

    let password_hash = hash_password(DEFAULT_ADMIN_PASSWORD)?;
    let admin = Account::new(
        "Default".to_string(),
        "Admin".to_string(),
        DEFAULT_ADMIN_EMAIL.to_string(),
        password_hash,
        Role::Admin,
    );
    store.save(admin).await?;

    tracing::info!("Created default admin account: {}", DEFAULT_ADMIN_EMAIL);
    tracing::warn!(
        "Default admin password is '{}'. Change it in production!",
        DEFAULT_ADMIN_PASSWORD
    );

    Ok(())
}
