use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;
use std::sync::OnceLock;

use crate::error::{AuthError, Result};

/// Hash a plaintext password using Argon2 with a random salt
pub fn hash_password(password: &str) -> Result<String> {
    if password.is_empty() {
        return Err(AuthError::InvalidInput(
            "Password is required".to_string(),
        ));
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Verify a plaintext password against a stored hash.
///
/// Returns false on any mismatch, including a stored hash that cannot be
/// parsed: a corrupt record must read as "wrong password", never panic the
/// login path.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// A well-formed hash that matches no caller-supplied credential.
///
/// Verifying against it costs the same Argon2 work as a real check, so
/// lookup paths that miss can burn the same time as paths that hit.
pub fn unmatchable_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| {
        hash_password("unmatchable-timing-equalizer").unwrap_or_default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "my_secure_password";
        let hash = hash_password(password).unwrap();

        assert_ne!(hash, password);
        assert!(verify_password(password, &hash));
        assert!(!verify_password("wrong_password", &hash));
    }

    #[test]
    fn test_different_salts() {
        let password = "same_password";
        let hash1 = hash_password(password).unwrap();
        let hash2 = hash_password(password).unwrap();

        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);

        assert!(verify_password(password, &hash1));
        assert!(verify_password(password, &hash2));
    }

    #[test]
    fn test_empty_password_rejected() {
        let result = hash_password("");
        assert!(matches!(result, Err(AuthError::InvalidInput(_))));
    }

    #[test]
    fn test_garbage_hash_verifies_false() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn test_unmatchable_hash_is_well_formed_and_matches_nothing() {
        let hash = unmatchable_hash();

        // A real PHC string, so verification runs the full Argon2 work
        assert!(PasswordHash::new(hash).is_ok());
        assert!(!verify_password("secret", hash));
        assert!(!verify_password("", hash));

        // Computed once, then reused
        assert_eq!(hash.as_ptr(), unmatchable_hash().as_ptr());
    }
}
