use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{AuthError, Result};

/// Why a session token was rejected. All kinds are logged differently but
/// every one of them reads as "unauthenticated" to the caller.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid token signature")]
    InvalidSignature,

    #[error("malformed token")]
    Malformed,

    #[error("token expired")]
    Expired,

    #[error("unsupported token algorithm")]
    Unsupported,
}

/// Claims carried by a session token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (the account's email)
    pub sub: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration time (unix seconds)
    pub exp: i64,
}

/// Signs and verifies compact session tokens (HS512 JWTs).
///
/// Stateless by design: validity is wholly determined by signature and
/// expiry, there is no revocation list.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_ms: i64,
}

impl TokenService {
    /// Create a token service from the shared signing secret and a TTL in
    /// milliseconds. An absent or blank secret is a configuration error and
    /// must abort startup.
    pub fn new(secret: &str, ttl_ms: i64) -> Result<Self> {
        if secret.trim().is_empty() {
            return Err(AuthError::ConfigError(
                "signing secret must not be empty".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_ms,
        })
    }

    /// Token lifetime in whole seconds, for cookie Max-Age
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_ms / 1000
    }

    /// Produce a signed token for the given subject with
    /// exp = iat + TTL
    pub fn sign(&self, subject: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::milliseconds(self.ttl_ms)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS512), &claims, &self.encoding_key)
            .map_err(|e| AuthError::ConfigError(format!("token signing failed: {}", e)))
    }

    /// Recompute and check the MAC, then check expiry against the current
    /// time. Failure kinds are distinguishable so callers can log them
    /// differently.
    pub fn verify(&self, token: &str) -> std::result::Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS512);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidAlgorithm
                    | ErrorKind::InvalidAlgorithmName
                    | ErrorKind::MissingAlgorithm => TokenError::Unsupported,
                    _ => TokenError::Malformed,
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: i64 = 86_400_000;

    fn service(secret: &str) -> TokenService {
        TokenService::new(secret, DAY_MS).unwrap()
    }

    #[test]
    fn test_sign_and_verify_round_trip() {
        let tokens = service("test_secret");

        let token = tokens.sign("buyer@example.com").unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.sub, "buyer@example.com");
        assert_eq!(claims.exp, claims.iat + DAY_MS / 1000);
    }

    #[test]
    fn test_empty_secret_is_config_error() {
        assert!(matches!(
            TokenService::new("", DAY_MS),
            Err(AuthError::ConfigError(_))
        ));
        assert!(matches!(
            TokenService::new("   ", DAY_MS),
            Err(AuthError::ConfigError(_))
        ));
    }

    #[test]
    fn test_wrong_secret_is_invalid_signature() {
        let token = service("correct_secret").sign("a@x.com").unwrap();
        let result = service("wrong_secret").verify(&token);

        assert_eq!(result.unwrap_err(), TokenError::InvalidSignature);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let tokens = service("test_secret");

        assert_eq!(tokens.verify("not-a-jwt").unwrap_err(), TokenError::Malformed);
        assert_eq!(tokens.verify("").unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn test_expired_token() {
        // Negative TTL puts exp in the past; verification uses zero leeway
        let tokens = TokenService::new("test_secret", -1000).unwrap();
        let token = tokens.sign("a@x.com").unwrap();

        assert_eq!(tokens.verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_tampered_token_never_yields_subject() {
        let tokens = service("test_secret");
        let token = tokens.sign("a@x.com").unwrap();

        // Flip one character in each of the three segments
        for pos in [5, token.len() / 2, token.len() - 2] {
            let mut bytes = token.clone().into_bytes();
            bytes[pos] = if bytes[pos] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();
            if tampered == token {
                continue;
            }

            let result = tokens.verify(&tampered);
            assert!(matches!(
                result,
                Err(TokenError::InvalidSignature)
                    | Err(TokenError::Malformed)
                    | Err(TokenError::Unsupported)
            ));
        }
    }

    #[test]
    fn test_wrong_algorithm_is_unsupported() {
        let claims = Claims {
            sub: "a@x.com".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"test_secret"),
        )
        .unwrap();

        let result = service("test_secret").verify(&token);
        assert_eq!(result.unwrap_err(), TokenError::Unsupported);
    }
}
