use crate::errors::AppError;
use crate::state::AppState;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::FromRequestParts, http::request::Parts, http::StatusCode};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

/// Header the client sends its session token in.
pub const TOKEN_HEADER: &str = "x-auth-token";

const DEFAULT_SECRET: &str = "habit-tracker-dev-secret-not-for-production-1234";
const DEFAULT_TTL_SECS: u64 = 60 * 60 * 24 * 30;

/// Hash a password with Argon2id, returning the PHC-formatted string that
/// embeds salt and parameters.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AppError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("failed to hash password: {err}"),
        })
}

/// Check a password against a stored PHC hash. A malformed hash counts as a
/// non-match rather than an error so login never leaks storage details.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub username: String,
    pub iat: u64,
    pub exp: u64,
}

/// Signing configuration for session tokens (HS256).
#[derive(Clone)]
pub struct TokenKeys {
    secret: String,
    ttl_secs: u64,
}

impl TokenKeys {
    pub fn new(secret: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
        }
    }

    pub fn from_env() -> Self {
        let secret = env::var("APP_JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string());
        let ttl_secs = env::var("APP_TOKEN_TTL_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TTL_SECS);
        Self::new(secret, ttl_secs)
    }

    pub fn issue(&self, user_id: &str, username: &str) -> Result<String, AppError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(AppError::internal)?
            .as_secs();
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(AppError::internal)
    }

    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| AppError::unauthorized("invalid or expired token"))
    }
}

/// Caller identity resolved from the `x-auth-token` header. Every habit and
/// sleep route takes this extractor, so a bad token fails before any store
/// access.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub username: String,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = parts
            .headers
            .get(TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::unauthorized("missing auth token"))?;

        let claims = state.tokens.decode(token)?;
        Ok(AuthUser {
            user_id: claims.sub,
            username: claims.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("correct-horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct-horse", &hash));
        assert!(!verify_password("wrong-horse", &hash));
    }

    #[test]
    fn malformed_hash_is_a_non_match() {
        assert!(!verify_password("anything", "not-a-phc-hash"));
    }

    #[test]
    fn token_roundtrip_carries_identity() {
        let keys = TokenKeys::new("unit-test-secret-0123456789-0123456789", 3600);
        let token = keys.issue("user-1", "ada").unwrap();
        let claims = keys.decode(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.username, "ada");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let keys = TokenKeys::new("unit-test-secret-0123456789-0123456789", 3600);
        let other = TokenKeys::new("a-completely-different-secret-9876543210", 3600);
        let token = other.issue("user-1", "ada").unwrap();
        assert!(keys.decode(&token).is_err());
    }
}
