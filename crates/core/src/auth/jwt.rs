//! HS256 access-token generation and validation.
//!
//! Tokens carry the user's database id and role so handlers can authorize
//! without a user lookup on every request. Expiry is validated by the
//! jsonwebtoken default validation.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::DbId;

/// Default access-token lifetime in minutes.
///
/// Both services share this policy; override with `JWT_EXPIRY_MINS`.
const DEFAULT_EXPIRY_MINS: i64 = 60;

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's database id.
    pub sub: DbId,
    /// Role name (`"user"` or `"admin"`).
    pub role: String,
    /// Expiration, UTC Unix seconds.
    pub exp: i64,
    /// Issued-at, UTC Unix seconds.
    pub iat: i64,
    /// Unique token id (UUID v4), useful for audit logs.
    pub jti: String,
}

/// Signing secret and token lifetime.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_mins: i64,
}

impl JwtConfig {
    /// Load from the environment: `JWT_SECRET` (required, non-empty) and
    /// `JWT_EXPIRY_MINS` (optional, default 60).
    ///
    /// # Panics
    ///
    /// Panics when `JWT_SECRET` is missing or empty; a service without a
    /// signing key must not start.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let expiry_mins: i64 = std::env::var("JWT_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            expiry_mins,
        }
    }
}

/// Sign a new access token for the given user id and role.
pub fn issue_token(user_id: DbId, role: &str, config: &JwtConfig) -> Result<String, CoreError> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: now + config.expiry_mins * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| CoreError::Internal(format!("token signing failed: {e}")))
}

/// Verify signature and expiry, returning the embedded [`Claims`].
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, CoreError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| CoreError::unauthorized("Invalid or expired token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "a-test-secret-long-enough-for-hmac".into(),
            expiry_mins: 60,
        }
    }

    #[test]
    fn issued_tokens_verify_and_carry_claims() {
        let token = issue_token(7, "admin", &config()).unwrap();
        let claims = verify_token(&token, &config()).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, "admin");
        assert!(claims.exp - claims.iat == 60 * 60);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let now = chrono::Utc::now().timestamp();
        // Expired well past the default 60-second leeway.
        let claims = Claims {
            sub: 1,
            role: "user".into(),
            exp: now - 600,
            iat: now - 1200,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config().secret.as_bytes()),
        )
        .unwrap();

        assert!(verify_token(&token, &config()).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(1, "user", &config()).unwrap();
        let other = JwtConfig {
            secret: "a-different-secret-entirely".into(),
            expiry_mins: 60,
        };
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn tampered_tokens_are_rejected() {
        let mut token = issue_token(1, "user", &config()).unwrap();
        token.push('x');
        assert!(verify_token(&token, &config()).is_err());
    }
}
