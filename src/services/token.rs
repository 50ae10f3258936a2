//! Session tokens
//!
//! Stateless HS256 JWTs carrying the username and an expiry. Nothing is
//! stored server-side, so a token stays valid until it expires.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::DEFAULT_TOKEN_TTL_HOURS;
use crate::models::Claims;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Token failures
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    /// Bad signature, wrong algorithm or malformed token
    #[error("Invalid token: {0}")]
    Invalid(String),

    /// Only produced when issuing
    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// Signs and verifies session tokens with a process-wide secret
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    /// Issuer with the standard 24 hour lifetime
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, Duration::hours(DEFAULT_TOKEN_TTL_HOURS))
    }

    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        // Only HS256 is accepted; tokens whose header names another
        // algorithm are rejected before the signature is checked.
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Issue a token for `username` expiring one lifetime from now
    pub fn issue(&self, username: &str) -> Result<String, TokenError> {
        self.issue_at(username, Utc::now())
    }

    /// Issue a token as if it had been created at `issued_at`
    pub fn issue_at(&self, username: &str, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            username: username.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify signature, algorithm and expiry, returning the claims
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}
