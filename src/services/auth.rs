//! Authentication service
//!
//! Implements credential registration, login and token validation:
//! - Passwords are stored as argon2 hashes
//! - Login issues a stateless session token valid for 24 hours
//! - Validation checks signature, algorithm and expiry
//!
//! Login failures never reveal whether the username exists: an unknown user
//! and a wrong password produce the same error, and both pay for one Argon2
//! verification.

use crate::db::repositories::user::UserRepositoryError;
use crate::db::repositories::UserRepository;
use crate::services::password::{hash_password, verify_password, DUMMY_PASSWORD_HASH};
use crate::services::token::TokenIssuer;
use anyhow::Context;
use std::sync::Arc;

/// Error types for auth service operations
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// User already exists
    #[error("User already exists: {0}")]
    UserExists(String),

    /// Unknown username or wrong password
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Bad signature, wrong algorithm, malformed or expired token
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

type PasswordCheck = fn(&str, &str) -> anyhow::Result<bool>;

/// Auth service for registering users and issuing session tokens
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    tokens: TokenIssuer,
    verify: PasswordCheck,
}

impl AuthService {
    pub fn new(user_repo: Arc<dyn UserRepository>, tokens: TokenIssuer) -> Self {
        Self {
            user_repo,
            tokens,
            verify: verify_password,
        }
    }

    /// Create the users table if needed
    pub async fn ensure_schema(&self) -> Result<(), AuthServiceError> {
        Ok(self.user_repo.ensure_schema().await?)
    }

    /// Register a new user
    ///
    /// # Errors
    ///
    /// - `ValidationError` if username or password is empty
    /// - `UserExists` if the username is already taken
    /// - `InternalError` for hashing or database errors
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AuthServiceError> {
        if username.trim().is_empty() {
            return Err(AuthServiceError::ValidationError(
                "Username is required".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(AuthServiceError::ValidationError(
                "Password is required".to_string(),
            ));
        }

        let password_hash = hash_password(password).context("Failed to hash password")?;

        self.user_repo
            .create(username, &password_hash)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UsernameTaken(name) => {
                    AuthServiceError::UserExists(format!("Username '{}' is already taken", name))
                }
                UserRepositoryError::Storage(e) => AuthServiceError::InternalError(e),
            })?;

        tracing::info!(username, "User registered");
        Ok(())
    }

    /// Check credentials and issue a session token
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` for an unknown user or a wrong password
    /// - `InternalError` for database or signing errors
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthServiceError> {
        let user = self
            .user_repo
            .get_by_username(username)
            .await
            .context("Failed to look up user")?;

        let Some(user) = user else {
            // Burn the same hashing work a real check would
            let _ = (self.verify)(password, DUMMY_PASSWORD_HASH);
            tracing::warn!(username, "Login failed");
            return Err(AuthServiceError::InvalidCredentials);
        };

        let password_valid =
            (self.verify)(password, &user.password_hash).context("Failed to verify password")?;
        if !password_valid {
            tracing::warn!(username, "Login failed");
            return Err(AuthServiceError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(&user.username)
            .map_err(|e| AuthServiceError::InternalError(e.into()))?;

        tracing::info!(username, "User logged in");
        Ok(token)
    }

    /// Validate a session token and return the username it was issued to
    pub fn validate_token(&self, token: &str) -> Result<String, AuthServiceError> {
        self.tokens
            .validate(token)
            .map(|claims| claims.username)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AuthServiceError::InvalidToken
            })
    }
}
