//! User repository
//!
//! Database operations for users. Usernames are unique at the table level;
//! a duplicate insert surfaces as [`UserRepositoryError::UsernameTaken`].

use crate::db::DatabaseHandle;
use crate::models::User;
use anyhow::Context;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL
    )
"#;

/// Errors from user table access
#[derive(Debug, thiserror::Error)]
pub enum UserRepositoryError {
    /// The unique constraint on `username` rejected the insert
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create the users table if it does not exist
    async fn ensure_schema(&self) -> anyhow::Result<()>;

    /// Insert a user with an already hashed password
    async fn create(&self, username: &str, password_hash: &str) -> Result<(), UserRepositoryError>;

    /// Get user by username
    async fn get_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
}

/// SQLx-based user repository implementation
pub struct SqlxUserRepository {
    db: DatabaseHandle,
}

impl SqlxUserRepository {
    /// Create a new SQLx user repository
    pub fn new(db: DatabaseHandle) -> Self {
        Self { db }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(db: DatabaseHandle) -> Arc<dyn UserRepository> {
        Arc::new(Self::new(db))
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn ensure_schema(&self) -> anyhow::Result<()> {
        self.db
            .execute(CREATE_USERS_TABLE)
            .await
            .context("Failed to create users table")?;
        Ok(())
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<(), UserRepositoryError> {
        create_user(self.db.pool(), username, password_hash).await
    }

    async fn get_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        get_user_by_username(self.db.pool(), username).await
    }
}

async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> Result<(), UserRepositoryError> {
    let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
        .bind(username)
        .bind(password_hash)
        .execute(pool)
        .await;

    match result {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(UserRepositoryError::UsernameTaken(username.to_string()))
        }
        Err(e) => Err(anyhow::Error::new(e).context("Failed to create user").into()),
    }
}

async fn get_user_by_username(pool: &SqlitePool, username: &str) -> anyhow::Result<Option<User>> {
    let row = sqlx::query("SELECT id, username, password FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await
        .context("Failed to get user by username")?;

    row.map(|r| -> anyhow::Result<User> {
        Ok(User {
            id: r.try_get("id")?,
            username: r.try_get("username")?,
            password_hash: r.try_get("password")?,
        })
    })
    .transpose()
}
