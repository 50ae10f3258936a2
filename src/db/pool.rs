//! Storage handle
//!
//! A single SQLite connection pool is opened at startup and shared by every
//! repository through [`DatabaseHandle`]. Repositories borrow a connection per
//! query; sqlx returns it to the pool on every exit path.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::sync::Arc;

use crate::config::DatabaseConfig;

/// Shared handle passed to repository constructors
pub type DatabaseHandle = Arc<SqliteDatabase>;

/// SQLite connection pool
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open a connection pool.
    ///
    /// Accepts a bare file path, a `sqlite:` URL or `:memory:`. Parent
    /// directories of file databases are created on demand.
    pub async fn new(url: &str) -> Result<Self> {
        let connection_url = connection_url(url)?;

        let pool = SqlitePoolOptions::new()
            .max_connections(16)
            .connect(&connection_url)
            .await
            .with_context(|| format!("Failed to connect to SQLite database: {}", url))?;

        Ok(Self { pool })
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Execute a raw SQL statement that doesn't return rows
    pub async fn execute(&self, query: &str) -> Result<u64> {
        let result = sqlx::query(query)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to execute query: {}", query))?;
        Ok(result.rows_affected())
    }

    /// Check if the database connection is healthy
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("Database ping failed")?;
        Ok(())
    }

    /// Close the connection pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_memory(url: &str) -> bool {
    url == ":memory:" || url.starts_with("sqlite::memory:")
}

fn connection_url(url: &str) -> Result<String> {
    if is_memory(url) {
        return Ok("sqlite::memory:".to_string());
    }

    let path = url.strip_prefix("sqlite://").unwrap_or_else(|| url.trim_start_matches("sqlite:"));
    let path = path.split('?').next().unwrap_or(path);
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory: {:?}", parent))?;
        }
    }

    Ok(if url.contains('?') {
        if url.starts_with("sqlite:") {
            url.to_string()
        } else {
            format!("sqlite:{}", url)
        }
    } else {
        format!("sqlite:{}?mode=rwc", path)
    })
}

/// Create the storage handle described by the configuration
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabaseHandle> {
    let db = SqliteDatabase::new(&config.url).await?;
    Ok(Arc::new(db))
}

/// Create an in-memory storage handle for tests
pub async fn create_test_pool() -> Result<DatabaseHandle> {
    let config = DatabaseConfig {
        url: ":memory:".to_string(),
    };
    create_pool(&config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_url_forms() {
        assert_eq!(connection_url(":memory:").unwrap(), "sqlite::memory:");
        assert_eq!(connection_url("notes.db").unwrap(), "sqlite:notes.db?mode=rwc");
        assert_eq!(connection_url("sqlite:notes.db").unwrap(), "sqlite:notes.db?mode=rwc");
        assert_eq!(
            connection_url("sqlite:notes.db?mode=ro").unwrap(),
            "sqlite:notes.db?mode=ro"
        );
    }

    #[tokio::test]
    async fn test_memory_pool_ping() {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        pool.ping().await.expect("Ping should succeed");
    }

    #[tokio::test]
    async fn test_execute_returns_rows_affected() {
        let pool = create_test_pool().await.expect("Failed to create test pool");

        pool.execute("CREATE TABLE test (id INTEGER PRIMARY KEY, name TEXT)")
            .await
            .expect("Failed to create table");

        let affected = pool
            .execute("INSERT INTO test (name) VALUES ('a'), ('b')")
            .await
            .expect("Failed to insert");
        assert_eq!(affected, 2);
    }

    #[tokio::test]
    async fn test_file_pool_creates_nested_directories() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("nested").join("dir").join("notes.db");

        let config = DatabaseConfig {
            url: db_path.to_string_lossy().to_string(),
        };

        let pool = create_pool(&config).await.expect("Failed to create pool");
        pool.ping().await.expect("Ping should succeed");
        assert!(db_path.exists());

        pool.close().await;
    }
}
