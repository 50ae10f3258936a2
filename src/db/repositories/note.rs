//! Note repository
//!
//! Table access for notes. Update and delete report the number of matched
//! rows instead of failing when the id does not exist.

use crate::db::DatabaseHandle;
use crate::models::{NewNote, Note};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

const CREATE_NOTES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS notes (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        shortDescription TEXT NOT NULL
    )
"#;

#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Create the notes table if it does not exist
    async fn ensure_schema(&self) -> Result<()>;
    async fn list(&self) -> Result<Vec<Note>>;
    /// Insert a note; the id is assigned by the database and not returned
    async fn create(&self, note: &NewNote) -> Result<()>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Note>>;
    /// Overwrite all text fields, returning the number of rows matched
    async fn update(&self, id: i64, note: &NewNote) -> Result<u64>;
    /// Delete by id, returning the number of rows removed
    async fn delete(&self, id: i64) -> Result<u64>;
}

pub struct SqlxNoteRepository {
    db: DatabaseHandle,
}

impl SqlxNoteRepository {
    pub fn new(db: DatabaseHandle) -> Self {
        Self { db }
    }

    pub fn boxed(db: DatabaseHandle) -> Arc<dyn NoteRepository> {
        Arc::new(Self::new(db))
    }
}

#[async_trait]
impl NoteRepository for SqlxNoteRepository {
    async fn ensure_schema(&self) -> Result<()> {
        self.db
            .execute(CREATE_NOTES_TABLE)
            .await
            .context("Failed to create notes table")?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Note>> {
        list_notes(self.db.pool()).await
    }

    async fn create(&self, note: &NewNote) -> Result<()> {
        create_note(self.db.pool(), note).await
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Note>> {
        get_note_by_id(self.db.pool(), id).await
    }

    async fn update(&self, id: i64, note: &NewNote) -> Result<u64> {
        update_note(self.db.pool(), id, note).await
    }

    async fn delete(&self, id: i64) -> Result<u64> {
        delete_note(self.db.pool(), id).await
    }
}

async fn list_notes(pool: &SqlitePool) -> Result<Vec<Note>> {
    let rows = sqlx::query("SELECT id, title, content, shortDescription FROM notes")
        .fetch_all(pool)
        .await
        .context("Failed to list notes")?;
    rows.iter().map(row_to_note).collect()
}

async fn create_note(pool: &SqlitePool, note: &NewNote) -> Result<()> {
    sqlx::query("INSERT INTO notes (title, content, shortDescription) VALUES (?, ?, ?)")
        .bind(&note.title)
        .bind(&note.content)
        .bind(&note.short_description)
        .execute(pool)
        .await
        .context("Failed to create note")?;
    Ok(())
}

async fn get_note_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Note>> {
    let row = sqlx::query("SELECT id, title, content, shortDescription FROM notes WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get note")?;
    row.as_ref().map(row_to_note).transpose()
}

async fn update_note(pool: &SqlitePool, id: i64, note: &NewNote) -> Result<u64> {
    let result =
        sqlx::query("UPDATE notes SET title = ?, content = ?, shortDescription = ? WHERE id = ?")
            .bind(&note.title)
            .bind(&note.content)
            .bind(&note.short_description)
            .bind(id)
            .execute(pool)
            .await
            .context("Failed to update note")?;
    Ok(result.rows_affected())
}

async fn delete_note(pool: &SqlitePool, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM notes WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete note")?;
    Ok(result.rows_affected())
}

fn row_to_note(row: &sqlx::sqlite::SqliteRow) -> Result<Note> {
    Ok(Note {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        short_description: row.try_get("shortDescription")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    async fn setup() -> SqlxNoteRepository {
        let db = create_test_pool().await.expect("Failed to create test pool");
        let repo = SqlxNoteRepository::new(db);
        repo.ensure_schema().await.expect("Failed to create schema");
        repo
    }

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let repo = setup().await;
        repo.ensure_schema().await.expect("Second call should succeed");
    }

    #[tokio::test]
    async fn test_list_empty_returns_empty_vec() {
        let repo = setup().await;
        let notes = repo.list().await.expect("List should succeed");
        assert!(notes.is_empty());
    }

    #[tokio::test]
    async fn test_create_then_list_assigns_ids() {
        let repo = setup().await;
        repo.create(&NewNote::new("first", "body one", "one")).await.unwrap();
        repo.create(&NewNote::new("second", "body two", "two")).await.unwrap();

        let notes = repo.list().await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_ne!(notes[0].id, notes[1].id);

        let first = notes.iter().find(|n| n.title == "first").unwrap();
        assert_eq!(first.content, "body one");
        assert_eq!(first.short_description, "one");
    }

    #[tokio::test]
    async fn test_get_by_id_missing_returns_none() {
        let repo = setup().await;
        assert!(repo.get_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_overwrites_all_fields() {
        let repo = setup().await;
        repo.create(&NewNote::new("t", "c", "s")).await.unwrap();
        let id = repo.list().await.unwrap()[0].id;

        let matched = repo.update(id, &NewNote::new("t2", "c2", "s2")).await.unwrap();
        assert_eq!(matched, 1);

        let note = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(note, Note {
            id,
            title: "t2".to_string(),
            content: "c2".to_string(),
            short_description: "s2".to_string(),
        });
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_id_match_nothing() {
        let repo = setup().await;
        assert_eq!(repo.update(9, &NewNote::new("a", "b", "c")).await.unwrap(), 0);
        assert_eq!(repo.delete(9).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let repo = setup().await;
        repo.create(&NewNote::new("t", "c", "s")).await.unwrap();
        let id = repo.list().await.unwrap()[0].id;

        assert_eq!(repo.delete(id).await.unwrap(), 1);
        assert!(repo.get_by_id(id).await.unwrap().is_none());
    }
}
