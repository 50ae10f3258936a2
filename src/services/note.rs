//! Note service
//!
//! Thin layer over [`NoteRepository`] that turns a missing row into a typed
//! error. Update and delete of an unknown id are not errors: the repository
//! reports zero matched rows and the service only logs it.
//!
//! Update here is a plain overwrite. The handler's read-merge-write sequence
//! runs without a transaction, so two concurrent updates of the same note
//! race and the last write wins.

use crate::db::repositories::NoteRepository;
use crate::models::{NewNote, Note};
use std::sync::Arc;

/// Error types for note service operations
#[derive(Debug, thiserror::Error)]
pub enum NoteServiceError {
    #[error("Note {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
}

impl NoteService {
    pub fn new(repo: Arc<dyn NoteRepository>) -> Self {
        Self { repo }
    }

    /// Create the notes table if needed
    pub async fn ensure_schema(&self) -> Result<(), NoteServiceError> {
        Ok(self.repo.ensure_schema().await?)
    }

    pub async fn list(&self) -> Result<Vec<Note>, NoteServiceError> {
        Ok(self.repo.list().await?)
    }

    /// Insert a note. The assigned id is not returned; callers list to find it.
    pub async fn create(&self, note: &NewNote) -> Result<(), NoteServiceError> {
        self.repo.create(note).await?;
        tracing::info!(title = %note.title, "Note created");
        Ok(())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Note, NoteServiceError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(NoteServiceError::NotFound(id))
    }

    pub async fn update(&self, id: i64, note: &NewNote) -> Result<(), NoteServiceError> {
        let matched = self.repo.update(id, note).await?;
        if matched == 0 {
            tracing::debug!(id, "Update matched no note");
        } else {
            tracing::info!(id, "Note updated");
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), NoteServiceError> {
        let removed = self.repo.delete(id).await?;
        if removed == 0 {
            tracing::debug!(id, "Delete matched no note");
        } else {
            tracing::info!(id, "Note deleted");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::db::repositories::SqlxNoteRepository;
    use async_trait::async_trait;

    async fn setup_test_service() -> NoteService {
        let db = create_test_pool().await.expect("Failed to create test pool");
        let service = NoteService::new(SqlxNoteRepository::boxed(db));
        service.ensure_schema().await.expect("Failed to create schema");
        service
    }

    #[tokio::test]
    async fn test_created_note_appears_in_list() {
        let service = setup_test_service().await;
        service
            .create(&NewNote::new("Groceries", "milk, eggs", "shopping"))
            .await
            .unwrap();

        let notes = service.list().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Groceries");
        assert_eq!(notes[0].content, "milk, eggs");
        assert_eq!(notes[0].short_description, "shopping");

        let fetched = service.get_by_id(notes[0].id).await.unwrap();
        assert_eq!(fetched, notes[0]);
    }

    #[tokio::test]
    async fn test_get_missing_note_is_not_found() {
        let service = setup_test_service().await;
        let err = service.get_by_id(404).await.unwrap_err();
        assert!(matches!(err, NoteServiceError::NotFound(404)));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_note_succeed() {
        let service = setup_test_service().await;
        service.update(1, &NewNote::new("a", "b", "c")).await.unwrap();
        service.delete(1).await.unwrap();
    }

    struct FailingRepository;

    #[async_trait]
    impl NoteRepository for FailingRepository {
        async fn ensure_schema(&self) -> anyhow::Result<()> {
            anyhow::bail!("disk on fire")
        }
        async fn list(&self) -> anyhow::Result<Vec<Note>> {
            anyhow::bail!("disk on fire")
        }
        async fn create(&self, _note: &NewNote) -> anyhow::Result<()> {
            anyhow::bail!("disk on fire")
        }
        async fn get_by_id(&self, _id: i64) -> anyhow::Result<Option<Note>> {
            anyhow::bail!("disk on fire")
        }
        async fn update(&self, _id: i64, _note: &NewNote) -> anyhow::Result<u64> {
            anyhow::bail!("disk on fire")
        }
        async fn delete(&self, _id: i64) -> anyhow::Result<u64> {
            anyhow::bail!("disk on fire")
        }
    }

    #[tokio::test]
    async fn test_storage_failures_propagate() {
        let service = NoteService::new(Arc::new(FailingRepository));

        assert!(matches!(service.list().await, Err(NoteServiceError::Storage(_))));
        assert!(matches!(service.get_by_id(1).await, Err(NoteServiceError::Storage(_))));
        let err = service.delete(1).await.unwrap_err();
        assert_eq!(err.to_string(), "disk on fire");
    }
}
