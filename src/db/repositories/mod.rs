//! Database repositories
//!
//! Repository pattern implementations for database access.
//! Each repository handles CRUD operations for a specific entity.

pub mod note;
pub mod user;

pub use note::{NoteRepository, SqlxNoteRepository};
pub use user::{SqlxUserRepository, UserRepository};
