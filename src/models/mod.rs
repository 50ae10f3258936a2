//! Data models
//!
//! This module contains the data structures used throughout the notes service:
//! - Database entities (Note, User)
//! - Request payloads (NoteInput)
//! - Session token claims

mod note;
mod user;

pub use note::{FieldViolation, NewNote, Note, NoteInput, SHORT_DESCRIPTION_MAX_CHARS};
pub use user::{Claims, User};
