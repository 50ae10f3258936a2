//! Services layer - Business logic
//!
//! Services sit between the HTTP handlers and the repositories:
//! - Notes: CRUD with typed not-found errors
//! - Auth: registration, login and session token validation

pub mod auth;
pub mod note;
pub mod password;
pub mod token;

pub use auth::{AuthService, AuthServiceError};
pub use note::{NoteService, NoteServiceError};
pub use password::{hash_password, verify_password};
pub use token::{TokenError, TokenIssuer};
