//! notesapp - a small HTTP service for short text notes
//!
//! Notes are stored in SQLite and served as JSON. A separate set of auth
//! endpoints registers users and issues signed session tokens.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
