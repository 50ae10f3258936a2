//! Database layer
//!
//! The storage handle ([`pool`]) and the table-level repositories built on it.
//! Each repository creates its own table on startup; there is no migration
//! history beyond that.

pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool, DatabaseHandle, SqliteDatabase};
