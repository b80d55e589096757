//! Database abstraction layer
//!
//! Shared user logic lives in the `user_*` modules; each database supplies
//! small adapters for the SQL it speaks.
//!
//! # Architecture
//!
//! ```text
//! Common Logic (user_insert.rs, user_read.rs)
//!     ↓
//! Database-specific implementations
//!     ├── postgres/ (PostgreSQL-specific code)
//!     └── sqlite/   (SQLite-specific code)
//! ```

pub mod config;
pub mod postgres;
pub mod sqlite;
pub mod user_insert;
pub mod user_read;

use crate::error::AppError;

// Re-export key types for convenience
pub use config::DatabaseBackendConfig;

pub use user_insert::UnifiedUserInsertOps;

pub use user_read::UnifiedUserReadOps;

pub use postgres::{PostgresBackend, PostgresUserInserter, PostgresUserReader};
pub use sqlite::{SqliteBackend, SqliteUserInserter, SqliteUserReader};

/// Columns selected whenever a full user record is read
pub const USER_COLUMNS: &str = "name, email, password_hash, created_at, updated_at";

/// Map a sqlx error to `AppError`, turning unique violations into conflicts
pub fn map_database_error(error: sqlx::Error, action: &str) -> AppError {
    if let Some(db_error) = error.as_database_error() {
        if db_error.is_unique_violation() && db_error.message().contains("email") {
            return AppError::Conflict("email".to_string());
        }
    }

    AppError::Database(format!("Failed to {}: {}", action, error))
}
