use crate::error::AppResult;
use crate::models::{NewUser, User};
use async_trait::async_trait;
use std::sync::Arc;

pub mod database;

use database::DatabaseBackendConfig;

/// Supported database backend types
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseType {
    PostgreSQL,
    SQLite,
}

/// Core backend abstraction
///
/// Lifecycle operations every storage backend implements, independent of
/// the records it holds.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Connect and initialize the storage backend
    async fn connect(config: &DatabaseBackendConfig) -> AppResult<Self>
    where
        Self: Sized;

    /// Check if the storage backend is healthy and accessible
    async fn health_check(&self) -> AppResult<()>;

    /// Create tables and indexes if they do not exist yet
    async fn init_schema(&self) -> AppResult<()>;
}

/// User store
///
/// Emails are compared case-insensitively. The store guarantees email
/// uniqueness: `create_user` fails with `AppError::Conflict("email")` when
/// the address is already registered, even if a prior `email_exists` said
/// otherwise.
#[async_trait]
pub trait UserBackend: Backend {
    /// Persist a new user and return the stored record
    async fn create_user(&self, user: &NewUser) -> AppResult<User>;

    /// Find a user by email
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Whether any user is registered with this email
    async fn email_exists(&self, email: &str) -> AppResult<bool>;
}

/// Factory for creating backend instances
pub struct BackendFactory;

impl BackendFactory {
    /// Create a backend based on configuration
    pub async fn create(config: &DatabaseBackendConfig) -> AppResult<Arc<dyn UserBackend>> {
        let backend = Self::create_backend(config).await?;
        Ok(Arc::from(backend))
    }

    /// Create a backend based on configuration (returns Box)
    pub async fn create_backend(config: &DatabaseBackendConfig) -> AppResult<Box<dyn UserBackend>> {
        match config.database_type {
            DatabaseType::PostgreSQL => {
                let backend = database::postgres::PostgresBackend::connect(config).await?;
                Ok(Box::new(backend))
            }
            DatabaseType::SQLite => {
                let backend = database::sqlite::SqliteBackend::connect(config).await?;
                Ok(Box::new(backend))
            }
        }
    }
}
