use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

use super::super::config::DatabaseBackendConfig;
use super::{SqliteUserInserter, SqliteUserReader};
use crate::backend::database::{UnifiedUserInsertOps, UnifiedUserReadOps};
use crate::backend::{Backend, UserBackend};
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};

/// SQLite database backend implementation
pub struct SqliteBackend {
    pool: SqlitePool,
    user_insert_ops: UnifiedUserInsertOps<SqliteUserInserter>,
    user_read_ops: UnifiedUserReadOps<SqliteUserReader>,
}

impl SqliteBackend {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            user_insert_ops: UnifiedUserInsertOps::new(SqliteUserInserter::new(pool.clone())),
            user_read_ops: UnifiedUserReadOps::new(SqliteUserReader::new(pool.clone())),
            pool,
        }
    }
}

#[async_trait]
impl Backend for SqliteBackend {
    async fn connect(config: &DatabaseBackendConfig) -> AppResult<Self> {
        config
            .validate()
            .map_err(|e| AppError::Configuration(format!("Invalid backend config: {}", e)))?;

        let options = SqliteConnectOptions::from_str(&config.connection_url)
            .map_err(|e| AppError::Configuration(format!("Invalid SQLite URL: {}", e)))?
            .create_if_missing(true);

        // An in-memory database lives only as long as its connection
        let pool_options = if config.is_memory_database() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections)
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to SQLite: {}", e)))?;

        Ok(Self::new(pool))
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn init_schema(&self) -> AppResult<()> {
        super::schema::init_schema(&self.pool).await
    }
}

#[async_trait]
impl UserBackend for SqliteBackend {
    async fn create_user(&self, user: &NewUser) -> AppResult<User> {
        self.user_insert_ops.create_user(user).await
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.user_read_ops.find_user_by_email(email).await
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        self.user_read_ops.email_exists(email).await
    }
}
