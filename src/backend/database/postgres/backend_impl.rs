use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use super::super::config::DatabaseBackendConfig;
use super::{PostgresUserInserter, PostgresUserReader};
use crate::backend::database::{UnifiedUserInsertOps, UnifiedUserReadOps};
use crate::backend::{Backend, UserBackend};
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};

/// PostgreSQL database backend implementation
pub struct PostgresBackend {
    pool: PgPool,
    user_insert_ops: UnifiedUserInsertOps<PostgresUserInserter>,
    user_read_ops: UnifiedUserReadOps<PostgresUserReader>,
}

impl PostgresBackend {
    pub fn new(pool: PgPool) -> Self {
        Self {
            user_insert_ops: UnifiedUserInsertOps::new(PostgresUserInserter::new(pool.clone())),
            user_read_ops: UnifiedUserReadOps::new(PostgresUserReader::new(pool.clone())),
            pool,
        }
    }
}

#[async_trait]
impl Backend for PostgresBackend {
    async fn connect(config: &DatabaseBackendConfig) -> AppResult<Self> {
        config
            .validate()
            .map_err(|e| AppError::Configuration(format!("Invalid backend config: {}", e)))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&config.connection_url)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to PostgreSQL: {}", e)))?;

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
impl UserBackend for PostgresBackend {
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
