use async_trait::async_trait;
use sqlx::SqlitePool;

use super::super::map_database_error;
use super::super::user_insert::{PreparedUserData, UserInserter};
use crate::error::AppResult;

/// SQLite-specific implementation of UserInserter
pub struct SqliteUserInserter {
    pool: SqlitePool,
}

impl SqliteUserInserter {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserInserter for SqliteUserInserter {
    async fn execute_user_insert(&self, data: &PreparedUserData) -> AppResult<()> {
        // No pre-check: the UNIQUE index decides, concurrent inserts included
        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&data.id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(data.timestamp)
        .bind(data.timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| map_database_error(e, "create user"))?;

        Ok(())
    }
}
