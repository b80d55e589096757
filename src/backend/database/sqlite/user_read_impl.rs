use async_trait::async_trait;
use sqlx::SqlitePool;

use super::super::user_read::UserReader;
use super::super::USER_COLUMNS;
use crate::error::{AppError, AppResult};
use crate::models::User;

/// SQLite-specific implementation of UserReader
pub struct SqliteUserReader {
    pool: SqlitePool,
}

impl SqliteUserReader {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserReader for SqliteUserReader {
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let sql = format!(
            "SELECT id, {} FROM users WHERE LOWER(email) = LOWER(?1)",
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to find user by email: {}", e)))
    }

    async fn count_users_by_email(&self, email: &str) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE LOWER(email) = LOWER(?1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to check email: {}", e)))
    }
}
