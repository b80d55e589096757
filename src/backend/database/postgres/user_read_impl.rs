use async_trait::async_trait;
use sqlx::PgPool;

use super::super::user_read::UserReader;
use super::super::USER_COLUMNS;
use crate::error::{AppError, AppResult};
use crate::models::User;

/// PostgreSQL-specific implementation of UserReader
pub struct PostgresUserReader {
    pool: PgPool,
}

impl PostgresUserReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserReader for PostgresUserReader {
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        // UUID column comes back as text to match the `User` model
        let sql = format!(
            "SELECT id::text AS id, {} FROM users WHERE LOWER(email) = LOWER($1)",
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to find user by email: {}", e)))
    }

    async fn count_users_by_email(&self, email: &str) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to check email: {}", e)))
    }
}
