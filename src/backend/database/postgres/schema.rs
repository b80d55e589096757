use crate::error::{AppError, AppResult};
use sqlx::PgPool;

/// Create the users table and its indexes for PostgreSQL
///
/// Safe to run on every startup.
pub async fn init_schema(pool: &PgPool) -> AppResult<()> {
    let users_sql = r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
    "#;

    sqlx::query(users_sql)
        .execute(pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create users table: {}", e)))?;

    let indexes = [
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email_lower ON users (LOWER(email))",
        "CREATE INDEX IF NOT EXISTS idx_users_created_at ON users (created_at)",
    ];

    for index_sql in indexes {
        sqlx::query(index_sql)
            .execute(pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to create index: {}", e)))?;
    }

    Ok(())
}
