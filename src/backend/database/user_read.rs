//! User read operations
//!
//! Common interfaces for user lookups that work across database backends.

use crate::error::AppResult;
use crate::models::User;
use crate::validation::normalize_email;
use async_trait::async_trait;

/// Trait for user read operations
#[async_trait]
pub trait UserReader: Send + Sync {
    /// Find a user by email (case-insensitive)
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Count users registered with this email (case-insensitive)
    async fn count_users_by_email(&self, email: &str) -> AppResult<i64>;
}

/// Unified user read operations
pub struct UnifiedUserReadOps<T: UserReader> {
    reader: T,
}

impl<T: UserReader> UnifiedUserReadOps<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }

    pub async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.reader
            .find_user_by_email(&normalize_email(email))
            .await
    }

    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let count = self
            .reader
            .count_users_by_email(&normalize_email(email))
            .await?;
        Ok(count > 0)
    }
}
