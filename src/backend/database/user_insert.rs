use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};
use crate::password::is_supported_hash;
use crate::validation::normalize_email;

/// Prepared user data for database insertion
#[derive(Debug, Clone)]
pub struct PreparedUserData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub timestamp: DateTime<Utc>,
}

/// Database-specific adapter for user INSERT operations
#[async_trait]
pub trait UserInserter: Send + Sync {
    /// Execute the insert; unique violations surface as `AppError::Conflict`
    async fn execute_user_insert(&self, data: &PreparedUserData) -> AppResult<()>;
}

/// Shared business logic for user INSERT operations
pub struct UserInsertProcessor;

impl UserInsertProcessor {
    /// Prepare user data for database insertion
    ///
    /// This handles all common processing:
    /// - ID generation (always server-generated)
    /// - Email normalization
    /// - Refusing anything that is not a recognized password hash
    /// - Timestamps, truncated to the microsecond precision every backend keeps
    pub fn prepare_user_for_insert(user: &NewUser) -> AppResult<PreparedUserData> {
        if !is_supported_hash(&user.password_hash) {
            return Err(AppError::Internal(
                "Refusing to store a password that is not hashed".to_string(),
            ));
        }

        Ok(PreparedUserData {
            id: Uuid::new_v4().to_string(),
            name: user.name.clone(),
            email: normalize_email(&user.email),
            password_hash: user.password_hash.clone(),
            timestamp: Utc::now().trunc_subsecs(6),
        })
    }

    /// Build the stored record from the prepared data after a successful insert
    pub fn finalize_user_response(data: PreparedUserData) -> User {
        User {
            id: data.id,
            name: data.name,
            email: data.email,
            password_hash: data.password_hash,
            created_at: data.timestamp,
            updated_at: data.timestamp,
        }
    }
}

/// Unified user INSERT operations using the adapter pattern
pub struct UnifiedUserInsertOps<T: UserInserter> {
    inserter: T,
}

impl<T: UserInserter> UnifiedUserInsertOps<T> {
    pub fn new(inserter: T) -> Self {
        Self { inserter }
    }

    /// Create a new user using shared logic and database-specific execution
    pub async fn create_user(&self, user: &NewUser) -> AppResult<User> {
        let prepared_data = UserInsertProcessor::prepare_user_for_insert(user)?;

        self.inserter.execute_user_insert(&prepared_data).await?;

        Ok(UserInsertProcessor::finalize_user_response(prepared_data))
    }
}
