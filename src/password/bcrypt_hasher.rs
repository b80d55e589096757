use super::{PasswordAlgorithm, PasswordHasher};
use crate::error::{AppError, AppResult};
use bcrypt::{hash, verify};

/// bcrypt password hasher
///
/// Kept alongside Argon2id so that accounts imported with `$2y$`/`$2b$`
/// hashes can still sign in.
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Create a new bcrypt hasher with custom cost (4..=31)
    pub fn with_cost(cost: u32) -> AppResult<Self> {
        if !(4..=31).contains(&cost) {
            return Err(AppError::Configuration(format!(
                "bcrypt cost must be between 4 and 31, got {}",
                cost
            )));
        }

        Ok(Self { cost })
    }
}

/// $2a$, $2b$, $2x$ or $2y$, always 60 characters
pub(crate) fn is_bcrypt_hash(value: &str) -> bool {
    ["$2a$", "$2b$", "$2x$", "$2y$"]
        .iter()
        .any(|prefix| value.starts_with(prefix))
        && value.len() == 60
        && value.matches('$').count() == 3
}

impl PasswordHasher for BcryptHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        hash(password, self.cost)
            .map_err(|e| AppError::Internal(format!("Failed to hash password with bcrypt: {}", e)))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        verify(password, hash)
            .map_err(|e| AppError::Internal(format!("Failed to verify bcrypt password: {}", e)))
    }

    fn is_hash(&self, value: &str) -> bool {
        is_bcrypt_hash(value)
    }

    fn algorithm(&self) -> PasswordAlgorithm {
        PasswordAlgorithm::Bcrypt
    }
}
