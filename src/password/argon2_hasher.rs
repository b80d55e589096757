use super::{PasswordAlgorithm, PasswordHasher};
use crate::error::{AppError, AppResult};
use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash,
    PasswordHasher as Argon2PasswordHasher, PasswordVerifier, Version,
};

/// Argon2id password hasher with OWASP recommended settings
///
/// OWASP recommendations:
/// - Use Argon2id with a minimum configuration of 19 MiB of memory
/// - An iteration count of 2
/// - 1 degree of parallelism
pub struct Argon2idHasher {
    argon2: Argon2<'static>,
}

impl Argon2idHasher {
    pub fn new() -> AppResult<Self> {
        let params = Params::new(
            19456,    // memory cost in KiB (19 MiB)
            2,        // time cost (iterations)
            1,        // parallelism
            Some(32), // output length
        )
        .map_err(|e| AppError::Configuration(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

/// PHC-format Argon2id hash, whatever parameters it was made with
pub(crate) fn is_argon2id_hash(value: &str) -> bool {
    value.starts_with("$argon2id$") && PasswordHash::new(value).is_ok()
}

impl PasswordHasher for Argon2idHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut rand::thread_rng());

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                AppError::Internal(format!("Failed to hash password with Argon2id: {}", e))
            })?;

        Ok(password_hash.to_string())
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("Failed to parse Argon2id hash: {}", e)))?;

        // Parameters come from the stored hash, not from `self`
        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::Internal(format!(
                "Failed to verify Argon2id password: {}",
                e
            ))),
        }
    }

    fn is_hash(&self, value: &str) -> bool {
        is_argon2id_hash(value)
    }

    fn algorithm(&self) -> PasswordAlgorithm {
        PasswordAlgorithm::Argon2id
    }
}
