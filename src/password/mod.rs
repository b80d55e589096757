use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Password hashing algorithm types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordAlgorithm {
    /// bcrypt, for stores migrated from systems that hash with it
    Bcrypt,
    /// Argon2id algorithm (OWASP recommended for new passwords)
    Argon2id,
}

impl Default for PasswordAlgorithm {
    fn default() -> Self {
        Self::Argon2id
    }
}

impl std::fmt::Display for PasswordAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bcrypt => write!(f, "bcrypt"),
            Self::Argon2id => write!(f, "Argon2id"),
        }
    }
}

/// Abstract trait for password hashing algorithms
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verify a plaintext password against a hash
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;

    /// Check if a string is a hash created by this algorithm
    fn is_hash(&self, value: &str) -> bool;

    /// Get the algorithm identifier
    fn algorithm(&self) -> PasswordAlgorithm;
}

pub mod argon2_hasher;
pub mod bcrypt_hasher;

pub use argon2_hasher::Argon2idHasher;
pub use bcrypt_hasher::BcryptHasher;

/// Check if a string is a password hash in any supported format
pub fn is_supported_hash(value: &str) -> bool {
    bcrypt_hasher::is_bcrypt_hash(value) || argon2_hasher::is_argon2id_hash(value)
}

const DUMMY_PASSWORD: &str = "dummy-password-never-matches";

/// Password manager with support for multiple algorithms
pub struct PasswordManager {
    /// Current algorithm for new passwords
    current_algorithm: PasswordAlgorithm,
    /// Available hashers
    hashers: Vec<Box<dyn PasswordHasher>>,
    /// Hash verified against when no user matches, so both paths cost the same
    dummy_hash: String,
}

impl PasswordManager {
    /// Create a PasswordManager hashing new passwords with `algorithm`
    ///
    /// The dummy hash is computed here, before the manager serves any login.
    pub fn new(algorithm: PasswordAlgorithm, bcrypt_cost: u32) -> AppResult<Self> {
        let hashers: Vec<Box<dyn PasswordHasher>> = vec![
            Box::new(BcryptHasher::with_cost(bcrypt_cost)?),
            Box::new(Argon2idHasher::new()?),
        ];

        let mut manager = Self {
            current_algorithm: algorithm,
            hashers,
            dummy_hash: String::new(),
        };
        manager.dummy_hash = manager.current_hasher()?.hash_password(DUMMY_PASSWORD)?;

        Ok(manager)
    }

    fn current_hasher(&self) -> AppResult<&dyn PasswordHasher> {
        self.hashers
            .iter()
            .find(|h| h.algorithm() == self.current_algorithm)
            .map(|h| &**h)
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Hasher not found for algorithm: {}",
                    self.current_algorithm
                ))
            })
    }

    /// Hash a plaintext password using the current algorithm
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        if password.is_empty() {
            return Err(AppError::BadRequest("Password cannot be empty".to_string()));
        }

        self.current_hasher()?.hash_password(password)
    }

    /// Verify a plaintext password against any supported hash format
    pub fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        // Try each hasher until one can handle this hash format
        for hasher in &self.hashers {
            if hasher.is_hash(hash) {
                return hasher.verify_password(password, hash);
            }
        }

        Err(AppError::Internal("Unsupported stored hash format".to_string()))
    }

    /// Burn one verification against a throwaway hash and report failure.
    ///
    /// Used when the looked-up account does not exist.
    pub fn verify_dummy(&self, password: &str) -> AppResult<bool> {
        self.verify_password(password, &self.dummy_hash)?;
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argon2id_manager() -> PasswordManager {
        PasswordManager::new(PasswordAlgorithm::Argon2id, 4).unwrap()
    }

    #[test]
    fn test_default_algorithm_is_argon2id() {
        assert_eq!(PasswordAlgorithm::default(), PasswordAlgorithm::Argon2id);
    }

    #[test]
    fn test_dummy_hash_is_ready_after_new() {
        let pm = argon2id_manager();
        assert!(pm.dummy_hash.starts_with("$argon2id$"));
        assert!(is_supported_hash(&pm.dummy_hash));

        let pm = PasswordManager::new(PasswordAlgorithm::Bcrypt, 4).unwrap();
        assert!(pm.dummy_hash.starts_with("$2b$04$"));
    }

    #[test]
    fn test_new_rejects_bad_bcrypt_cost() {
        assert!(matches!(
            PasswordManager::new(PasswordAlgorithm::Argon2id, 3),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn test_hash_uses_current_algorithm() {
        let pm = PasswordManager::new(PasswordAlgorithm::Bcrypt, 4).unwrap();
        let hash = pm.hash_password("password").unwrap();

        assert!(bcrypt_hasher::is_bcrypt_hash(&hash));
        assert!(is_supported_hash(&hash));
        assert!(pm.verify_password("password", &hash).unwrap());
        assert!(!pm.verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_is_supported_hash() {
        assert!(is_supported_hash(
            "$2y$10$92IXUNpkjO0rOQ5byMi.Ye4oKoEa3Ro9llC/.og/at2.uheWG/igi"
        ));
        assert!(!is_supported_hash("password"));
        assert!(!is_supported_hash("{SSHA}W6ph5Mm5Pz8GgiULbPgzG37mj9g="));
    }

    #[test]
    fn test_verifies_hashes_from_other_algorithms() {
        let bcrypt = BcryptHasher::with_cost(4).unwrap();
        let legacy_hash = bcrypt.hash_password("password").unwrap();

        let pm = argon2id_manager();
        assert!(pm.verify_password("password", &legacy_hash).unwrap());
    }

    #[test]
    fn test_empty_password_is_rejected() {
        let pm = argon2id_manager();
        assert!(matches!(pm.hash_password(""), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_unknown_hash_format_is_internal_error() {
        let pm = argon2id_manager();
        assert!(matches!(
            pm.verify_password("password", "plaintext"),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_dummy_verification_never_matches() {
        let pm = PasswordManager::new(PasswordAlgorithm::Bcrypt, 4).unwrap();
        assert!(!pm.verify_dummy(DUMMY_PASSWORD).unwrap());
        assert!(!pm.verify_dummy("password").unwrap());
    }

    #[test]
    fn test_algorithm_display() {
        assert_eq!(PasswordAlgorithm::Bcrypt.to_string(), "bcrypt");
        assert_eq!(PasswordAlgorithm::Argon2id.to_string(), "Argon2id");
    }
}
