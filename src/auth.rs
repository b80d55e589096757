use tracing::{debug, warn};

use crate::backend::UserBackend;
use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::password::PasswordManager;

/// Checks an email/password pair against the user store.
///
/// Every failure is `AppError::AuthenticationFailed`; callers cannot tell an
/// unknown email from a wrong password, and neither can a timing observer,
/// since the unknown-email path still runs one hash verification.
pub struct CredentialVerifier<'a> {
    backend: &'a dyn UserBackend,
    passwords: &'a PasswordManager,
}

impl<'a> CredentialVerifier<'a> {
    pub fn new(backend: &'a dyn UserBackend, passwords: &'a PasswordManager) -> Self {
        Self { backend, passwords }
    }

    pub async fn verify(&self, email: &str, password: &str) -> AppResult<User> {
        let Some(user) = self.backend.find_user_by_email(email).await? else {
            self.passwords.verify_dummy(password)?;
            debug!("login attempt for unknown email");
            return Err(AppError::AuthenticationFailed);
        };

        if !self.passwords.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "login attempt with wrong password");
            return Err(AppError::AuthenticationFailed);
        }

        Ok(user)
    }
}
