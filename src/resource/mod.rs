use std::sync::Arc;

use crate::backend::UserBackend;
use crate::password::PasswordManager;

pub mod auth;
pub mod health;

/// Shared handler state: the user store and the password hashing policy
pub type AppState = (Arc<dyn UserBackend>, Arc<PasswordManager>);
