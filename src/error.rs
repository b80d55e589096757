use axum::{http::StatusCode, Json};
use serde_json::json;
use std::fmt;

use crate::validation::{ValidationErrors, INVALID_DATA_MESSAGE};

/// Message returned for every failed login, whatever the reason
pub const BAD_CREDENTIALS_MESSAGE: &str = "Bad credentials";

#[derive(Debug)]
pub enum AppError {
    Database(String),
    Serialization(serde_json::Error),
    BadRequest(String),
    Internal(String),
    Configuration(String),
    /// Field-scoped input errors (422)
    Validation(ValidationErrors),
    /// Unknown email or wrong password (401)
    AuthenticationFailed,
    /// A unique constraint on the named field was violated by the store
    Conflict(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Database(e) => write!(f, "Database error: {}", e),
            AppError::Serialization(e) => write!(f, "Serialization error: {}", e),
            AppError::BadRequest(e) => write!(f, "Bad request: {}", e),
            AppError::Internal(e) => write!(f, "Internal error: {}", e),
            AppError::Configuration(e) => write!(f, "Configuration error: {}", e),
            AppError::Validation(errors) => {
                write!(f, "Validation failed for: {}", errors.fields().join(", "))
            }
            AppError::AuthenticationFailed => write!(f, "Authentication failed"),
            AppError::Conflict(field) => write!(f, "Unique constraint violated on {}", field),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// 422 body shared by every validation failure
pub fn validation_error_response(errors: &ValidationErrors) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "message": INVALID_DATA_MESSAGE,
            "errors": errors,
        })),
    )
}

// Conversion to an HTTP response
impl AppError {
    pub fn to_response(&self) -> (StatusCode, Json<serde_json::Value>) {
        let (status, message) = match self {
            AppError::Validation(errors) => return validation_error_response(errors),
            AppError::Conflict(field) => {
                return validation_error_response(&ValidationErrors::taken(field));
            }
            AppError::AuthenticationFailed => {
                (StatusCode::UNAUTHORIZED, BAD_CREDENTIALS_MESSAGE.to_string())
            }
            AppError::BadRequest(e) => (StatusCode::BAD_REQUEST, e.clone()),
            AppError::Database(_)
            | AppError::Serialization(_)
            | AppError::Internal(_)
            | AppError::Configuration(_) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server Error".to_string(),
                )
            }
        };

        (status, Json(json!({ "message": message })))
    }
}
