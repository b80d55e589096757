pub mod auth;
pub mod backend;
pub mod config;
pub mod error;
pub mod extractors;
pub mod logging;
pub mod models;
pub mod password;
pub mod resource;
pub mod startup;
pub mod validation;

// Re-export commonly used types for easier access
pub use error::{AppError, AppResult};
pub use models::User;
pub use validation::ValidationErrors;
