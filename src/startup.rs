use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tracing::info;

use crate::backend::database::DatabaseBackendConfig;
use crate::backend::{BackendFactory, UserBackend};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::logging::logging_middleware;
use crate::password::PasswordManager;
use crate::resource;

/// Connect the configured user store and make sure its schema exists
pub async fn setup_backend(config: &AppConfig) -> AppResult<Arc<dyn UserBackend>> {
    if config.backend.backend_type != "database" {
        return Err(AppError::Configuration(format!(
            "Unsupported backend type: {}",
            config.backend.backend_type
        )));
    }

    let database_config = config.backend.database.as_ref().ok_or_else(|| {
        AppError::Configuration(
            "Database configuration is required when backend type is 'database'".to_string(),
        )
    })?;

    let backend_config = DatabaseBackendConfig::from_app_config(database_config)?;

    info!(database = %database_config.db_type, "setting up backend");

    let backend = BackendFactory::create(&backend_config).await?;
    backend.init_schema().await?;

    info!("user schema initialized");

    Ok(backend)
}

/// Password manager for the configured hashing policy
pub fn setup_password_manager(config: &AppConfig) -> AppResult<Arc<PasswordManager>> {
    let manager = PasswordManager::new(config.password.algorithm, config.password.bcrypt_cost)?;
    Ok(Arc::new(manager))
}

/// Routes for the auth API
///
/// Methods other than the registered ones get a 405 from the method router.
pub fn build_router(backend: Arc<dyn UserBackend>, passwords: Arc<PasswordManager>) -> Router {
    Router::new()
        .route("/api/register", post(resource::auth::register))
        .route("/api/login", post(resource::auth::login))
        .route("/health", get(resource::health::health))
        .layer(middleware::from_fn(logging_middleware))
        .with_state((backend, passwords))
}

pub async fn build_app(config: &AppConfig) -> AppResult<Router> {
    let backend = setup_backend(config).await?;
    let passwords = setup_password_manager(config)?;
    Ok(build_router(backend, passwords))
}
