use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::Level;

use crate::error::{AppError, AppResult};
use crate::password::PasswordAlgorithm;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BackendConfig {
    #[serde(rename = "type")]
    pub backend_type: String,
    pub database: Option<DatabaseConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    #[serde(rename = "type")]
    pub db_type: String,
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Pool acquire timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_connection_timeout() -> u64 {
    30
}

/// Hashing policy for newly stored passwords
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PasswordConfig {
    #[serde(default)]
    pub algorithm: PasswordAlgorithm,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            algorithm: PasswordAlgorithm::default(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    /// Parse the configured level into a tracing `Level`
    pub fn max_level(&self) -> AppResult<Level> {
        self.level.trim().parse::<Level>().map_err(|_| {
            AppError::Configuration(format!("Unsupported log level: {}", self.level))
        })
    }
}

impl AppConfig {
    /// Load configuration from YAML file
    pub fn load_from_file<P: AsRef<Path>>(config_path: P) -> AppResult<Self> {
        let path = config_path.as_ref();

        if !path.exists() {
            return Err(AppError::Configuration(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        // Expand environment variables in YAML content
        let expanded_content = Self::expand_env_vars(&content)?;

        let app_config: AppConfig = serde_yaml::from_str(&expanded_content).map_err(|e| {
            AppError::Configuration(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// In-memory SQLite with Argon2id hashing, for development and tests
    pub fn default_config() -> Self {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            backend: BackendConfig {
                backend_type: "database".to_string(),
                database: Some(DatabaseConfig {
                    db_type: "sqlite".to_string(),
                    url: ":memory:".to_string(),
                    max_connections: 1,
                    connection_timeout: default_connection_timeout(),
                }),
            },
            password: PasswordConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Reject settings that would only fail later at startup
    pub fn validate(&self) -> AppResult<()> {
        if self.backend.backend_type != "database" {
            return Err(AppError::Configuration(format!(
                "Unsupported backend type: {}",
                self.backend.backend_type
            )));
        }

        if self.backend.database.is_none() {
            return Err(AppError::Configuration(
                "Database configuration is required when backend type is 'database'".to_string(),
            ));
        }

        if !(4..=31).contains(&self.password.bcrypt_cost) {
            return Err(AppError::Configuration(format!(
                "bcrypt cost must be between 4 and 31, got {}",
                self.password.bcrypt_cost
            )));
        }

        self.logging.max_level()?;

        Ok(())
    }

    /// Expand environment variables in format ${VAR_NAME} or ${VAR_NAME:-default}
    fn expand_env_vars(content: &str) -> AppResult<String> {
        let mut expanded = String::with_capacity(content.len());
        let mut rest = content;

        while let Some(start) = rest.find("${") {
            expanded.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            let Some(end) = after.find('}') else {
                // Unterminated, keep the remainder as-is
                expanded.push_str(&rest[start..]);
                return Ok(expanded);
            };

            let var_expr = &after[..end];
            let (var_name, default_value) = match var_expr.split_once(":-") {
                Some((name, default)) => (name, Some(default)),
                None => (var_expr, None),
            };

            let value = match (std::env::var(var_name), default_value) {
                (Ok(val), _) => val,
                (Err(_), Some(default)) => default.to_string(),
                (Err(_), None) => {
                    return Err(AppError::Configuration(format!(
                        "Environment variable {} not found and no default provided",
                        var_name
                    )))
                }
            };

            expanded.push_str(&value);
            rest = &after[end + 1..];
        }

        expanded.push_str(rest);
        Ok(expanded)
    }
}
