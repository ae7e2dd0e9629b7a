/// Configuration management for Post Service
///
/// This module handles loading and managing configuration from environment variables.
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Storage configuration
    pub storage: StorageConfig,
    /// Logging configuration
    pub log: LogConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
    /// Number of actix worker threads
    pub workers: usize,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Which store backs the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            other => Err(format!(
                "STORAGE_BACKEND must be 'memory' or 'postgres', got '{}'",
                other
            )),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Database URL, used by the postgres backend
    pub database_url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_env = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());
        let production = app_env.eq_ignore_ascii_case("production");

        let app = AppConfig {
            env: app_env,
            host: lookup("POST_SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or_default(&lookup, "POST_SERVICE_PORT", 8080)?,
            workers: parse_or_default(&lookup, "POST_SERVICE_WORKERS", 4)?,
        };

        let cors = {
            let allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
                Some(value) => value,
                None if production => {
                    return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                }
                None => "http://localhost:3000".to_string(),
            };

            if production && allowed_origins.trim() == "*" {
                return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
            }

            CorsConfig { allowed_origins }
        };

        let storage = {
            let backend = match lookup("STORAGE_BACKEND") {
                Some(value) => value.parse()?,
                None => StorageBackend::Memory,
            };
            let database_url = match lookup("DATABASE_URL") {
                Some(url) => url,
                None if production && backend == StorageBackend::Postgres => {
                    return Err(
                        "DATABASE_URL must be set in production when STORAGE_BACKEND=postgres"
                            .to_string(),
                    )
                }
                None => "postgresql://localhost/posts".to_string(),
            };

            StorageConfig {
                backend,
                database_url,
                max_connections: parse_or_default(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            }
        };

        let log = LogConfig {
            format: match lookup("LOG_FORMAT").as_deref() {
                Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
        };

        Ok(Config {
            app,
            cors,
            storage,
            log,
        })
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T, String>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(val) => val
            .parse()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_use_memory_store() {
        let config = load(&[]).unwrap();
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.app.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.log.format, LogFormat::Text);
    }

    #[test]
    fn postgres_backend_is_selectable() {
        let config = load(&[
            ("STORAGE_BACKEND", "postgres"),
            ("DATABASE_URL", "postgres://db/posts"),
            ("DATABASE_MAX_CONNECTIONS", "3"),
        ])
        .unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert_eq!(config.storage.database_url, "postgres://db/posts");
        assert_eq!(config.storage.max_connections, 3);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(load(&[("POST_SERVICE_PORT", "eighty")]).is_err());
        assert!(load(&[("STORAGE_BACKEND", "mongo")]).is_err());
    }

    #[test]
    fn production_requires_explicit_origins() {
        assert!(load(&[("APP_ENV", "production")]).is_err());
        assert!(load(&[("APP_ENV", "production"), ("CORS_ALLOWED_ORIGINS", "*")]).is_err());
        assert!(load(&[
            ("APP_ENV", "production"),
            ("CORS_ALLOWED_ORIGINS", "https://reckue.com"),
        ])
        .is_ok());
    }
}
