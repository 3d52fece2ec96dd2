use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

/// Process configuration, built once in `main` and carried in `AppState`.
///
/// The signing secret is deliberately NOT exposed through any global; it is
/// handed to `TokenService` at construction and nowhere else.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub debug: bool,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub default_page_size: i64,
    pub max_page_size: i64,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl AppConfig {
    /// Load configuration from the environment. `DATABASE_URL` and
    /// `JWT_SECRET` are required; everything else has defaults that
    /// individual variables can override.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?;

        Ok(Self::defaults(database_url, jwt_secret).with_env_overrides())
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("APP_DEBUG") {
            self.debug = v.parse().unwrap_or(self.debug);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            self.database.acquire_timeout_secs =
                v.parse().unwrap_or(self.database.acquire_timeout_secs);
        }

        // API overrides
        if let Ok(v) = env::var("KPA_API_PORT").or_else(|_| env::var("PORT")) {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("API_DEFAULT_PAGE_SIZE") {
            self.api.default_page_size = v.parse().unwrap_or(self.api.default_page_size);
        }
        if let Ok(v) = env::var("API_MAX_PAGE_SIZE") {
            self.api.max_page_size = v.parse().unwrap_or(self.api.max_page_size);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_TTL_HOURS") {
            self.security.token_ttl_hours = v.parse().unwrap_or(self.security.token_ttl_hours);
        }

        self
    }

    fn defaults(database_url: String, jwt_secret: String) -> Self {
        Self {
            debug: false,
            database: DatabaseConfig {
                url: database_url,
                max_connections: 10,
                acquire_timeout_secs: 30,
            },
            api: ApiConfig {
                port: 8000,
                default_page_size: 10,
                max_page_size: 100,
            },
            security: SecurityConfig {
                jwt_secret,
                token_ttl_hours: 24,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::defaults("postgres://localhost/kpa".into(), "secret".into());
        assert!(!config.debug);
        assert_eq!(config.api.port, 8000);
        assert_eq!(config.api.default_page_size, 10);
        assert_eq!(config.api.max_page_size, 100);
        assert_eq!(config.security.token_ttl_hours, 24);
        assert_eq!(config.database.max_connections, 10);
    }
}
