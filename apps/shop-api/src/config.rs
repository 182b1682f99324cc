//! Shop API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::fmt;
use std::net::SocketAddr;

/// Shop API configuration.
#[derive(Clone)]
pub struct ApiConfig {
    /// HTTP server port
    pub http_port: u16,

    /// Interface to bind, e.g. `0.0.0.0` or `127.0.0.1`
    pub bind_address: String,

    /// SQLite database file
    pub database_path: String,

    /// Connection pool size
    pub db_max_connections: u32,

    /// Bearer key for admin routes. Without one, admin routes always answer 401.
    pub admin_api_key: Option<String>,

    /// Include internal error details in 500 responses (development only)
    pub expose_error_details: bool,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ApiConfig {
            http_port: lookup("HTTP_PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?,

            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0".to_string()),

            database_path: lookup("DATABASE_PATH").unwrap_or_else(|| "./shop.db".to_string()),

            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,

            admin_api_key: lookup("ADMIN_API_KEY").filter(|key| !key.trim().is_empty()),

            expose_error_details: lookup("EXPOSE_ERROR_DETAILS")
                .unwrap_or_else(|| "false".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("EXPOSE_ERROR_DETAILS".to_string()))?,

            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Socket address the server listens on.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_address, self.http_port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("BIND_ADDRESS".to_string()))
    }
}

// The admin key must never reach the logs.
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("http_port", &self.http_port)
            .field("bind_address", &self.bind_address)
            .field("database_path", &self.database_path)
            .field("db_max_connections", &self.db_max_connections)
            .field(
                "admin_api_key",
                &self.admin_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("expose_error_details", &self.expose_error_details)
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.http_port, 8080);
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.database_path, "./shop.db");
        assert_eq!(config.db_max_connections, 5);
        assert!(config.admin_api_key.is_none());
        assert!(!config.expose_error_details);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("HTTP_PORT", "9090"),
            ("BIND_ADDRESS", "127.0.0.1"),
            ("ADMIN_API_KEY", "s3cret"),
            ("EXPOSE_ERROR_DETAILS", "true"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:9090");
        assert_eq!(config.admin_api_key.as_deref(), Some("s3cret"));
        assert!(config.expose_error_details);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("HTTP_PORT", "eighty")]),
            Err(ConfigError::InvalidValue(v)) if v == "HTTP_PORT"
        ));
        assert!(load(&[("DB_MAX_CONNECTIONS", "0")]).is_err());
        for value in ["1", "yes", "TRUE "] {
            assert!(matches!(
                load(&[("EXPOSE_ERROR_DETAILS", value)]),
                Err(ConfigError::InvalidValue(v)) if v == "EXPOSE_ERROR_DETAILS"
            ));
        }
        assert!(load(&[("BIND_ADDRESS", "not an ip")])
            .unwrap()
            .socket_addr()
            .is_err());
    }

    #[test]
    fn test_blank_admin_key_is_unset() {
        let config = load(&[("ADMIN_API_KEY", "  ")]).unwrap();
        assert!(config.admin_api_key.is_none());
    }

    #[test]
    fn test_debug_redacts_admin_key() {
        let config = load(&[("ADMIN_API_KEY", "s3cret")]).unwrap();
        let debug = format!("{:?}", config);

        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("<redacted>"));
    }
}
