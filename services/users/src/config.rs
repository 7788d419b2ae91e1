//! Service configuration
//!
//! Loaded with the `config` crate from environment variables prefixed with
//! `USERS`, using `__` as the nesting separator:
//!
//! - `USERS__SERVER__HOST` / `USERS__SERVER__PORT`
//! - `USERS__STORAGE` (`postgres` or `memory`)
//! - `USERS__NOTIFIER__WEBHOOK_URL`
//! - `USERS__LOGGING__FORMAT` (`pretty` or `json`)
//!
//! Database settings are read separately by `common::database::DatabaseConfig`.

use serde::Deserialize;

/// Top-level service configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageBackend,
    pub notifier: NotifierConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where user records are kept
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Process-local storage, lost on restart
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Mail webhook receiving password reset requests; log-only when unset
    pub webhook_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("USERS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "USERS__SERVER__HOST",
        "USERS__SERVER__PORT",
        "USERS__STORAGE",
        "USERS__NOTIFIER__WEBHOOK_URL",
        "USERS__LOGGING__FORMAT",
    ];

    fn clear_env() {
        for var in VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_environment() {
        clear_env();

        let config = AppConfig::load().unwrap();
        assert_eq!(config.server.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert!(config.notifier.webhook_url.is_none());
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        clear_env();
        unsafe {
            std::env::set_var("USERS__SERVER__HOST", "127.0.0.1");
            std::env::set_var("USERS__SERVER__PORT", "8081");
            std::env::set_var("USERS__STORAGE", "memory");
            std::env::set_var("USERS__NOTIFIER__WEBHOOK_URL", "http://mailer.local/reset");
            std::env::set_var("USERS__LOGGING__FORMAT", "json");
        }

        let config = AppConfig::load().unwrap();
        assert_eq!(config.server.bind_address(), "127.0.0.1:8081");
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(
            config.notifier.webhook_url.as_deref(),
            Some("http://mailer.local/reset")
        );
        assert_eq!(config.logging.format, LogFormat::Json);

        clear_env();
    }
}
