//! # Configuration Management for ToyHaus
//!
//! This crate provides centralized configuration structures for all ToyHaus components,
//! including the HTTP server, the JSON collection files, query paging and login tokens.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::{AppConfig, QueryConfig};
//!
//! let mut config = AppConfig::default();
//! config.query = QueryConfig::new(20);
//! assert_eq!(config.query.page_size, 20);
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 3030
//! static_dir = "public"
//! cors_origins = ["http://localhost:5173"]
//! visited_cookie_max_age_seconds = 600
//! max_visited = 10
//!
//! [storage]
//! data_dir = "data"
//! item_file = "item.json"
//! toy_file = "toy.json"
//! user_file = "user.json"
//!
//! [query]
//! page_size = 10
//!
//! [auth]
//! secret = "secret1234"
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from TOYHAUS_CONFIG or ./toyhaus.toml, defaults otherwise
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::{
    env,
    path::{Path, PathBuf},
};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./toyhaus.toml";
const CONFIG_PATH_VAR: &str = "TOYHAUS_CONFIG";
const SECRET_VAR: &str = "SECRET1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Environment variable error: {0}")]
    Env(#[from] env::VarError),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub query: QueryConfig,
    pub auth: AuthConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: Option<String>,
    pub cors_origins: Vec<String>,
    pub visited_cookie_max_age_seconds: u64,
    pub max_visited: usize,
}

/// Location of the JSON collection documents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    pub item_file: String,
    pub toy_file: String,
    pub user_file: String,
}

/// Listing query configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub page_size: usize,
}

/// Login token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub secret: String,
}

impl AppConfig {
    /// Load configuration from the TOML file named in .env / TOYHAUS_CONFIG,
    /// then ./toyhaus.toml, then built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is fine, a malformed one is not
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }

        let mut config = if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::read_file(&config_path)?
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::read_file(DEFAULT_CONFIG_PATH)?
        } else {
            Self::default()
        };

        if let Ok(secret) = env::var(SECRET_VAR) {
            config.auth.secret = secret;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    fn read_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Server validations
        if self.server.host.is_empty() {
            return Err(ConfigError::Invalid(
                "Server host cannot be empty".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Invalid(
                "Server port cannot be zero".to_string(),
            ));
        }
        if self.server.max_visited == 0 {
            return Err(ConfigError::Invalid(
                "Server max_visited must be greater than 0".to_string(),
            ));
        }

        // Storage validations
        if self.storage.data_dir.is_empty() {
            return Err(ConfigError::Invalid(
                "Storage data_dir cannot be empty".to_string(),
            ));
        }
        for (name, file) in [
            ("item_file", &self.storage.item_file),
            ("toy_file", &self.storage.toy_file),
            ("user_file", &self.storage.user_file),
        ] {
            if file.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "Storage {} cannot be empty",
                    name
                )));
            }
        }

        // Query validations
        if self.query.page_size == 0 {
            return Err(ConfigError::Invalid(
                "Query page_size must be greater than 0".to_string(),
            ));
        }

        // Auth validations
        if self.auth.secret.is_empty() {
            return Err(ConfigError::Invalid(
                "Auth secret cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3030,
            static_dir: Some("public".to_string()),
            cors_origins: vec![
                "http://127.0.0.1:8080".to_string(),
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:5173".to_string(),
                "http://localhost:5173".to_string(),
            ],
            visited_cookie_max_age_seconds: 10 * 60,
            max_visited: 10,
        }
    }
}

impl ServerConfig {
    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            item_file: "item.json".to_string(),
            toy_file: "toy.json".to_string(),
            user_file: "user.json".to_string(),
        }
    }
}

impl StorageConfig {
    /// Create a storage configuration rooted at `data_dir` with the default file names
    pub fn new(data_dir: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn item_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.item_file)
    }

    pub fn toy_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.toy_file)
    }

    pub fn user_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.user_file)
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

impl QueryConfig {
    /// Create a new query configuration
    pub fn new(page_size: usize) -> Self {
        Self { page_size }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: "secret1234".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 3030);
        assert_eq!(config.query.page_size, 10);
        assert_eq!(config.storage.item_path(), Path::new("data").join("item.json"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[query]\npage_size = 25\n\n[server]\nport = 8080").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.query.page_size, 25);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.storage.toy_file, "toy.json");
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[query]\npage_size = 0").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let mut config = AppConfig::default();
        config.auth.secret.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[query\npage_size = ").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
