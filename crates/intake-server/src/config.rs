// File: src/config.rs
// Purpose: Configuration parsing from intake.toml

use anyhow::{Context, Result};
use intake_validation::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

/// Where submissions and activity logs are written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_submissions_dir")]
    pub submissions_dir: PathBuf,

    #[serde(default = "default_logs_dir")]
    pub logs_dir: PathBuf,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

// Default values
fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_submissions_dir() -> PathBuf {
    PathBuf::from("submissions")
}

fn default_logs_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            submissions_dir: default_submissions_dir(),
            logs_dir: default_logs_dir(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load from `INTAKE_CONFIG` (default ./intake.toml), then apply
    /// `INTAKE_HOST` / `INTAKE_PORT` overrides
    pub fn load_default() -> Result<Self> {
        let path = std::env::var("INTAKE_CONFIG").unwrap_or_else(|_| "intake.toml".to_string());
        let mut config = Self::load(path)?;

        if let Ok(host) = std::env::var("INTAKE_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("INTAKE_PORT") {
            config.server.port = port
                .parse()
                .with_context(|| format!("Invalid INTAKE_PORT: {}", port))?;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.storage.submissions_dir, PathBuf::from("submissions"));
        assert_eq!(config.storage.logs_dir, PathBuf::from("logs"));
        assert_eq!(config.validation, ValidationConfig::default());
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<AppConfig>("").unwrap_or_default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.validation.max_message_length, 500);
    }

    #[test]
    fn test_validation_section() {
        let toml = r#"
            [server]
            port = 8080

            [validation]
            max_message_length = 1000
            min_age = 16
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.validation.max_message_length, 1000);
        assert_eq!(config.validation.min_age, 16);
        assert_eq!(config.validation.max_age, 120);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[storage]\nlogs_dir = \"var/log\"").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.storage.logs_dir, PathBuf::from("var/log"));
        assert_eq!(config.storage.submissions_dir, PathBuf::from("submissions"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();
        assert!(AppConfig::load(file.path()).is_err());
    }
}
