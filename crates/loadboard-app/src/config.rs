//! Configuration management for the load board
//!
//! Config stored at: ~/.config/loadboard/config.json
//!
//! `DATABASE_URL` and `LOADBOARD_PORT` override the file when set.

use std::path::{Path, PathBuf};

use loadboard_domain::service::DEFAULT_SEARCH_LIMIT;
use loadboard_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const APP_DIR: &str = "loadboard";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file (defaults to the user data directory)
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Address the HTTP service binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port the HTTP service listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Row limit for searches that do not pass one
    #[serde(default = "default_search_limit")]
    pub default_search_limit: u32,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_search_limit() -> u32 {
    DEFAULT_SEARCH_LIMIT
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            bind_address: default_bind_address(),
            port: default_port(),
            default_search_limit: default_search_limit(),
            output_format: default_output_format(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the database file path
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.database_path {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(data_dir.join("loads.db"))
    }

    /// Socket address string for the HTTP service
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Load config from file (or defaults), then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_overrides(
            std::env::var("DATABASE_URL").ok(),
            std::env::var("LOADBOARD_PORT").ok(),
        );
        Ok(config)
    }

    /// Load config from a specific file, or defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)).into())
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    /// Apply process-wide overrides. Invalid values are logged and ignored.
    pub fn apply_overrides(&mut self, database_url: Option<String>, port: Option<String>) {
        if let Some(url) = database_url.filter(|u| !u.trim().is_empty()) {
            let path = database_path_from_url(url.trim());
            info!("Using database from DATABASE_URL: {}", path.display());
            self.database_path = Some(path);
        }

        if let Some(raw) = port {
            match raw.trim().parse::<u16>() {
                Ok(port) => self.port = port,
                Err(e) => warn!("Invalid LOADBOARD_PORT value {raw:?}: {e}, using {}", self.port),
            }
        }
    }
}

/// Accepts a plain path or a `sqlite:` / `sqlite://` URL
fn database_path_from_url(url: &str) -> PathBuf {
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    PathBuf::from(path)
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Load Board Configuration")?;
        writeln!(f, "========================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Database:       {}",
            self.database_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Listen on:      {}", self.listen_address())?;
        writeln!(f, "Search limit:   {}", self.default_search_limit)?;
        writeln!(f, "Output format:  {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.port, 3000);
        assert_eq!(config.default_search_limit, 50);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"port": 8080}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            database_path: Some(PathBuf::from("/tmp/loads.db")),
            output_format: OutputFormat::Json,
            ..Default::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse configuration"));
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config.apply_overrides(Some("sqlite:///var/lib/loads.db".to_string()), Some("9000".to_string()));
        assert_eq!(config.database_path, Some(PathBuf::from("/var/lib/loads.db")));
        assert_eq!(config.port, 9000);

        config.apply_overrides(Some("sqlite:loads.db".to_string()), Some("not-a-port".to_string()));
        assert_eq!(config.database_path, Some(PathBuf::from("loads.db")));
        assert_eq!(config.port, 9000);

        config.apply_overrides(Some("  ".to_string()), None);
        assert_eq!(config.database_path, Some(PathBuf::from("loads.db")));
    }

    #[test]
    fn test_listen_address() {
        let config = Config {
            bind_address: "127.0.0.1".to_string(),
            port: 4000,
            ..Default::default()
        };
        assert_eq!(config.listen_address(), "127.0.0.1:4000");
    }
}
