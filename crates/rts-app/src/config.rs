//! Configuration management for rts-confirm
//!
//! Config stored at: ~/.config/rts-confirm/config.toml
//!
//! Endpoint URLs are signed trigger URLs. They can be kept out of the file
//! and supplied through `RTS_AUTH_URL`, `RTS_SUBMIT_URL` and
//! `RTS_LINK_OPENED_URL` instead.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use rts_domain::service::LoginThrottle;
use rts_infra::WorkflowEndpoints;
use rts_types::{ConfigError, OutputFormat, Result};

const APP_DIR_NAME: &str = "rts-confirm";
const CONFIG_FILE_NAME: &str = "config.toml";

pub const ENV_AUTH_URL: &str = "RTS_AUTH_URL";
pub const ENV_SUBMIT_URL: &str = "RTS_SUBMIT_URL";
pub const ENV_LINK_OPENED_URL: &str = "RTS_LINK_OPENED_URL";

/// Where failed login attempts are kept
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptStorage {
    /// JSON file in the store directory, survives restarts
    #[default]
    File,
    /// Process memory only
    Memory,
}

impl std::fmt::Display for AttemptStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptStorage::File => write!(f, "file"),
            AttemptStorage::Memory => write!(f, "memory"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Failed login storage variant
    #[serde(default)]
    pub attempt_storage: AttemptStorage,

    /// Store directory override
    #[serde(default)]
    pub store_dir: Option<PathBuf>,

    /// Connect and request timeout for workflow calls
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Default output format (table, json, csv)
    #[serde(default)]
    pub output_format: OutputFormat,

    #[serde(default)]
    pub endpoints: EndpointConfig,

    #[serde(default)]
    pub time_slots: TimeSlotConfig,

    #[serde(default)]
    pub security: SecurityConfig,
}

/// Workflow trigger URLs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default)]
    pub auth_url: String,
    #[serde(default)]
    pub submit_url: String,
    #[serde(default)]
    pub link_opened_url: String,
}

/// Slot table granularity in minutes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlotConfig {
    #[serde(default = "default_arrival_interval")]
    pub arrival_interval: u32,
    #[serde(default = "default_departure_interval")]
    pub departure_interval: u32,
}

/// Login throttle settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(default = "default_max_login_attempts")]
    pub max_login_attempts: u32,
    #[serde(default = "default_login_attempt_window_secs")]
    pub login_attempt_window_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_arrival_interval() -> u32 {
    120
}

fn default_departure_interval() -> u32 {
    15
}

fn default_max_login_attempts() -> u32 {
    5
}

fn default_login_attempt_window_secs() -> u64 {
    15 * 60
}

impl Default for TimeSlotConfig {
    fn default() -> Self {
        Self {
            arrival_interval: default_arrival_interval(),
            departure_interval: default_departure_interval(),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_login_attempts: default_max_login_attempts(),
            login_attempt_window_secs: default_login_attempt_window_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            attempt_storage: AttemptStorage::default(),
            store_dir: None,
            request_timeout_secs: default_request_timeout_secs(),
            output_format: OutputFormat::default(),
            endpoints: EndpointConfig::default(),
            time_slots: TimeSlotConfig::default(),
            security: SecurityConfig::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR_NAME);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Get the store directory path
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.store_dir {
            return Ok(dir.clone());
        }

        let store_dir = dirs::data_local_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR_NAME);
        Ok(store_dir)
    }

    /// Load config from the default path, or defaults when absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, or defaults when absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Replace endpoint URLs with non-empty `RTS_*_URL` environment values
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let targets = [
            (ENV_AUTH_URL, &mut self.endpoints.auth_url),
            (ENV_SUBMIT_URL, &mut self.endpoints.submit_url),
            (ENV_LINK_OPENED_URL, &mut self.endpoints.link_opened_url),
        ];
        for (key, target) in targets {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *target = value.trim().to_string();
            }
        }
        self
    }

    pub fn throttle(&self) -> LoginThrottle {
        let window_secs = i64::try_from(self.security.login_attempt_window_secs)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 1000);
        LoginThrottle::new(
            self.security.max_login_attempts,
            chrono::Duration::seconds(window_secs),
        )
    }

    pub fn workflow_endpoints(&self) -> WorkflowEndpoints {
        WorkflowEndpoints {
            auth_url: self.endpoints.auth_url.clone(),
            submit_url: self.endpoints.submit_url.clone(),
            link_opened_url: self.endpoints.link_opened_url.clone(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

fn endpoint_state(url: &str) -> &'static str {
    if url.trim().is_empty() {
        "(not set)"
    } else {
        "(configured)"
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "RTS Confirm Configuration")?;
        writeln!(f, "=========================")?;
        writeln!(f)?;
        writeln!(f, "Auth endpoint:        {}", endpoint_state(&self.endpoints.auth_url))?;
        writeln!(f, "Submit endpoint:      {}", endpoint_state(&self.endpoints.submit_url))?;
        writeln!(
            f,
            "Link-opened endpoint: {}",
            endpoint_state(&self.endpoints.link_opened_url)
        )?;
        writeln!(f, "Request timeout:      {}s", self.request_timeout_secs)?;
        writeln!(f, "Arrival slots:        {} min", self.time_slots.arrival_interval)?;
        writeln!(f, "Departure slots:      {} min", self.time_slots.departure_interval)?;
        writeln!(f, "Max login attempts:   {}", self.security.max_login_attempts)?;
        writeln!(
            f,
            "Attempt window:       {} min",
            self.security.login_attempt_window_secs / 60
        )?;
        writeln!(f, "Attempt storage:      {}", self.attempt_storage)?;
        writeln!(
            f,
            "Store dir:            {}",
            self.store_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Output format:        {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:          {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.time_slots.arrival_interval, 120);
        assert_eq!(config.time_slots.departure_interval, 15);
        assert_eq!(config.security.max_login_attempts, 5);
        assert_eq!(config.throttle().window, chrono::Duration::minutes(15));
        assert_eq!(config.attempt_storage, AttemptStorage::File);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "attempt_storage = \"memory\"\n\n[security]\nmax_login_attempts = 3\n",
        )
        .unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.attempt_storage, AttemptStorage::Memory);
        assert_eq!(config.security.max_login_attempts, 3);
        assert_eq!(config.security.login_attempt_window_secs, 900);
        assert_eq!(config.time_slots.arrival_interval, 120);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.endpoints.submit_url = "https://example.invalid/submit".to_string();
        config.store_dir = Some(dir.path().join("store"));
        config.output_format = OutputFormat::Json;
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "request_timeout_secs = \"soon\"").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(rts_types::Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.endpoints.auth_url = "https://file.invalid/auth".to_string();
        let config = config.with_overrides_from(|key| match key {
            ENV_SUBMIT_URL => Some(" https://env.invalid/submit ".to_string()),
            ENV_AUTH_URL => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.endpoints.auth_url, "https://file.invalid/auth");
        assert_eq!(config.endpoints.submit_url, "https://env.invalid/submit");
        assert_eq!(config.endpoints.link_opened_url, "");
    }

    #[test]
    fn test_display_hides_urls() {
        let mut config = Config::default();
        config.endpoints.auth_url = "https://secret.invalid/?sig=abc".to_string();
        let shown = config.to_string();
        assert!(!shown.contains("sig=abc"));
        assert!(shown.contains("(configured)"));
    }
}
