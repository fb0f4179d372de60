//! Application configuration file support.
//!
//! Settings are read from a TOML file (`jornada.toml`) and then overridden by
//! environment variables. Every section is optional and falls back to
//! defaults, so an empty file (or no file at all) yields a working setup.
//!
//! ```toml
//! [repository]
//! type = "local"
//! seed_path = "seed.json"
//!
//! [school_day]
//! opens_at = "07:00"
//! closes_at = "20:00"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::db::factory::RepositoryType;
use crate::db::repository::RepositoryError;
use crate::models::time::{format_clock_time, parse_clock_time};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub school_day: SchoolDaySettings,
    #[serde(default)]
    pub server: ServerSettings,
}

/// Repository backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
    /// JSON dataset loaded into the local repository at startup.
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
            seed_path: None,
        }
    }
}

/// Permitted school-day window for block times, as `HH:MM` strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolDaySettings {
    #[serde(default = "default_opens_at")]
    pub opens_at: String,
    #[serde(default = "default_closes_at")]
    pub closes_at: String,
}

impl Default for SchoolDaySettings {
    fn default() -> Self {
        Self {
            opens_at: default_opens_at(),
            closes_at: default_closes_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_repo_type() -> String {
    "local".to_string()
}

fn default_opens_at() -> String {
    "07:00".to_string()
}

fn default_closes_at() -> String {
    "20:00".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Parsed school-day window. Every block must fit inside `[opens_at, closes_at]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchoolDayWindow {
    pub opens_at: NaiveTime,
    pub closes_at: NaiveTime,
}

impl SchoolDayWindow {
    pub fn new(opens_at: NaiveTime, closes_at: NaiveTime) -> Result<Self, String> {
        if opens_at >= closes_at {
            return Err(format!(
                "School day opens at {} but closes at {}",
                format_clock_time(opens_at),
                format_clock_time(closes_at)
            ));
        }
        Ok(Self {
            opens_at,
            closes_at,
        })
    }

    pub fn contains(&self, start: NaiveTime, end: NaiveTime) -> bool {
        start >= self.opens_at && end <= self.closes_at
    }
}

impl Default for SchoolDayWindow {
    fn default() -> Self {
        Self {
            opens_at: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or(NaiveTime::MIN),
            closes_at: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(AppConfig)` if successful
    /// * `Err(RepositoryError::Configuration)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RepositoryError> {
        toml::from_str(content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load configuration from the first standard location that exists.
    ///
    /// Searches for `jornada.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(Some(AppConfig))` if a file was found and parsed
    /// * `Ok(None)` if no file exists in any location
    pub fn from_default_location() -> Result<Option<Self>, RepositoryError> {
        let search_paths = [
            PathBuf::from("jornada.toml"),
            PathBuf::from("backend/jornada.toml"),
            PathBuf::from("../jornada.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Resolve the effective configuration: `JORNADA_CONFIG` (if set), else
    /// the default locations, else defaults; then environment overrides.
    pub fn load() -> Result<Self, RepositoryError> {
        let mut config = match env::var("JORNADA_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::from_default_location()?.unwrap_or_default(),
        };
        config.apply_env_overrides()?;
        config.school_day_window()?;
        config.repository_type()?;
        Ok(config)
    }

    /// Apply `HOST`, `PORT`, `REPOSITORY_TYPE`, `JORNADA_SEED_PATH`,
    /// `SCHOOL_DAY_OPENS_AT` and `SCHOOL_DAY_CLOSES_AT`.
    pub fn apply_env_overrides(&mut self) -> Result<(), RepositoryError> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = port.parse().map_err(|_| {
                RepositoryError::configuration(format!(
                    "PORT must be a valid port number, got '{}'",
                    port
                ))
            })?;
        }
        if let Ok(repo_type) = env::var("REPOSITORY_TYPE") {
            self.repository.repo_type = repo_type;
        }
        if let Ok(seed) = env::var("JORNADA_SEED_PATH") {
            self.repository.seed_path = Some(PathBuf::from(seed));
        }
        if let Ok(opens) = env::var("SCHOOL_DAY_OPENS_AT") {
            self.school_day.opens_at = opens;
        }
        if let Ok(closes) = env::var("SCHOOL_DAY_CLOSES_AT") {
            self.school_day.closes_at = closes;
        }
        Ok(())
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, RepositoryError> {
        RepositoryType::from_str(&self.repository.repo_type).map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })
    }

    /// Parse the school-day window settings.
    pub fn school_day_window(&self) -> Result<SchoolDayWindow, RepositoryError> {
        let opens_at = parse_clock_time(&self.school_day.opens_at).ok_or_else(|| {
            RepositoryError::configuration(format!(
                "school_day.opens_at '{}' is not a HH:MM time",
                self.school_day.opens_at
            ))
        })?;
        let closes_at = parse_clock_time(&self.school_day.closes_at).ok_or_else(|| {
            RepositoryError::configuration(format!(
                "school_day.closes_at '{}' is not a HH:MM time",
                self.school_day.closes_at
            ))
        })?;
        SchoolDayWindow::new(opens_at, closes_at).map_err(RepositoryError::configuration)
    }

    /// `host:port` bind address string.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
