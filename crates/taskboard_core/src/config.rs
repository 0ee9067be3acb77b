//! Runtime configuration.
//!
//! # Responsibility
//! - Describe backend latency, logging and preference storage settings.
//! - Load settings from JSON, falling back to defaults for missing fields.
//!
//! # Invariants
//! - An empty JSON object yields `AppConfig::default()`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Simulated round-trip applied to every data access call.
pub const DEFAULT_LATENCY_MS: u64 = 300;

/// Top-level settings for a taskboard session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    /// File logging is disabled when absent.
    pub logging: Option<LoggingConfig>,
    /// Preferences live in memory only when absent.
    pub preferences_db: Option<PathBuf>,
}

/// Settings for the simulated data access layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub latency_ms: u64,
    /// Load the demo users/projects/tasks on startup.
    pub seed_fixtures: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            latency_ms: DEFAULT_LATENCY_MS,
            seed_fixtures: true,
        }
    }
}

impl BackendConfig {
    /// Configuration with no simulated latency and an empty store.
    pub fn immediate() -> Self {
        Self {
            latency_ms: 0,
            seed_fixtures: false,
        }
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Settings passed to `logging::init_logging`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`.
    #[serde(default = "default_level_string")]
    pub level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
}

fn default_level_string() -> String {
    crate::logging::default_log_level().to_string()
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl AppConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, BackendConfig, ConfigError, DEFAULT_LATENCY_MS};
    use std::time::Duration;

    #[test]
    fn empty_object_uses_defaults() {
        let config = AppConfig::from_json_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(
            config.backend.latency(),
            Duration::from_millis(DEFAULT_LATENCY_MS)
        );
        assert!(config.backend.seed_fixtures);
    }

    #[test]
    fn partial_backend_section_keeps_other_defaults() {
        let config = AppConfig::from_json_str(r#"{"backend": {"latency_ms": 5}}"#).unwrap();
        assert_eq!(
            config.backend,
            BackendConfig {
                latency_ms: 5,
                seed_fixtures: true,
            }
        );
    }

    #[test]
    fn logging_level_defaults_to_build_mode_level() {
        let config = AppConfig::from_json_str(r#"{"logging": {"log_dir": "/tmp/taskboard"}}"#)
            .unwrap();
        let logging = config.logging.unwrap();
        assert_eq!(logging.level, crate::logging::default_log_level());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = AppConfig::from_json_str("{backend").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
