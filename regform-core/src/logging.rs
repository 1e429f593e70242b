//! src/logging.rs
//! ============================================================================
//! # Logger: JSON-lines tracing to a rolling file
//!
//! The terminal belongs to the form, so nothing is ever logged to stdout or
//! stderr. Events go through a non-blocking rolling file appender; the
//! returned [`WorkerGuard`] must live as long as the process.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub log_dir: PathBuf,
    pub log_file_prefix: String,
    pub log_level: String,
    pub max_log_files: usize,
    pub rotation: LogRotation,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum LogRotation {
    Never,
    Daily,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("./logs"),
            log_file_prefix: "regform".to_string(),
            log_level: "info".to_string(),
            max_log_files: 10,
            rotation: LogRotation::Daily,
        }
    }
}

impl LoggerConfig {
    /// Logging section of the app config, relative dirs anchored at `base`.
    pub fn from_app_config(config: &Config, base: &Path) -> Self {
        Self {
            log_dir: config.log_dir(base),
            log_file_prefix: config.logging.file_prefix.clone(),
            log_level: config.logging.level.clone(),
            max_log_files: config.logging.max_log_files,
            rotation: LogRotation::Daily,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Logger already initialized")]
    AlreadyInitialized,

    #[error("Invalid log directory: {0}")]
    InvalidLogDirectory(String),

    #[error("Failed to create log directory: {0}")]
    DirectoryCreationFailed(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

fn validate_config(config: &LoggerConfig) -> Result<(), LoggingError> {
    if config.log_file_prefix.trim().is_empty() {
        return Err(LoggingError::ConfigError(
            "log file prefix must not be empty".into(),
        ));
    }
    if config.max_log_files == 0 {
        return Err(LoggingError::ConfigError(
            "max_log_files must be at least 1".into(),
        ));
    }
    if config.log_dir.as_os_str().is_empty() {
        return Err(LoggingError::InvalidLogDirectory("empty path".into()));
    }
    Ok(())
}

/// Rolling `.jsonl` appender in the configured directory.
pub fn file_appender(config: &LoggerConfig) -> Result<RollingFileAppender, LoggingError> {
    validate_config(config)?;
    std::fs::create_dir_all(&config.log_dir)?;

    let rotation = match config.rotation {
        LogRotation::Never => Rotation::NEVER,
        LogRotation::Daily => Rotation::DAILY,
    };

    RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(config.log_file_prefix.as_str())
        .filename_suffix("jsonl")
        .max_log_files(config.max_log_files)
        .build(&config.log_dir)
        .map_err(|e| LoggingError::InvalidLogDirectory(e.to_string()))
}

pub struct Logger;

impl Logger {
    /// Installs the global subscriber. `RUST_LOG` overrides the configured level.
    pub fn init(config: &LoggerConfig) -> Result<WorkerGuard, LoggingError> {
        let appender = file_appender(config)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.log_level))
            .map_err(|e| LoggingError::ConfigError(e.to_string()))?;

        let json_layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_ansi(false)
            .with_writer(non_blocking);

        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .try_init()
            .map_err(|_| LoggingError::AlreadyInitialized)?;

        info!(
            marker = "LOGGER_READY",
            log_dir = %config.log_dir.display(),
            level = %config.log_level,
            "Logging initialised"
        );
        Ok(guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_rejects_bad_config() {
        let empty_prefix = LoggerConfig {
            log_file_prefix: " ".into(),
            ..LoggerConfig::default()
        };
        assert!(matches!(
            validate_config(&empty_prefix),
            Err(LoggingError::ConfigError(_))
        ));

        let no_files = LoggerConfig {
            max_log_files: 0,
            ..LoggerConfig::default()
        };
        assert!(validate_config(&no_files).is_err());
    }

    #[test]
    fn test_appender_writes_into_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggerConfig {
            log_dir: dir.path().join("logs"),
            rotation: LogRotation::Never,
            ..LoggerConfig::default()
        };

        let mut appender = file_appender(&config).unwrap();
        appender.write_all(b"{\"msg\":\"hello\"}\n").unwrap();
        appender.flush().unwrap();

        let written: Vec<_> = std::fs::read_dir(&config.log_dir)
            .unwrap()
            .filter_map(Result::ok)
            .collect();
        assert_eq!(written.len(), 1);
        assert!(
            written[0]
                .file_name()
                .to_string_lossy()
                .starts_with("regform")
        );
    }

    #[test]
    fn test_from_app_config() {
        let config = LoggerConfig::from_app_config(&Config::default(), Path::new("/var/regform"));
        assert_eq!(config.log_dir, PathBuf::from("/var/regform/logs"));
        assert_eq!(config.log_level, "info");
    }
}
