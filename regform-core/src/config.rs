//! src/config.rs
//! ============================================================================
//! # Config: Application Configuration Loader and Saver
//!
//! Loads and saves settings as TOML from the platform config path resolved by
//! the [`directories`](https://docs.rs/directories) crate. A missing file is
//! written out with defaults on first start.
//!
//! ## Example
//! ```rust,ignore
//! let config = Config::load().await?;
//! config.save_to(&Config::config_path()?).await?;
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tokio::fs as TokioFs;
use tracing::info;

use crate::error::AppError;

pub const DEFAULT_ENDPOINT: &str = "https://form-backend-tuue.onrender.com/api";

/// Registration endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Absolute URL the record is POSTed to.
    pub url: String,

    /// Request timeout; unset means the transport's own defaults apply.
    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }
}

/// Auto-dismiss delay per notification severity; a missing key keeps its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub success: Option<Duration>,

    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub warning: Option<Duration>,

    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub error: Option<Duration>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            success: Some(Duration::from_secs(3)),
            warning: Some(Duration::from_secs(5)),
            error: Some(Duration::from_secs(8)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub level: String,

    /// Log directory; relative paths resolve against the config directory.
    pub dir: PathBuf,

    pub file_prefix: String,

    pub max_log_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: PathBuf::from("logs"),
            file_prefix: "regform".to_string(),
            max_log_files: 10,
        }
    }
}

/// Main configuration struct for the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads config from the platform config dir, or writes and returns defaults.
    ///
    /// The config is expected at `$XDG_CONFIG_HOME/regform/config.toml`
    /// (Linux), or equivalent on Windows/macOS.
    pub async fn load() -> Result<Self, AppError> {
        Self::load_from(&Self::config_path()?).await
    }

    pub async fn load_from(path: &Path) -> Result<Self, AppError> {
        if TokioFs::try_exists(path)
            .await
            .map_err(|e| AppError::config_io(path, e))?
        {
            info!("Loading config from {}", path.display());
            let text = TokioFs::read_to_string(path)
                .await
                .map_err(|e| AppError::config_io(path, e))?;
            let cfg: Self = toml::from_str(&text)?;

            Ok(cfg)
        } else {
            info!(
                "No config file found at {}, using default configuration. Creating it now.",
                path.display()
            );

            let default_config = Self::default();
            default_config.save_to(path).await?;

            Ok(default_config)
        }
    }

    pub async fn save_to(&self, path: &Path) -> Result<(), AppError> {
        info!("Saving config to {}", path.display());

        if let Some(parent) = path.parent() {
            TokioFs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::config_io(parent, e))?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        TokioFs::write(path, toml_str)
            .await
            .map_err(|e| AppError::config_io(path, e))?;

        Ok(())
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> Result<PathBuf, AppError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn config_dir() -> Result<PathBuf, AppError> {
        let proj_dirs =
            ProjectDirs::from("org", "regform", "regform").ok_or(AppError::ConfigDirUnavailable)?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }

    /// Log directory with relative paths anchored at `base`.
    pub fn log_dir(&self, base: &Path) -> PathBuf {
        if self.logging.dir.is_absolute() {
            self.logging.dir.clone()
        } else {
            base.join(&self.logging.dir)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_written_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config::load_from(&path).await.unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let reloaded = Config::load_from(&path).await.unwrap();
        assert_eq!(reloaded, cfg);
    }

    #[tokio::test]
    async fn test_partial_file_uses_section_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        TokioFs::write(
            &path,
            r#"
[endpoint]
url = "http://localhost:9000/api"
timeout = "30s"

[notifications]
success = "1s"
"#,
        )
        .await
        .unwrap();

        let cfg = Config::load_from(&path).await.unwrap();
        assert_eq!(cfg.endpoint.url, "http://localhost:9000/api");
        assert_eq!(cfg.endpoint.timeout, Some(Duration::from_secs(30)));
        assert_eq!(cfg.notifications.success, Some(Duration::from_secs(1)));
        assert_eq!(cfg.notifications.error, Some(Duration::from_secs(8)));
        assert_eq!(cfg.logging, LoggingConfig::default());
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        TokioFs::write(&path, "endpoint = 3").await.unwrap();

        assert!(matches!(
            Config::load_from(&path).await,
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_log_dir_resolution() {
        let cfg = Config::default();
        assert_eq!(
            cfg.log_dir(Path::new("/tmp/regform")),
            PathBuf::from("/tmp/regform/logs")
        );
    }
}
