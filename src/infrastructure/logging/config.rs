use std::path::PathBuf;

use crate::domain::models::{LogFormat, LoggingSettings, RotationPolicy};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, warning, error, critical)
    pub level: String,

    /// Console output format
    pub format: LogFormat,

    /// Directory for rolling log files (None logs only to stderr)
    pub log_dir: Option<PathBuf>,

    /// Enable stderr logging
    pub enable_stderr: bool,

    /// Log file rotation policy
    pub rotation: RotationPolicy,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            log_dir: None,
            enable_stderr: true,
            rotation: RotationPolicy::Daily,
        }
    }
}

impl From<&LoggingSettings> for LogConfig {
    fn from(settings: &LoggingSettings) -> Self {
        Self {
            level: settings.level.clone(),
            format: settings.format,
            log_dir: settings.log_dir.clone(),
            enable_stderr: true,
            rotation: settings.rotation,
        }
    }
}
