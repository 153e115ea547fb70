//! Centralized logging configuration
//!
//! Provides consistent logging setup with support for:
//! - Text, JSON, and pretty-printed output
//! - Environment variable configuration
//! - Writing to a file while a full-screen UI owns the terminal
//!
//! # Examples
//!
//! ```no_run
//! use libkrishi::logging::{LoggingConfig, LogFormat};
//!
//! let config = LoggingConfig::new(LogFormat::Json, "info".to_string(), false);
//! config.init().unwrap();
//! ```

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::LoggingSettings;
use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text output (no colors, for piping)
    #[default]
    Text,
    /// Machine-parseable JSON (one JSON object per line)
    Json,
    /// Pretty-printed with colors (for development)
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(format!(
                "Invalid log format: '{}'. Valid options: text, json, pretty",
                s
            )),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}

/// Configuration for logging initialization
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: String,
    pub verbose: bool,
    /// Append to this file instead of writing to stderr
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Create a new logging configuration writing to stderr
    ///
    /// # Arguments
    ///
    /// * `format` - Log output format (text, json, or pretty)
    /// * `level` - Minimum log level (error, warn, info, debug, trace)
    /// * `verbose` - If true, defaults to debug level
    pub fn new(format: LogFormat, level: String, verbose: bool) -> Self {
        Self {
            format,
            level,
            verbose,
            file: None,
        }
    }

    /// Build from config file settings, letting `KRISHI_LOG_FORMAT` and
    /// `KRISHI_LOG_LEVEL` override them
    pub fn from_settings(settings: &LoggingSettings, verbose: bool) -> Self {
        let format = std::env::var("KRISHI_LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(settings.format);
        let level = std::env::var("KRISHI_LOG_LEVEL").unwrap_or_else(|_| settings.level.clone());

        Self::new(format, level, verbose)
    }

    pub fn with_file(mut self, path: PathBuf) -> Self {
        self.file = Some(path);
        self
    }

    fn writer(&self) -> Result<BoxMakeWriter> {
        let Some(path) = &self.file else {
            return Ok(BoxMakeWriter::new(std::io::stderr));
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::ReadError)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| ConfigError::InvalidValue {
                field: "logging.file".to_string(),
                value: format!("{}: {}", path.display(), e),
            })?;
        Ok(BoxMakeWriter::new(Mutex::new(file)))
    }

    /// Initialize logging with the configured settings
    ///
    /// This should be called once at the start of your program.
    ///
    /// # Panics
    ///
    /// Panics if the logging subscriber has already been initialized
    pub fn init(&self) -> Result<()> {
        use tracing_subscriber::EnvFilter;

        let filter = if self.verbose {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
        };
        let writer = self.writer()?;
        let ansi = self.file.is_none();

        match self.format {
            LogFormat::Json => {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .with_current_span(true)
                    .with_span_list(true)
                    .flatten_event(true)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::fmt()
                    .pretty()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .with_ansi(ansi)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .init();
            }
            LogFormat::Text => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .with_ansi(ansi)
                    .with_target(false)
                    .with_level(true)
                    .init();
            }
        }
        Ok(())
    }
}

/// Initialize stderr logging from `KRISHI_LOG_FORMAT` and `KRISHI_LOG_LEVEL`
///
/// Falls back to text format with info level if not set.
pub fn init_default() -> Result<()> {
    LoggingConfig::from_settings(&LoggingSettings::default(), false).init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("Json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("PRETTY".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
    }

    #[test]
    fn test_log_format_from_str_invalid() {
        let result = "xml".parse::<LogFormat>();
        assert!(result.unwrap_err().contains("Invalid log format: 'xml'"));
    }

    #[test]
    fn test_log_format_display_matches_parse() {
        for format in [LogFormat::Text, LogFormat::Json, LogFormat::Pretty] {
            assert_eq!(format.to_string().parse::<LogFormat>().unwrap(), format);
        }
    }

    #[test]
    #[serial]
    fn test_from_settings_without_env() {
        std::env::remove_var("KRISHI_LOG_FORMAT");
        std::env::remove_var("KRISHI_LOG_LEVEL");

        let settings = LoggingSettings {
            format: LogFormat::Pretty,
            level: "warn".to_string(),
            file: None,
        };
        let config = LoggingConfig::from_settings(&settings, true);
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.level, "warn");
        assert!(config.verbose);
        assert!(config.file.is_none());
    }

    #[test]
    #[serial]
    fn test_env_overrides_settings() {
        std::env::set_var("KRISHI_LOG_FORMAT", "json");
        std::env::set_var("KRISHI_LOG_LEVEL", "trace");

        let config = LoggingConfig::from_settings(&LoggingSettings::default(), false);

        std::env::remove_var("KRISHI_LOG_FORMAT");
        std::env::remove_var("KRISHI_LOG_LEVEL");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "trace");
    }

    #[test]
    #[serial]
    fn test_invalid_env_format_falls_back() {
        std::env::set_var("KRISHI_LOG_FORMAT", "xml");
        let config = LoggingConfig::from_settings(&LoggingSettings::default(), false);
        std::env::remove_var("KRISHI_LOG_FORMAT");
        assert_eq!(config.format, LogFormat::Text);
    }

    #[test]
    fn test_writer_creates_log_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logs").join("krishi.log");
        let config = LoggingConfig::new(LogFormat::Text, "info".to_string(), false)
            .with_file(path.clone());

        assert!(config.writer().is_ok());
        assert!(path.exists());
    }
}
