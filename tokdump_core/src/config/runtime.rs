//! Runtime preferences: environment defaults plus an optional TOML file

use super::constants::compile_time::file_processing::COMPAT_MAX_LINE_LENGTH;
use crate::logging::codes;
use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Configuration loading errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("invalid config file {path}: {message}")]
    ParseFailed { path: String, message: String },

    #[error("invalid max_line_length {value}: must be at least 1")]
    InvalidLineLength { value: usize },
}

impl ConfigError {
    pub fn error_code(&self) -> crate::logging::Code {
        codes::system::CONFIGURATION_ERROR
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Split lines longer than this many bytes into chunks (unbounded when unset)
    pub max_line_length: Option<usize>,

    /// Whether to log a per-file summary once a file is done
    pub log_file_metrics: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            max_line_length: env::var(env_vars::MAX_LINE_LENGTH)
                .ok()
                .and_then(|v| parse_line_length(&v)),
            log_file_metrics: env::var(env_vars::LOG_FILE_METRICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Whether to collect per-kind token counts while scanning
    pub collect_metrics: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            collect_metrics: env::var(env_vars::LEXICAL_METRICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to emit JSON events instead of plain log records
    pub use_structured_logging: bool,

    /// Minimum level forwarded to the sink
    pub min_log_level: LogLevel,

    /// Whether to attach the file being processed to every event
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            include_file_context: env::var(env_vars::LOGGING_INCLUDE_FILE_CONTEXT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

/// `error`, `warn`/`warning`, `info`, `debug` or `0`..`3`, any case
pub(crate) fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Parse a line length bound; `compat` selects the historical 1023-byte limit
pub(crate) fn parse_line_length(value: &str) -> Option<usize> {
    match value.trim().to_lowercase().as_str() {
        "compat" => Some(COMPAT_MAX_LINE_LENGTH),
        "" | "none" | "0" => None,
        other => other.parse().ok(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Build the configuration from the environment, applying the file named
    /// by `TOKDUMP_CONFIG` on top when set
    pub fn load() -> Result<Self, ConfigError> {
        match env::var(env_vars::CONFIG_FILE) {
            Ok(path) if !path.is_empty() => Self::from_file(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    /// Read a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_toml_str(&text).map_err(|e| match e {
            ConfigError::ParseFailed { message, .. } => ConfigError::ParseFailed {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// Parse TOML text; missing keys keep their environment defaults
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(text).map_err(|e| ConfigError::ParseFailed {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(0) = self.file_processor.max_line_length {
            return Err(ConfigError::InvalidLineLength { value: 0 });
        }
        Ok(())
    }
}

/// Recognized `TOKDUMP_*` variables
pub mod env_vars {
    pub const CONFIG_FILE: &str = "TOKDUMP_CONFIG";

    // File Processor
    pub const MAX_LINE_LENGTH: &str = "TOKDUMP_MAX_LINE_LENGTH";
    pub const LOG_FILE_METRICS: &str = "TOKDUMP_LOG_FILE_METRICS";

    // Lexical
    pub const LEXICAL_METRICS: &str = "TOKDUMP_LEXICAL_METRICS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "TOKDUMP_LOG_STRUCTURED";
    pub const LOGGING_MIN_LEVEL: &str = "TOKDUMP_LOG_LEVEL";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "TOKDUMP_LOG_FILE_CONTEXT";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_log_level_parsing() {
        let cases = [
            ("Warn", Some(LogLevel::Warning)),
            ("3", Some(LogLevel::Debug)),
            ("error", Some(LogLevel::Error)),
            ("verbose", None),
        ];
        for (text, expected) in cases {
            assert_eq!(parse_log_level(text), expected, "{}", text);
        }
    }

    #[test]
    fn test_line_length_parsing() {
        assert_eq!(parse_line_length("compat"), Some(COMPAT_MAX_LINE_LENGTH));
        assert_eq!(parse_line_length("COMPAT"), Some(1023));
        assert_eq!(parse_line_length("80"), Some(80));
        assert_eq!(parse_line_length("0"), None);
        assert_eq!(parse_line_length("none"), None);
        assert_eq!(parse_line_length("wide"), None);
    }

    #[test]
    fn test_toml_overrides() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [file_processor]
            max_line_length = 64
            log_file_metrics = false

            [logging]
            use_structured_logging = true
            min_log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.file_processor.max_line_length, Some(64));
        assert!(!config.file_processor.log_file_metrics);
        assert!(config.logging.use_structured_logging);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
    }

    #[test]
    fn test_toml_accepts_both_warning_spellings() {
        for level in ["warn", "warning"] {
            let text = format!("[logging]\nmin_log_level = \"{}\"\n", level);
            let config = RuntimeConfig::from_toml_str(&text).unwrap();
            assert_eq!(config.logging.min_log_level, LogLevel::Warning, "{}", level);
        }
    }

    #[test]
    fn test_toml_rejects_zero_line_length() {
        let result = RuntimeConfig::from_toml_str("[file_processor]\nmax_line_length = 0\n");
        assert_matches!(result, Err(ConfigError::InvalidLineLength { value: 0 }));
        assert_eq!(
            result.unwrap_err().error_code(),
            codes::system::CONFIGURATION_ERROR
        );
    }

    #[test]
    fn test_toml_parse_error() {
        let result = RuntimeConfig::from_toml_str("[logging\nmin_log_level = ");
        assert_matches!(result, Err(ConfigError::ParseFailed { .. }));
    }

    #[test]
    fn test_from_file_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[lexical]\ncollect_metrics = \"maybe\"").unwrap();

        let result = RuntimeConfig::from_file(file.path());
        assert_matches!(result, Err(ConfigError::ParseFailed { path, .. }) => {
            assert_eq!(path, file.path().display().to_string());
        });
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = RuntimeConfig::from_file(&dir.path().join("absent.toml"));
        assert_matches!(result, Err(ConfigError::ReadFailed { .. }));
    }
}
