//! Import progress logging.
//!
//! A global logger writes one line per entry to stderr, either as indented
//! text or as one JSON object per line. It starts silent, so library calls
//! produce no output until [`configure`] is called; the CLI configures it
//! from flags and `CRM_IMPORT_LOG`.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use std::sync::RwLock;

/// Environment variable holding the minimum level (or `quiet`).
pub const LOG_ENV_VAR: &str = "CRM_IMPORT_LOG";

/// Log level, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "success" => Ok(Self::Success),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

/// A single log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Nesting depth for detail lines
    #[serde(default)]
    pub indent: u8,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            indent: 0,
            timestamp: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        };
        let indent = "   ".repeat(self.indent as usize);
        write!(f, "{}{} {}", indent, prefix, self.message)
    }
}

// =============================================================================
// Configuration
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logger settings. `min_level: None` silences all output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfig {
    pub min_level: Option<LogLevel>,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            min_level: Some(LogLevel::Info),
            format: LogFormat::Text,
        }
    }
}

impl LogConfig {
    pub fn quiet() -> Self {
        Self {
            min_level: None,
            ..Self::default()
        }
    }

    /// Settings from a `CRM_IMPORT_LOG` value: a level name or `quiet`.
    pub fn from_env_value(value: &str) -> Result<Self, String> {
        if value.trim().eq_ignore_ascii_case("quiet") {
            return Ok(Self::quiet());
        }
        Ok(Self {
            min_level: Some(value.parse()?),
            ..Self::default()
        })
    }

    /// Settings from the environment, defaulting when unset or invalid.
    pub fn from_env() -> Self {
        std::env::var(LOG_ENV_VAR)
            .ok()
            .and_then(|v| Self::from_env_value(&v).ok())
            .unwrap_or_default()
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        self.min_level.map_or(false, |min| level >= min)
    }

    /// Rendered line for `entry`, or `None` when filtered out.
    pub fn render(&self, entry: &LogEntry) -> Option<String> {
        if !self.enabled(entry.level) {
            return None;
        }
        match self.format {
            LogFormat::Text => Some(entry.to_string()),
            LogFormat::Json => serde_json::to_string(entry).ok(),
        }
    }
}

// =============================================================================
// Global Logger
// =============================================================================

/// Global logger
pub static LOGGER: Lazy<Logger> = Lazy::new(Logger::new);

pub struct Logger {
    config: RwLock<LogConfig>,
}

impl Logger {
    /// A silent logger.
    pub fn new() -> Self {
        Self {
            config: RwLock::new(LogConfig::quiet()),
        }
    }

    pub fn config(&self) -> LogConfig {
        self.config.read().map(|c| *c).unwrap_or_else(|_| LogConfig::quiet())
    }

    pub fn set_config(&self, config: LogConfig) {
        if let Ok(mut current) = self.config.write() {
            *current = config;
        }
    }

    pub fn log(&self, entry: LogEntry) {
        if let Some(line) = self.config().render(&entry) {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace the global logger settings.
pub fn configure(config: LogConfig) {
    LOGGER.set_config(config);
}

/// Convenient logging functions
pub fn log_info(msg: impl Into<String>) {
    LOGGER.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOGGER.log(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOGGER.log(LogEntry::warning(msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOGGER.log(LogEntry::error(msg));
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    LOGGER.log(LogEntry::info(msg).with_indent(indent));
}

pub fn log_warning_indent(msg: impl Into<String>, indent: u8) {
    LOGGER.log(LogEntry::warning(msg).with_indent(indent));
}
