//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::aggregate::DEFAULT_STOP_WORDS;
use crate::ingest::{ErrorPolicy, TimeZoneMode};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ingest: IngestConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where export files come from and how they are read
#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    #[serde(default = "default_pattern")]
    pub pattern: String,

    #[serde(default)]
    pub on_error: ErrorPolicy,

    #[serde(default)]
    pub timezone: TimeZoneMode,
}

fn default_pattern() -> String {
    "./Searches/Searches/*.json".to_string()
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            on_error: ErrorPolicy::default(),
            timezone: TimeZoneMode::default(),
        }
    }
}

/// Term statistics settings
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_stop_words")]
    pub stop_words: Vec<String>,

    #[serde(default = "default_top_terms")]
    pub top_terms: usize,
}

fn default_stop_words() -> Vec<String> {
    DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect()
}

fn default_top_terms() -> usize {
    10
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stop_words: default_stop_words(),
            top_terms: default_top_terms(),
        }
    }
}

/// How results are presented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Plain-text summary
    #[default]
    Text,
    /// Machine-readable summary
    Json,
    /// Interactive tree session
    Browse,
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(DisplayMode::Text),
            "json" => Ok(DisplayMode::Json),
            "browse" => Ok(DisplayMode::Browse),
            other => Err(format!("unknown display mode {:?} (expected text, json or browse)", other)),
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub mode: DisplayMode,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Result<Self, ConfigError> {
        for path in Self::default_paths() {
            if path.exists() {
                let config = Self::load_with_env(&path)?;
                tracing::debug!("Loaded config from {:?}", path);
                return Ok(config);
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Candidate config file locations, most specific first
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./searchlog.toml")];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("searchlog").join("config.toml"));
        }
        paths
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Ingest overrides
        if let Some(pattern) = lookup("SEARCHLOG_PATTERN") {
            self.ingest.pattern = pattern;
        }
        if let Some(policy) = lookup("SEARCHLOG_ON_ERROR") {
            self.ingest.on_error = parse_override("SEARCHLOG_ON_ERROR", &policy)?;
        }
        if let Some(zone) = lookup("SEARCHLOG_TIMEZONE") {
            self.ingest.timezone = parse_override("SEARCHLOG_TIMEZONE", &zone)?;
        }

        // Analysis overrides
        if let Some(top) = lookup("SEARCHLOG_TOP_TERMS") {
            self.analysis.top_terms = top.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "SEARCHLOG_TOP_TERMS".to_string(),
                error: format!("{:?} is not a count", top),
            })?;
        }

        // Display overrides
        if let Some(mode) = lookup("SEARCHLOG_MODE") {
            self.display.mode = parse_override("SEARCHLOG_MODE", &mode)?;
        }

        // Logging overrides
        if let Some(level) = lookup("SEARCHLOG_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("SEARCHLOG_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }
}

fn parse_override<T: FromStr<Err = String>>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|error| ConfigError::Invalid {
        key: key.to_string(),
        error,
    })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value for {key}: {error}")]
    Invalid { key: String, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# searchlog configuration
#
# Environment variables override these settings:
# - SEARCHLOG_PATTERN
# - SEARCHLOG_ON_ERROR
# - SEARCHLOG_TIMEZONE
# - SEARCHLOG_TOP_TERMS
# - SEARCHLOG_MODE
# - SEARCHLOG_LOG_LEVEL
# - SEARCHLOG_LOG_FORMAT

[ingest]
# Glob pattern matching the exported search files
pattern = "./Searches/Searches/*.json"

# What to do with an unreadable file: fail (abort the run) or skip (warn and continue)
on_error = "fail"

# Time zone used for year/month buckets: local or utc
timezone = "local"

[analysis]
# Terms never counted in the frequency table
stop_words = ["in", "to", "a", "the"]

# Number of terms listed in reports
top_terms = 10

[display]
# Output mode: text, json or browse
mode = "text"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json
format = "pretty"
"#
    .to_string()
}
