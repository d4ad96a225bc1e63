//! Logger configuration snapshot
//!
//! A `LoggerConfig` is immutable once handed to a logger; mutators on the
//! logger swap in a modified copy, so each log call reads one consistent
//! snapshot.

use super::datetime::DateTimeFormat;
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::sink::Destination;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Wire format selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncoderKind {
    /// `LEVEL [datetime]: message key=value`
    #[default]
    Default,
    Json,
    Yaml,
}

impl EncoderKind {
    pub fn name(&self) -> &'static str {
        match self {
            EncoderKind::Default => "default",
            EncoderKind::Json => "json",
            EncoderKind::Yaml => "yaml",
        }
    }

    /// Lenient parse; unknown names select the default encoder.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "json" => EncoderKind::Json,
            "yaml" | "yml" => EncoderKind::Yaml,
            _ => EncoderKind::Default,
        }
    }
}

impl fmt::Display for EncoderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Configuration consumed by encoders and the logger
///
/// # Examples
///
/// ```
/// use rust_log_encoder::core::{DateTimeFormat, EncoderKind, LoggerConfig};
/// use rust_log_encoder::LogLevel;
///
/// let config = LoggerConfig::new()
///     .with_level(LogLevel::Debug)
///     .with_encoder(EncoderKind::Json)
///     .with_datetime_format(DateTimeFormat::Unix);
/// assert!(config.show_date);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Threshold: records less severe than this are dropped
    #[serde(deserialize_with = "lenient_level")]
    pub level: LogLevel,
    pub encoder: EncoderKind,
    pub colors_enabled: bool,
    pub show_date: bool,
    pub show_time: bool,
    pub show_level_name: bool,
    pub datetime_format: DateTimeFormat,
    pub destination: Destination,
}

fn lenient_level<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<LogLevel, D::Error> {
    let name = String::deserialize(deserializer)?;
    Ok(LogLevel::from_name(&name))
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            encoder: EncoderKind::Default,
            colors_enabled: false,
            show_date: true,
            show_time: true,
            show_level_name: true,
            datetime_format: DateTimeFormat::default(),
            destination: Destination::Stdout,
        }
    }
}

impl LoggerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON configuration document.
    ///
    /// Missing fields keep their defaults. Custom date/time layouts must be
    /// valid strftime.
    pub fn from_json(document: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(document)?;
        if let Some(layout) = config.datetime_format.invalid_layout() {
            return Err(LoggerError::config(
                "datetime_format",
                format!("unsupported strftime layout '{}'", layout),
            ));
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_encoder(mut self, encoder: EncoderKind) -> Self {
        self.encoder = encoder;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.colors_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_date(mut self, show: bool) -> Self {
        self.show_date = show;
        self
    }

    #[must_use]
    pub fn with_time(mut self, show: bool) -> Self {
        self.show_time = show;
        self
    }

    #[must_use]
    pub fn with_level_name(mut self, show: bool) -> Self {
        self.show_level_name = show;
        self
    }

    #[must_use]
    pub fn with_datetime_format(mut self, format: DateTimeFormat) -> Self {
        self.datetime_format = format;
        self
    }

    #[must_use]
    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destination = destination;
        self
    }
}
