//! Log level definitions

use super::color::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log record, ordered from least to most severe.
///
/// A logger configured with threshold `T` emits a record of level `L`
/// when `L >= T`. `Debug` is therefore the least restrictive threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Numeric rank of this level.
    #[inline]
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Resolve a level name to its rank.
    ///
    /// Unknown names resolve to the `Debug` rank instead of failing.
    pub fn rank_of(name: &str) -> u8 {
        Self::from_name(name).rank()
    }

    /// Canonical name of a rank. Ranks above `Fatal` clamp to `Fatal`.
    pub fn name_of(rank: u8) -> &'static str {
        Self::from_rank(rank).to_str()
    }

    pub fn from_rank(rank: u8) -> Self {
        match rank {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Warn,
            3 => LogLevel::Error,
            _ => LogLevel::Fatal,
        }
    }

    /// Lenient parse: anything unrecognised becomes `Debug`.
    pub fn from_name(name: &str) -> Self {
        name.trim().parse().unwrap_or(LogLevel::Debug)
    }

    /// Whether a logger with `self` as threshold emits a record at `level`.
    #[inline]
    pub fn allows(&self, level: LogLevel) -> bool {
        level >= *self
    }

    /// Error and Fatal records get the nil-argument suppression rule.
    #[inline]
    pub fn is_error_class(&self) -> bool {
        matches!(self, LogLevel::Error | LogLevel::Fatal)
    }

    pub fn color(&self) -> Color {
        match self {
            LogLevel::Debug => Color::BrightBlack,
            LogLevel::Info => Color::Green,
            LogLevel::Warn => Color::Yellow,
            LogLevel::Error => Color::Red,
            LogLevel::Fatal => Color::BrightRed,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
