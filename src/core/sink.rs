//! Sink trait for encoded log output

use super::error::Result;
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stream an encoded record is written to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    #[default]
    Stdout,
    Stderr,
    File,
}

impl Destination {
    /// Route a record: with a stdout destination, Error and Fatal go to stderr.
    pub fn for_level(self, level: LogLevel) -> Self {
        match self {
            Destination::Stdout if level.is_error_class() => Destination::Stderr,
            other => other,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Destination::Stdout => "stdout",
            Destination::Stderr => "stderr",
            Destination::File => "file",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Receives fully encoded records.
///
/// Each `write` call carries exactly one record; implementations must hand
/// it to the underlying stream in a single write so records never interleave.
pub trait Sink: Send + Sync {
    fn write(&mut self, record: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
