//! Core logger types and traits

pub mod color;
pub mod config;
pub mod datetime;
pub mod error;
pub mod extras;
pub mod formatter;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod sink;
pub mod value;

pub use color::{ansi_supported, Color, ColorTable};
pub use config::{EncoderKind, LoggerConfig};
pub use datetime::{Clock, DateTimeFormat, DateTimeSource, FixedClock, RenderedDateTime, SystemClock};
pub use error::{LoggerError, Result};
pub use extras::{ExtraPair, Extras};
pub use log_level::LogLevel;
pub use logger::{FatalHandler, Logger, LoggerBuilder, FATAL_EXIT_CODE};
pub use metrics::LoggerMetrics;
pub use sink::{Destination, Sink};
pub use value::Value;
