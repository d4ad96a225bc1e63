//! # Rust Log Encoder
//!
//! The encoding core of a structured logger: level gating, ANSI colors,
//! date/time profiles and three hand-built record layouts.
//!
//! ## Features
//!
//! - **Three encoders**: human-readable text, single-line JSON and multi-line YAML
//! - **Atomic records**: every record is built in its own buffer and written once
//! - **Thread safe**: configuration is swapped as a snapshot, so concurrent calls never see a torn config
//! - **Pluggable sinks**: console, file and in-memory sinks behind one trait
//!
//! ## Example
//!
//! ```
//! use rust_log_encoder::prelude::*;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder()
//!     .encoder(EncoderKind::Json)
//!     .show_date(false)
//!     .show_time(false)
//!     .stdout(sink.clone())
//!     .build();
//!
//! logger.info(&["ok".into(), "user".into(), "alice".into()]);
//! assert_eq!(
//!     sink.contents(),
//!     "{\"level\":\"INFO\",\"msg\":\"ok\",\"extras\":{\"user\":\"alice\"}}\n"
//! );
//! ```

pub mod core;
pub mod encoders;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Color, DateTimeFormat, Destination, EncoderKind, FatalHandler, LogLevel, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result, Sink, Value,
        FATAL_EXIT_CODE,
    };
    pub use crate::encoders::Encoder;
    pub use crate::sinks::{ConsoleSink, MemorySink};
    #[cfg(feature = "file")]
    pub use crate::sinks::FileSink;
}

pub use crate::core::{
    Color, ColorTable, DateTimeFormat, DateTimeSource, Destination, EncoderKind, FatalHandler,
    LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result, Sink, Value,
    FATAL_EXIT_CODE,
};
pub use encoders::{DefaultEncoder, EncodedOutput, Encoder, JsonEncoder, YamlEncoder};
#[cfg(feature = "file")]
pub use sinks::FileSink;
pub use sinks::{ConsoleSink, MemorySink};
