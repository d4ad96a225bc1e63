//! Main logger implementation
//!
//! The logger owns a configuration snapshot, the selected encoder, the
//! color tables, the clock and the sinks. Every call reads one snapshot,
//! checks the threshold, encodes into a private buffer and hands the
//! finished record to exactly one sink.

use super::{
    color::{Color, ColorTable},
    config::{EncoderKind, LoggerConfig},
    datetime::{DateTimeFormat, DateTimeSource},
    error::{LoggerError, Result},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    sink::{Destination, Sink},
    value::Value,
};
use crate::encoders::{self, EncodeContext, EncodedOutput, Encoder};
use crate::sinks::ConsoleSink;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// Exit status used after a fatal record
pub const FATAL_EXIT_CODE: i32 = 1;

/// Invoked with [`FATAL_EXIT_CODE`] after a fatal record has been written
/// and all sinks flushed. The default handler exits the process.
pub type FatalHandler = Arc<dyn Fn(i32) + Send + Sync>;

fn exit_process() -> FatalHandler {
    Arc::new(|code| std::process::exit(code))
}

/// Configuration and encoder, swapped as a unit on every mutation
#[derive(Clone)]
struct Snapshot {
    config: LoggerConfig,
    encoder: Arc<dyn Encoder>,
}

type SharedSink = Mutex<Box<dyn Sink>>;

pub struct Logger {
    state: RwLock<Arc<Snapshot>>,
    /// Probed once at construction
    colors: ColorTable,
    plain: ColorTable,
    clock: DateTimeSource,
    stdout: SharedSink,
    stderr: SharedSink,
    file: Mutex<Option<Box<dyn Sink>>>,
    metrics: LoggerMetrics,
    on_fatal: FatalHandler,
}

impl Logger {
    /// Logger with default configuration writing to the process streams.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[must_use]
    pub fn with_config(config: LoggerConfig) -> Self {
        Self::builder().config(config).build()
    }

    fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.state.read())
    }

    fn update(&self, f: impl FnOnce(&mut Snapshot)) {
        let mut guard = self.state.write();
        f(Arc::make_mut(&mut *guard));
    }

    fn context<'a>(&'a self, config: &'a LoggerConfig) -> EncodeContext<'a> {
        let colors = if config.colors_enabled {
            &self.colors
        } else {
            &self.plain
        };
        EncodeContext::new(config, colors, &self.clock)
    }

    /// Copy of the current configuration
    pub fn config(&self) -> LoggerConfig {
        self.snapshot().config.clone()
    }

    pub fn level(&self) -> LogLevel {
        self.snapshot().config.level
    }

    pub fn encoder_kind(&self) -> EncoderKind {
        self.snapshot().encoder.kind()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.update(|s| s.config.level = level);
    }

    /// Set the threshold by name; unknown names select `Debug`.
    pub fn set_level_name(&self, name: &str) {
        self.set_level(LogLevel::from_name(name));
    }

    pub fn set_encoder(&self, kind: EncoderKind) {
        self.update(|s| {
            s.config.encoder = kind;
            s.encoder = encoders::for_kind(kind);
        });
    }

    /// Install a custom encoder
    pub fn set_encoder_impl(&self, encoder: Arc<dyn Encoder>) {
        self.update(|s| {
            s.config.encoder = encoder.kind();
            s.encoder = encoder;
        });
    }

    pub fn enable_colors(&self, enabled: bool) {
        self.update(|s| s.config.colors_enabled = enabled);
    }

    pub fn show_level_name(&self, show: bool) {
        self.update(|s| s.config.show_level_name = show);
    }

    pub fn show_date(&self, show: bool) {
        self.update(|s| s.config.show_date = show);
    }

    pub fn show_time(&self, show: bool) {
        self.update(|s| s.config.show_time = show);
    }

    pub fn set_datetime_format(&self, format: DateTimeFormat) {
        self.update(|s| s.config.datetime_format = format);
    }

    pub fn set_destination(&self, destination: Destination) {
        self.update(|s| s.config.destination = destination);
    }

    /// Attach the sink used for [`Destination::File`], replacing any previous one.
    pub fn set_file_sink(&self, sink: Box<dyn Sink>) {
        *self.file.lock() = Some(sink);
    }

    /// Detach the file sink, returning it.
    pub fn take_file_sink(&self) -> Option<Box<dyn Sink>> {
        self.file.lock().take()
    }

    /// Logger metrics for observability
    ///
    /// # Example
    ///
    /// ```
    /// use rust_log_encoder::{Logger, LogLevel, MemorySink};
    ///
    /// let logger = Logger::builder()
    ///     .stdout(MemorySink::new())
    ///     .level(LogLevel::Warn)
    ///     .build();
    /// logger.info(&["skipped".into()]);
    /// logger.warn(&["kept".into()]);
    ///
    /// assert_eq!(logger.metrics().filtered_count(), 1);
    /// assert_eq!(logger.metrics().total_logged(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Log `args` at `level` to the configured destination.
    ///
    /// `args[0]` is the message; the remaining values pair up as extras.
    pub fn log(&self, level: LogLevel, args: &[Value]) {
        self.dispatch(None, level, args);
    }

    /// Log to an explicit destination, bypassing level-based routing.
    pub fn log_to(&self, destination: Destination, level: LogLevel, args: &[Value]) {
        self.dispatch(Some(destination), level, args);
    }

    #[inline]
    pub fn debug(&self, args: &[Value]) {
        self.log(LogLevel::Debug, args);
    }

    #[inline]
    pub fn info(&self, args: &[Value]) {
        self.log(LogLevel::Info, args);
    }

    #[inline]
    pub fn warn(&self, args: &[Value]) {
        self.log(LogLevel::Warn, args);
    }

    #[inline]
    pub fn error(&self, args: &[Value]) {
        self.log(LogLevel::Error, args);
    }

    /// Log at `Fatal` regardless of threshold, then terminate.
    ///
    /// A call whose arguments are all nil writes nothing and returns.
    #[inline]
    pub fn fatal_error(&self, args: &[Value]) {
        self.log(LogLevel::Fatal, args);
    }

    /// Write `text` wrapped in `color`. Never gated by level.
    pub fn color(&self, color: Color, text: &str) {
        let snapshot = self.snapshot();
        let ctx = self.context(&snapshot.config);
        let output = snapshot
            .encoder
            .color(&ctx, color, text, snapshot.config.destination);
        self.emit(&output);
    }

    /// Like [`Logger::color`], with the color given by name. Unknown names
    /// fall back to white.
    pub fn color_named(&self, color: &str, text: &str) {
        self.color(ColorTable::resolve(color), text);
    }

    fn dispatch(&self, destination: Option<Destination>, level: LogLevel, args: &[Value]) {
        let snapshot = self.snapshot();
        let config = &snapshot.config;

        if level != LogLevel::Fatal && !config.level.allows(level) {
            self.metrics.record_filtered();
            return;
        }

        let destination = destination.unwrap_or_else(|| config.destination.for_level(level));
        let ctx = self.context(config);
        let Some(output) = snapshot.encoder.log(&ctx, level, destination, args) else {
            self.metrics.record_suppressed();
            return;
        };
        self.emit(&output);

        if level == LogLevel::Fatal {
            if let Err(e) = self.flush() {
                eprintln!("[LOGGER ERROR] Failed to flush before exit: {}", e);
            }
            (self.on_fatal)(FATAL_EXIT_CODE);
        }
    }

    /// Hand one record to its sink, reporting failures on stderr.
    fn emit(&self, output: &EncodedOutput) {
        let result = match output.destination {
            Destination::Stdout => Self::write_to(&mut **self.stdout.lock(), &output.bytes),
            Destination::Stderr => Self::write_to(&mut **self.stderr.lock(), &output.bytes),
            Destination::File => match self.file.lock().as_mut() {
                Some(sink) => Self::write_to(&mut **sink, &output.bytes),
                None => Err(LoggerError::sink_unavailable(Destination::File.name())),
            },
        };

        match result {
            Ok(()) => {
                self.metrics.record_logged();
            }
            Err(LoggerError::SinkUnavailable { destination }) => {
                self.metrics.record_dropped();
                eprintln!(
                    "[LOGGER WARNING] No sink attached for '{}'; record dropped",
                    destination
                );
            }
            Err(e) => {
                self.metrics.record_dropped();
                eprintln!("[LOGGER ERROR] Sink write failed: {}", e);
            }
        }
    }

    /// Write with panic isolation so a misbehaving sink cannot take the
    /// caller down.
    fn write_to(sink: &mut dyn Sink, bytes: &[u8]) -> Result<()> {
        let name = sink.name().to_string();
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.write(bytes)))
            .unwrap_or_else(|panic_info| {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                Err(LoggerError::other(format!("sink '{}' panicked: {}", name, panic_msg)))
            })
    }

    /// Flush every sink, returning the first error.
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        let mut record = |result: Result<()>| {
            if let Err(e) = result {
                first_error.get_or_insert(e);
            }
        };

        record(self.stdout.lock().flush());
        record(self.stderr.lock().flush());
        if let Some(sink) = self.file.lock().as_mut() {
            record(sink.flush());
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped logs (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_log_encoder::prelude::*;
///
/// let logger = Logger::builder()
///     .level(LogLevel::Debug)
///     .encoder(EncoderKind::Json)
///     .datetime_format(DateTimeFormat::Unix)
///     .stdout(MemorySink::new())
///     .build();
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    encoder: Option<Arc<dyn Encoder>>,
    stdout: Option<Box<dyn Sink>>,
    stderr: Option<Box<dyn Sink>>,
    file: Option<Box<dyn Sink>>,
    colors: Option<ColorTable>,
    clock: Option<DateTimeSource>,
    on_fatal: Option<FatalHandler>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            encoder: None,
            stdout: None,
            stderr: None,
            file: None,
            colors: None,
            clock: None,
            on_fatal: None,
        }
    }

    /// Replace the whole configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn encoder(mut self, kind: EncoderKind) -> Self {
        self.config.encoder = kind;
        self.encoder = None;
        self
    }

    /// Use a custom encoder instead of a built-in one
    #[must_use = "builder methods return a new value"]
    pub fn encoder_impl(mut self, encoder: Arc<dyn Encoder>) -> Self {
        self.config.encoder = encoder.kind();
        self.encoder = Some(encoder);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.config.colors_enabled = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn show_date(mut self, show: bool) -> Self {
        self.config.show_date = show;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn show_time(mut self, show: bool) -> Self {
        self.config.show_time = show;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn show_level_name(mut self, show: bool) -> Self {
        self.config.show_level_name = show;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn datetime_format(mut self, format: DateTimeFormat) -> Self {
        self.config.datetime_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn destination(mut self, destination: Destination) -> Self {
        self.config.destination = destination;
        self
    }

    /// Sink for [`Destination::Stdout`] (default: process stdout)
    #[must_use = "builder methods return a new value"]
    pub fn stdout<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.stdout = Some(Box::new(sink));
        self
    }

    /// Sink for [`Destination::Stderr`] (default: process stderr)
    #[must_use = "builder methods return a new value"]
    pub fn stderr<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.stderr = Some(Box::new(sink));
        self
    }

    /// Sink for [`Destination::File`] (default: none)
    #[must_use = "builder methods return a new value"]
    pub fn file<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.file = Some(Box::new(sink));
        self
    }

    /// Override the probed color table
    #[must_use = "builder methods return a new value"]
    pub fn color_table(mut self, table: ColorTable) -> Self {
        self.colors = Some(table);
        self
    }

    /// Read "now" from `clock` instead of the system clock
    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: DateTimeSource) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Replace the process exit performed after a fatal record
    #[must_use = "builder methods return a new value"]
    pub fn on_fatal(mut self, handler: FatalHandler) -> Self {
        self.on_fatal = Some(handler);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let encoder = self
            .encoder
            .unwrap_or_else(|| encoders::for_kind(self.config.encoder));

        Logger {
            state: RwLock::new(Arc::new(Snapshot {
                config: self.config,
                encoder,
            })),
            colors: self.colors.unwrap_or_else(ColorTable::probe),
            plain: ColorTable::disabled(),
            clock: self.clock.unwrap_or_default(),
            stdout: Mutex::new(self.stdout.unwrap_or_else(|| Box::new(ConsoleSink::stdout()))),
            stderr: Mutex::new(self.stderr.unwrap_or_else(|| Box::new(ConsoleSink::stderr()))),
            file: Mutex::new(self.file),
            metrics: LoggerMetrics::new(),
            on_fatal: self.on_fatal.unwrap_or_else(exit_process),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
