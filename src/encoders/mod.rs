//! Record encoders
//!
//! An [`Encoder`] turns one log call into the bytes of one record. The
//! three built-in encoders share the record-building logic in this module
//! and differ only in how they lay the record out.

pub mod default;
pub mod json;
pub mod yaml;

pub use default::DefaultEncoder;
pub use json::JsonEncoder;
pub use yaml::YamlEncoder;

use crate::core::{
    Color, ColorTable, DateTimeSource, Destination, EncoderKind, Extras, LogLevel, LoggerConfig,
    RenderedDateTime, Value,
};
use crate::core::formatter::push_sanitized;
use std::borrow::Cow;
use std::sync::Arc;

/// Fixed per-record overhead assumed when pre-sizing the output buffer
pub const ENTRY_OVERHEAD: usize = 64;

/// Average bytes assumed per extras pair
pub const AVG_EXTRA_SIZE: usize = 24;

/// Everything an encoder reads besides the call arguments
#[derive(Debug, Clone, Copy)]
pub struct EncodeContext<'a> {
    pub config: &'a LoggerConfig,
    /// Either the probed table or the disabled one, per `config.colors_enabled`
    pub colors: &'a ColorTable,
    pub clock: &'a DateTimeSource,
}

impl<'a> EncodeContext<'a> {
    pub fn new(config: &'a LoggerConfig, colors: &'a ColorTable, clock: &'a DateTimeSource) -> Self {
        Self {
            config,
            colors,
            clock,
        }
    }

    pub fn render_datetime(&self) -> RenderedDateTime {
        self.clock.render(
            self.config.show_date,
            self.config.show_time,
            &self.config.datetime_format,
        )
    }
}

/// One log call, ready to be laid out
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    pub level: LogLevel,
    /// `None` when level names are hidden
    pub level_name: Option<&'static str>,
    pub datetime: RenderedDateTime,
    pub message: Cow<'a, str>,
    pub extras: Extras<'a>,
}

impl<'a> LogRecord<'a> {
    /// Build a record from the call arguments: `args[0]` is the message,
    /// the rest are extras. `args` must not be empty.
    pub fn build(ctx: &EncodeContext<'_>, level: LogLevel, args: &'a [Value]) -> Self {
        let (message, rest) = match args.split_first() {
            Some((first, rest)) => (message_text(first), rest),
            None => (Cow::Borrowed(""), args),
        };
        Self {
            level,
            level_name: ctx.config.show_level_name.then_some(level.to_str()),
            datetime: ctx.render_datetime(),
            message,
            extras: Extras::pair(rest),
        }
    }

    /// Pre-sized capacity for this record's output buffer
    pub fn estimated_size(&self) -> usize {
        ENTRY_OVERHEAD + self.message.len() + self.datetime.len() + self.extras.len() * AVG_EXTRA_SIZE
    }
}

fn message_text(value: &Value) -> Cow<'_, str> {
    value
        .as_str()
        .map_or_else(|| Cow::Owned(value.to_string()), Cow::Borrowed)
}

/// Whether a call produces no record at all.
///
/// Empty calls never emit; error-class calls whose arguments are all nil
/// are dropped as well.
pub fn is_suppressed(level: LogLevel, args: &[Value]) -> bool {
    args.is_empty() || (level.is_error_class() && args.iter().all(Value::is_nil))
}

/// Bytes of one record plus the stream they are meant for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedOutput {
    pub bytes: Vec<u8>,
    pub destination: Destination,
}

impl EncodedOutput {
    pub fn as_str(&self) -> &str {
        // Encoders only ever write UTF-8.
        std::str::from_utf8(&self.bytes).unwrap_or_default()
    }
}

pub trait Encoder: Send + Sync {
    fn kind(&self) -> EncoderKind;

    /// Lay `record` out into `buf`, terminating newline included.
    fn encode(&self, ctx: &EncodeContext<'_>, record: &LogRecord<'_>, buf: &mut String);

    /// Encode one log call. Returns `None` when the call is suppressed.
    fn log(
        &self,
        ctx: &EncodeContext<'_>,
        level: LogLevel,
        destination: Destination,
        args: &[Value],
    ) -> Option<EncodedOutput> {
        if is_suppressed(level, args) {
            return None;
        }
        let record = LogRecord::build(ctx, level, args);
        let mut buf = String::with_capacity(record.estimated_size());
        self.encode(ctx, &record, &mut buf);
        Some(EncodedOutput {
            bytes: buf.into_bytes(),
            destination,
        })
    }

    /// Wrap `text` in `color`, with an optional `[datetime] ` prefix.
    ///
    /// Not subject to level gating or suppression.
    fn color(
        &self,
        ctx: &EncodeContext<'_>,
        color: Color,
        text: &str,
        destination: Destination,
    ) -> EncodedOutput {
        let datetime = ctx.render_datetime();
        let mut buf = String::with_capacity(ENTRY_OVERHEAD + text.len() + datetime.len());
        if !datetime.is_empty() {
            buf.push('[');
            buf.push_str(datetime.joined());
            buf.push_str("] ");
        }
        let (open, close) = ctx.colors.wrap(color);
        buf.push_str(open);
        push_sanitized(&mut buf, text);
        buf.push_str(close);
        buf.push('\n');
        EncodedOutput {
            bytes: buf.into_bytes(),
            destination,
        }
    }
}

/// Shared instance of the built-in encoder for `kind`
pub fn for_kind(kind: EncoderKind) -> Arc<dyn Encoder> {
    match kind {
        EncoderKind::Default => Arc::new(DefaultEncoder),
        EncoderKind::Json => Arc::new(JsonEncoder),
        EncoderKind::Yaml => Arc::new(YamlEncoder),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::TestEnv;
    use super::*;

    #[test]
    fn test_suppression_rules() {
        assert!(is_suppressed(LogLevel::Info, &[]));
        assert!(is_suppressed(LogLevel::Error, &[Value::Nil, Value::Nil]));
        assert!(is_suppressed(LogLevel::Fatal, &[Value::Nil]));
        assert!(!is_suppressed(LogLevel::Info, &[Value::Nil]));
        assert!(!is_suppressed(LogLevel::Error, &[Value::Nil, Value::from("x")]));
    }

    #[test]
    fn test_every_encoder_skips_suppressed_calls() {
        let env = TestEnv::bare();
        for kind in [EncoderKind::Default, EncoderKind::Json, EncoderKind::Yaml] {
            let encoder = for_kind(kind);
            assert_eq!(encoder.kind(), kind);
            assert!(env.log(encoder.as_ref(), LogLevel::Info, &[]).is_none());
            assert!(env.log(encoder.as_ref(), LogLevel::Fatal, &[Value::Nil]).is_none());
        }
    }

    #[test]
    fn test_record_build() {
        let env = TestEnv::new(LoggerConfig::new().with_date(false));
        let args = vec![Value::from(42), Value::from("k"), Value::from(true)];
        let record = LogRecord::build(&env.ctx(), LogLevel::Warn, &args);
        assert_eq!(record.message, "42");
        assert_eq!(record.level_name, Some("WARN"));
        assert_eq!(record.datetime.time, "15:30:45");
        assert_eq!(record.extras.len(), 1);
        assert!(record.estimated_size() >= ENTRY_OVERHEAD + AVG_EXTRA_SIZE);
    }

    #[test]
    fn test_color_output() {
        let env = TestEnv::bare();
        let out = DefaultEncoder.color(&env.ctx(), Color::Cyan, "hello", Destination::Stdout);
        assert_eq!(out.as_str(), "hello\n");

        let env = TestEnv::new(LoggerConfig::new().with_time(false));
        let out = JsonEncoder.color(&env.ctx(), Color::Cyan, "hello", Destination::Stderr);
        assert_eq!(out.as_str(), "[2099-11-01] hello\n");
        assert_eq!(out.destination, Destination::Stderr);
    }

    #[cfg(feature = "console")]
    #[test]
    fn test_color_output_with_codes() {
        let env = TestEnv::new(
            LoggerConfig::new()
                .with_colors(true)
                .with_date(false)
                .with_time(false),
        );
        let out = YamlEncoder.color(&env.ctx(), Color::Red, "alert", Destination::Stdout);
        assert_eq!(out.as_str(), "\x1b[31malert\x1b[0m\n");
    }
}
