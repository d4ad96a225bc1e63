//! Multi-line YAML encoder
//!
//! One `key: value` line per present field, in the same order and with the
//! same omission rule as the JSON encoder, followed by an indented
//! `extras:` block.
//!
//! Example:
//!
//! ```text
//! level: INFO
//! msg: ok
//! extras:
//!   user: alice
//! ```

use super::{EncodeContext, Encoder, LogRecord};
use crate::core::formatter::{write_value, write_yaml_str, Target};
use crate::core::{EncoderKind, Value};

const EXTRAS_INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlEncoder;

fn write_field(buf: &mut String, key: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    buf.push_str(key);
    buf.push_str(": ");
    write_yaml_str(buf, value);
    buf.push('\n');
}

impl Encoder for YamlEncoder {
    fn kind(&self) -> EncoderKind {
        EncoderKind::Yaml
    }

    fn encode(&self, ctx: &EncodeContext<'_>, record: &LogRecord<'_>, buf: &mut String) {
        let (open, close) = ctx.colors.color_for(record.level);
        buf.push_str(open);

        write_field(buf, "level", record.level_name.unwrap_or_default());
        write_field(buf, "date", &record.datetime.date);
        write_field(buf, "time", &record.datetime.time);
        write_field(buf, "datetime", &record.datetime.datetime);

        // msg is always present, even when empty
        buf.push_str("msg: ");
        write_yaml_str(buf, &record.message);
        buf.push('\n');

        if !record.extras.is_empty() {
            buf.push_str("extras:\n");
            for pair in &record.extras {
                buf.push_str(EXTRAS_INDENT);
                write_value(buf, pair.key, Target::Yaml, true);
                buf.push_str(": ");
                write_value(buf, pair.value.unwrap_or(&Value::Nil), Target::Yaml, false);
                buf.push('\n');
            }
        }

        // keep the reset code on the record's last line
        if !close.is_empty() {
            buf.pop();
            buf.push_str(close);
            buf.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DateTimeFormat, LogLevel, LoggerConfig};
    use crate::encoders::test_support::TestEnv;

    fn level_only() -> TestEnv {
        TestEnv::new(LoggerConfig::new().with_date(false).with_time(false))
    }

    #[test]
    fn test_level_and_message() {
        let out = level_only()
            .log(&YamlEncoder, LogLevel::Info, &["ok".into()])
            .expect("emitted");
        assert_eq!(out, "level: INFO\nmsg: ok\n");
    }

    #[test]
    fn test_datetime_fields() {
        let env = TestEnv::new(LoggerConfig::new().with_level_name(false));
        let out = env
            .log(&YamlEncoder, LogLevel::Info, &["ok".into()])
            .expect("emitted");
        assert_eq!(out, "datetime: \"2099-11-01 15:30:45\"\nmsg: ok\n");

        let env = TestEnv::new(
            LoggerConfig::new()
                .with_level_name(false)
                .with_date(false)
                .with_datetime_format(DateTimeFormat::Unix),
        );
        let out = env
            .log(&YamlEncoder, LogLevel::Info, &["ok".into()])
            .expect("emitted");
        assert_eq!(out, "datetime: \"4097230245\"\nmsg: ok\n");
    }

    #[test]
    fn test_extras_block() {
        let args = vec![
            Value::from("saved"),
            Value::from("path"),
            Value::from("value: with colon"),
            Value::from("name"),
            Value::from("plain"),
            Value::from('k'),
            Value::from('v'),
            Value::from("size"),
            Value::from(1024_i64),
            Value::from("dangling"),
        ];
        let out = level_only()
            .log(&YamlEncoder, LogLevel::Debug, &args)
            .expect("emitted");
        assert_eq!(
            out,
            "level: DEBUG\n\
             msg: saved\n\
             extras:\n  \
             path: \"value: with colon\"\n  \
             name: plain\n  \
             k: \"v\"\n  \
             size: 1024\n  \
             dangling: null\n"
        );
    }

    #[test]
    fn test_message_needing_quotes() {
        let out = TestEnv::bare()
            .log(&YamlEncoder, LogLevel::Info, &["a: b".into()])
            .expect("emitted");
        assert_eq!(out, "msg: \"a: b\"\n");
    }
}
