//! Single-line JSON encoder
//!
//! Keys appear in a fixed order (level, date, time, datetime, msg, extras)
//! and empty ones are left out. The object is written straight into the
//! output buffer; nothing goes through a generic serializer.
//!
//! Example: `{"level":"INFO","datetime":"2099-11-01 15:30:45","msg":"ok","extras":{"user":"alice"}}`

use super::{EncodeContext, Encoder, LogRecord};
use crate::core::formatter::{write_json_string, write_value, Target};
use crate::core::{EncoderKind, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

/// Writes `"key":"value"` members, inserting commas between them.
struct ObjectWriter<'b> {
    buf: &'b mut String,
    first: bool,
}

impl<'b> ObjectWriter<'b> {
    fn open(buf: &'b mut String) -> Self {
        buf.push('{');
        Self { buf, first: true }
    }

    /// Start a member whose key the caller writes itself.
    fn next_member(&mut self) -> &mut String {
        if !self.first {
            self.buf.push(',');
        }
        self.first = false;
        &mut *self.buf
    }

    fn key(&mut self, key: &str) -> &mut String {
        let buf = self.next_member();
        write_json_string(buf, key);
        buf.push(':');
        buf
    }

    /// String member, skipped when `value` is empty
    fn string(&mut self, key: &str, value: &str) {
        if !value.is_empty() {
            let buf = self.key(key);
            write_json_string(buf, value);
        }
    }

    fn close(self) {
        self.buf.push('}');
    }
}

impl Encoder for JsonEncoder {
    fn kind(&self) -> EncoderKind {
        EncoderKind::Json
    }

    fn encode(&self, ctx: &EncodeContext<'_>, record: &LogRecord<'_>, buf: &mut String) {
        let (open, close) = ctx.colors.color_for(record.level);
        buf.push_str(open);

        let mut object = ObjectWriter::open(buf);
        object.string("level", record.level_name.unwrap_or_default());
        object.string("date", &record.datetime.date);
        object.string("time", &record.datetime.time);
        object.string("datetime", &record.datetime.datetime);

        let out = object.key("msg");
        write_json_string(out, &record.message);

        if !record.extras.is_empty() {
            let out = object.key("extras");
            let mut extras = ObjectWriter::open(out);
            for pair in &record.extras {
                let out = extras.next_member();
                write_value(out, pair.key, Target::Json, true);
                out.push(':');
                write_value(out, pair.value.unwrap_or(&Value::Nil), Target::Json, false);
            }
            extras.close();
        }
        object.close();

        buf.push_str(close);
        buf.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DateTimeFormat, LogLevel, LoggerConfig};
    use crate::encoders::test_support::TestEnv;

    #[test]
    fn test_message_only() {
        let env = TestEnv::bare();
        let out = env
            .log(&JsonEncoder, LogLevel::Info, &["hi".into()])
            .expect("emitted");
        assert_eq!(out, "{\"msg\":\"hi\"}\n");
    }

    #[test]
    fn test_key_order() {
        let env = TestEnv::new(LoggerConfig::new());
        let args = vec![Value::from("ok"), Value::from("user"), Value::from("alice")];
        let out = env.log(&JsonEncoder, LogLevel::Info, &args).expect("emitted");
        assert_eq!(
            out,
            "{\"level\":\"INFO\",\"datetime\":\"2099-11-01 15:30:45\",\"msg\":\"ok\",\"extras\":{\"user\":\"alice\"}}\n"
        );
    }

    #[test]
    fn test_separate_date_and_time() {
        let env = TestEnv::new(LoggerConfig::new().with_time(false));
        let out = env
            .log(&JsonEncoder, LogLevel::Warn, &["w".into()])
            .expect("emitted");
        assert_eq!(out, "{\"level\":\"WARN\",\"date\":\"2099-11-01\",\"msg\":\"w\"}\n");
    }

    #[test]
    fn test_unix_datetime() {
        let env = TestEnv::new(
            LoggerConfig::new()
                .with_level_name(false)
                .with_time(false)
                .with_datetime_format(DateTimeFormat::Unix),
        );
        let out = env
            .log(&JsonEncoder, LogLevel::Info, &["t".into()])
            .expect("emitted");
        assert_eq!(out, "{\"datetime\":\"4097230245\",\"msg\":\"t\"}\n");
    }

    #[test]
    fn test_output_parses_as_json() {
        let env = TestEnv::new(LoggerConfig::new());
        let args = vec![
            Value::from("quote \" and \\ and\nnewline"),
            Value::from("count"),
            Value::from(7),
            Value::from("ratio"),
            Value::from(0.5),
            Value::from("ok"),
            Value::from(true),
            Value::from('c'),
            Value::Float(f64::NAN),
            Value::from(9),
            Value::from("nine"),
            Value::from("dangling"),
        ];
        let out = env.log(&JsonEncoder, LogLevel::Error, &args).expect("emitted");
        assert_eq!(out.lines().count(), 1);

        let parsed: serde_json::Value = serde_json::from_str(out.trim_end()).expect("valid JSON");
        assert_eq!(parsed["level"], "ERROR");
        assert_eq!(parsed["msg"], "quote \" and \\ and\nnewline");
        assert_eq!(parsed["extras"]["count"], 7);
        assert_eq!(parsed["extras"]["ratio"], 0.5);
        assert_eq!(parsed["extras"]["ok"], true);
        assert!(parsed["extras"]["c"].is_null());
        assert_eq!(parsed["extras"]["9"], "nine");
        assert!(parsed["extras"]["dangling"].is_null());
        assert!(parsed["extras"].as_object().is_some_and(|o| o.contains_key("dangling")));
    }

    #[test]
    fn test_nil_message() {
        let env = TestEnv::bare();
        let out = env
            .log(&JsonEncoder, LogLevel::Info, &[Value::Nil])
            .expect("emitted");
        assert_eq!(out, "{\"msg\":\"null\"}\n");
    }
}
