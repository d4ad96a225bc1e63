//! Human-readable single-line encoder
//!
//! Example: `INFO [2099-11-01 15:30:45]: Request processed user=alice`

use super::{EncodeContext, Encoder, LogRecord};
use crate::core::formatter::{push_sanitized, write_value, Target};
use crate::core::{EncoderKind, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEncoder;

impl Encoder for DefaultEncoder {
    fn kind(&self) -> EncoderKind {
        EncoderKind::Default
    }

    fn encode(&self, ctx: &EncodeContext<'_>, record: &LogRecord<'_>, buf: &mut String) {
        let datetime = record.datetime.joined();

        if let Some(name) = record.level_name {
            let (open, close) = ctx.colors.color_for(record.level);
            buf.push_str(open);
            buf.push_str(name);
            buf.push_str(close);
        }
        if !datetime.is_empty() {
            if record.level_name.is_some() {
                buf.push(' ');
            }
            buf.push('[');
            buf.push_str(datetime);
            buf.push(']');
        }
        if record.level_name.is_some() || !datetime.is_empty() {
            buf.push_str(": ");
        }

        push_sanitized(buf, &record.message);

        for pair in &record.extras {
            buf.push(' ');
            write_value(buf, pair.key, Target::Text, true);
            buf.push('=');
            write_value(buf, pair.value.unwrap_or(&Value::Nil), Target::Text, false);
        }
        buf.push('\n');
    }
}
