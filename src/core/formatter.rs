//! Per-format literal rendering of a single [`Value`]
//!
//! Values are written straight into the caller's buffer. Strings are the
//! fast path; `Other` values were already rendered through `Display` when
//! the argument was built, so every kind renders without failing.

use super::value::Value;
use std::fmt::Write as _;

/// Literal syntax to render a value in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Plain `key=value` text
    Text,
    Json,
    Yaml,
}

/// Characters that force a YAML scalar into quotes
const YAML_SPECIAL: &[char] = &[
    ':', '{', '}', '[', ']', ',', '&', '*', '#', '?', '|', '-', '<', '>', '=', '!', '%', '@',
    '\\', ' ',
];

/// Render `value` into a new string.
pub fn format(value: &Value, target: Target, is_key: bool) -> String {
    let mut out = String::with_capacity(value.size_hint());
    write_value(&mut out, value, target, is_key);
    out
}

/// Append the literal form of `value` to `out`.
pub fn write_value(out: &mut String, value: &Value, target: Target, is_key: bool) {
    match value {
        Value::Str(s) | Value::Other(s) => write_str(out, s, target, is_key),
        Value::Char(c) => write_char(out, *c, target, is_key),
        Value::Int(i) => write_scalar(out, i, target, is_key),
        Value::Int64(i) => write_scalar(out, i, target, is_key),
        Value::Float(f) => write_float(out, *f, target, is_key),
        Value::Bool(b) => write_scalar(out, b, target, is_key),
        Value::Nil => write_scalar(out, &"null", target, is_key),
    }
}

/// Numbers, booleans and null. Only JSON keys need quoting.
fn write_scalar<T: std::fmt::Display>(out: &mut String, scalar: &T, target: Target, is_key: bool) {
    let quoted = is_key && target == Target::Json;
    if quoted {
        out.push('"');
    }
    let _ = write!(out, "{}", scalar);
    if quoted {
        out.push('"');
    }
}

fn write_float(out: &mut String, f: f64, target: Target, is_key: bool) {
    if f.is_finite() {
        return write_scalar(out, &f, target, is_key);
    }
    match target {
        Target::Json if is_key => {
            out.push('"');
            let _ = write!(out, "{}", f);
            out.push('"');
        }
        Target::Json => out.push_str("null"),
        Target::Yaml => out.push_str(if f.is_nan() {
            ".nan"
        } else if f > 0.0 {
            ".inf"
        } else {
            "-.inf"
        }),
        Target::Text => {
            let _ = write!(out, "{}", f);
        }
    }
}

fn write_char(out: &mut String, c: char, target: Target, is_key: bool) {
    let mut buf = [0u8; 4];
    let s: &str = c.encode_utf8(&mut buf);
    match target {
        Target::Json => write_json_string(out, s),
        // Character keys stay bare unless they would break the line.
        Target::Text if is_key => write_text_key(out, s),
        Target::Yaml if is_key => write_yaml_str(out, s),
        Target::Yaml => write_yaml_quoted(out, s),
        Target::Text => write_text_quoted(out, s),
    }
}

fn write_str(out: &mut String, s: &str, target: Target, is_key: bool) {
    match target {
        Target::Json => write_json_string(out, s),
        Target::Yaml => write_yaml_str(out, s),
        Target::Text if is_key => write_text_key(out, s),
        Target::Text => write_text_str(out, s),
    }
}

/// Quoted JSON string with the mandatory escapes.
pub fn write_json_string(out: &mut String, s: &str) {
    out.reserve(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Scalars a YAML loader would read back as null, a boolean or a number
const YAML_KEYWORDS: &[&str] = &[
    "~", "null", "true", "false", "yes", "no", "on", "off", "y", "n", ".inf", "+.inf", "-.inf",
    ".nan",
];

/// Characters libyaml accepts unescaped inside a scalar
fn yaml_printable(c: char) -> bool {
    matches!(c,
        '\u{20}'..='\u{7e}' | '\u{85}' | '\u{a0}'..='\u{d7ff}' | '\u{e000}'..='\u{fffd}' | '\u{10000}'..=char::MAX)
        && c != '\u{feff}'
}

/// NEL and the Unicode line/paragraph separators count as line breaks.
fn yaml_break(c: char) -> bool {
    matches!(c, '\u{85}' | '\u{2028}' | '\u{2029}')
}

fn yaml_resolves_to_non_string(s: &str) -> bool {
    if YAML_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(s)) {
        return true;
    }
    let unsigned = s.trim_start_matches(['+', '-']);
    let radix = unsigned.get(..2).map(str::to_ascii_lowercase);
    matches!(radix.as_deref(), Some("0x" | "0o" | "0b")) || s.replace('_', "").parse::<f64>().is_ok()
}

pub fn yaml_needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s.chars().any(|c| {
            YAML_SPECIAL.contains(&c)
                || matches!(c, '"' | '\'' | '`')
                || !yaml_printable(c)
                || yaml_break(c)
        })
        || yaml_resolves_to_non_string(s)
}

/// YAML scalar, double-quoted only when a plain scalar would break or
/// would load as something other than a string (`true`, `123`, `~`).
pub fn write_yaml_str(out: &mut String, s: &str) {
    if yaml_needs_quotes(s) {
        write_yaml_quoted(out, s);
    } else {
        out.push_str(s);
    }
}

fn write_yaml_quoted(out: &mut String, s: &str) {
    out.reserve(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if !yaml_printable(c) || yaml_break(c) => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn text_needs_quotes(s: &str) -> bool {
    s.is_empty() || s.contains(' ') || s.contains('"') || s.contains('=')
}

fn write_text_str(out: &mut String, s: &str) {
    if text_needs_quotes(s) {
        write_text_quoted(out, s);
    } else {
        push_sanitized(out, s);
    }
}

fn write_text_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c => push_sanitized_char(out, c),
        }
    }
    out.push('"');
}

fn text_key_needs_quotes(key: &str) -> bool {
    key.is_empty() || key.chars().any(|c| c.is_whitespace() || c == '=' || c == '"')
}

/// Keys are written literally, quoted only when they would split the
/// `key=value` token.
fn write_text_key(out: &mut String, key: &str) {
    if text_key_needs_quotes(key) {
        write_text_quoted(out, key);
    } else {
        push_sanitized(out, key);
    }
}

/// Append `s` with line breaks and tabs escaped, so one record stays one line.
pub fn push_sanitized(out: &mut String, s: &str) {
    out.reserve(s.len());
    for c in s.chars() {
        push_sanitized_char(out, c);
    }
}

fn push_sanitized_char(out: &mut String, c: char) {
    match c {
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c => out.push(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_quoting() {
        assert_eq!(
            format(&Value::from("value: with colon"), Target::Yaml, false),
            "\"value: with colon\""
        );
        assert_eq!(format(&Value::from("plain"), Target::Yaml, false), "plain");
        assert_eq!(format(&Value::from(""), Target::Yaml, false), "\"\"");
        assert_eq!(format(&Value::from("a\nb"), Target::Yaml, false), "\"a\\nb\"");
    }

    #[test]
    fn test_yaml_reserved_and_break_characters() {
        assert_eq!(format(&Value::from("`cmd`"), Target::Yaml, false), "\"`cmd`\"");
        assert_eq!(
            format(&Value::from("x\u{2028}y\u{2029}z"), Target::Yaml, false),
            "\"x\\u2028y\\u2029z\""
        );
        assert_eq!(format(&Value::from("a\u{85}b"), Target::Yaml, false), "\"a\\u0085b\"");
        assert_eq!(format(&Value::from("\u{feff}"), Target::Yaml, false), "\"\\ufeff\"");
        assert_eq!(format(&Value::from("\u{7f}"), Target::Yaml, false), "\"\\u007f\"");
    }

    #[test]
    fn test_yaml_quotes_strings_that_load_as_other_types() {
        for s in ["true", "False", "null", "~", "123", "-4.5", "1e3", "0x1F", "1_000", ".inf"] {
            assert!(yaml_needs_quotes(s), "{:?} should be quoted", s);
        }
        for s in ["plain", "127.0.0.1", "v1", "truth"] {
            assert!(!yaml_needs_quotes(s), "{:?} should stay plain", s);
        }
        assert_eq!(format(&Value::from("42"), Target::Yaml, false), "\"42\"");
        assert_eq!(format(&Value::Int(42), Target::Yaml, false), "42");
    }

    #[test]
    fn test_yaml_special_characters() {
        for special in YAML_SPECIAL {
            let s = format!("x{}y", special);
            assert!(yaml_needs_quotes(&s), "{:?} should be quoted", s);
        }
    }

    #[test]
    fn test_json_strings_always_quoted() {
        assert_eq!(format(&Value::from("plain"), Target::Json, false), "\"plain\"");
        assert_eq!(
            format(&Value::from("say \"hi\"\\"), Target::Json, false),
            "\"say \\\"hi\\\"\\\\\""
        );
        assert_eq!(format(&Value::from("\u{1}"), Target::Json, false), "\"\\u0001\"");
    }

    #[test]
    fn test_char_key_value_asymmetry() {
        let c = Value::Char('k');
        assert_eq!(format(&c, Target::Yaml, true), "k");
        assert_eq!(format(&c, Target::Yaml, false), "\"k\"");
        assert_eq!(format(&c, Target::Text, true), "k");
        assert_eq!(format(&c, Target::Text, false), "\"k\"");
        assert_eq!(format(&c, Target::Json, false), "\"k\"");
        assert_eq!(format(&Value::Char('\n'), Target::Text, true), "\"\\n\"");
    }

    #[test]
    fn test_numbers_and_booleans() {
        assert_eq!(format(&Value::Int(-3), Target::Json, false), "-3");
        assert_eq!(format(&Value::Int64(1 << 40), Target::Yaml, false), "1099511627776");
        assert_eq!(format(&Value::Float(2.50), Target::Json, false), "2.5");
        assert_eq!(format(&Value::Float(3.0), Target::Yaml, false), "3");
        assert_eq!(format(&Value::Bool(true), Target::Json, false), "true");
        assert_eq!(format(&Value::Nil, Target::Yaml, false), "null");
    }

    #[test]
    fn test_json_keys_are_strings() {
        assert_eq!(format(&Value::Int(5), Target::Json, true), "\"5\"");
        assert_eq!(format(&Value::Bool(false), Target::Json, true), "\"false\"");
        assert_eq!(format(&Value::Int(5), Target::Yaml, true), "5");
    }

    #[test]
    fn test_non_finite_floats() {
        assert_eq!(format(&Value::Float(f64::NAN), Target::Json, false), "null");
        assert_eq!(format(&Value::Float(f64::INFINITY), Target::Yaml, false), ".inf");
        assert_eq!(
            format(&Value::Float(f64::NEG_INFINITY), Target::Yaml, false),
            "-.inf"
        );
    }

    #[test]
    fn test_text_values() {
        assert_eq!(format(&Value::from("alice"), Target::Text, false), "alice");
        assert_eq!(
            format(&Value::from("SELECT * FROM t WHERE id=1"), Target::Text, false),
            "\"SELECT * FROM t WHERE id=1\""
        );
        assert_eq!(format(&Value::from("user id"), Target::Text, true), "\"user id\"");
        assert_eq!(format(&Value::from("a=b"), Target::Text, true), "\"a=b\"");
        assert_eq!(format(&Value::from(""), Target::Text, true), "\"\"");
        assert_eq!(format(&Value::from("!!"), Target::Text, true), "!!");
    }

    #[test]
    fn test_fallback_kind() {
        let v = Value::display(&std::net::Ipv4Addr::LOCALHOST);
        assert_eq!(format(&v, Target::Yaml, false), "127.0.0.1");
        assert_eq!(format(&v, Target::Json, false), "\"127.0.0.1\"");
    }
}
