//! Dynamically typed log arguments
//!
//! Log calls take a flat list of [`Value`]s: the first is the message, the
//! rest are key/value "extras". Every Rust primitive the logging macros
//! accept converts into one of these variants.

use std::fmt;

/// A single log argument
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value (`None`, `()`)
    #[default]
    Nil,
    Str(String),
    Char(char),
    Int(i32),
    Int64(i64),
    Float(f64),
    Bool(bool),
    /// Anything else, already rendered through `Display`
    Other(String),
}

impl Value {
    /// Fallback for any displayable type without a dedicated variant.
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Value::Other(value.to_string())
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Borrowed text of string-like values
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) | Value::Other(s) => Some(s),
            _ => None,
        }
    }

    /// Rough rendered size, used for buffer pre-sizing.
    pub fn size_hint(&self) -> usize {
        match self {
            Value::Nil => 4,
            Value::Str(s) | Value::Other(s) => s.len() + 2,
            Value::Char(c) => c.len_utf8() + 2,
            Value::Int(_) => 11,
            Value::Int64(_) => 20,
            Value::Float(_) => 24,
            Value::Bool(_) => 5,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "null"),
            Value::Str(s) | Value::Other(s) => write!(f, "{}", s),
            Value::Char(c) => write!(f, "{}", c),
            Value::Int(i) => write!(f, "{}", i),
            Value::Int64(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Nil
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty: $($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::$variant(<$target>::from(i))
                }
            }
        )+
    };
}

impl_from_int!(Int, i32: i8, i16, i32, u8, u16);
impl_from_int!(Int64, i64: i64, u32);

impl From<isize> for Value {
    fn from(i: isize) -> Self {
        Value::Int64(i as i64)
    }
}

impl From<u64> for Value {
    fn from(i: u64) -> Self {
        i64::try_from(i)
            .map(Value::Int64)
            .unwrap_or_else(|_| Value::Other(i.to_string()))
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::from(i as u64)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Nil)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from("a"), Value::Str("a".to_string()));
        assert_eq!(Value::from(7_u8), Value::Int(7));
        assert_eq!(Value::from(7_i64), Value::Int64(7));
        assert_eq!(Value::from(u64::MAX), Value::Other(u64::MAX.to_string()));
        assert_eq!(Value::from(1.5_f32), Value::Float(1.5));
        assert_eq!(Value::from('x'), Value::Char('x'));
        assert_eq!(Value::from(None::<i32>), Value::Nil);
        assert_eq!(Value::from(Some(true)), Value::Bool(true));
    }

    #[test]
    fn test_display_fallback() {
        let addr = std::net::Ipv4Addr::new(127, 0, 0, 1);
        assert_eq!(Value::display(&addr), Value::Other("127.0.0.1".to_string()));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Nil.to_string(), "null");
        assert_eq!(Value::Float(2.0).to_string(), "2");
        assert_eq!(Value::Float(0.25).to_string(), "0.25");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }
}
