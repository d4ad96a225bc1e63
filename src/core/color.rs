//! ANSI color table
//!
//! Colors are resolved to escape sequences once, when the table is built.
//! A disabled table maps every color, including the reset, to the empty
//! string, so callers can inject codes unconditionally.

use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Named terminal colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    Reset,
}

impl Color {
    pub const ALL: [Color; 11] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
        Color::BrightBlack,
        Color::BrightRed,
        Color::Reset,
    ];

    /// Neutral color used when a requested color is not recognised
    pub const FALLBACK: Color = Color::White;

    pub fn name(&self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::White => "white",
            Color::BrightBlack => "gray",
            Color::BrightRed => "bright_red",
            Color::Reset => "reset",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "black" => Some(Color::Black),
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            "blue" => Some(Color::Blue),
            "magenta" | "purple" => Some(Color::Magenta),
            "cyan" => Some(Color::Cyan),
            "white" => Some(Color::White),
            "gray" | "grey" | "bright_black" => Some(Color::BrightBlack),
            "bright_red" => Some(Color::BrightRed),
            "reset" => Some(Color::Reset),
            _ => None,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }

    #[cfg(feature = "console")]
    fn escape_code(&self) -> String {
        use colored::Color as C;
        let ansi = match self {
            Color::Black => C::Black,
            Color::Red => C::Red,
            Color::Green => C::Green,
            Color::Yellow => C::Yellow,
            Color::Blue => C::Blue,
            Color::Magenta => C::Magenta,
            Color::Cyan => C::Cyan,
            Color::White => C::White,
            Color::BrightBlack => C::BrightBlack,
            Color::BrightRed => C::BrightRed,
            Color::Reset => return RESET_CODE.to_string(),
        };
        format!("\x1b[{}m", ansi.to_fg_str())
    }

    #[cfg(not(feature = "console"))]
    fn escape_code(&self) -> String {
        String::new()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

const RESET_CODE: &str = "\x1b[0m";

static ANSI_SUPPORTED: OnceLock<bool> = OnceLock::new();

/// Whether this process can emit ANSI escape sequences.
///
/// Probed once; every later call returns the memoised answer.
pub fn ansi_supported() -> bool {
    *ANSI_SUPPORTED.get_or_init(probe_ansi)
}

#[cfg(all(feature = "console", windows))]
fn probe_ansi() -> bool {
    colored::control::set_virtual_terminal(true).is_ok()
}

#[cfg(all(feature = "console", not(windows)))]
fn probe_ansi() -> bool {
    true
}

#[cfg(not(feature = "console"))]
fn probe_ansi() -> bool {
    false
}

/// Immutable color-to-escape-code lookup
#[derive(Debug, Clone)]
pub struct ColorTable {
    codes: Vec<String>,
    reset: String,
}

impl ColorTable {
    /// Build a table; `ansi = false` yields the all-empty table.
    pub fn new(ansi: bool) -> Self {
        if !ansi || !cfg!(feature = "console") {
            return Self::disabled();
        }
        Self {
            codes: Color::ALL.iter().map(Color::escape_code).collect(),
            reset: RESET_CODE.to_string(),
        }
    }

    /// Table for the current platform
    pub fn probe() -> Self {
        Self::new(ansi_supported())
    }

    pub fn disabled() -> Self {
        Self {
            codes: vec![String::new(); Color::ALL.len()],
            reset: String::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }

    #[inline]
    pub fn code(&self, color: Color) -> &str {
        &self.codes[color.index()]
    }

    #[inline]
    pub fn reset(&self) -> &str {
        &self.reset
    }

    /// Opening and closing codes for `color`
    pub fn wrap(&self, color: Color) -> (&str, &str) {
        (self.code(color), self.reset())
    }

    pub fn color_for(&self, level: LogLevel) -> (&str, &str) {
        self.wrap(level.color())
    }

    pub fn is_valid(candidate: &str) -> bool {
        Color::from_name(candidate).is_some()
    }

    /// Resolve a caller-supplied color name, falling back to white.
    pub fn resolve(candidate: &str) -> Color {
        Color::from_name(candidate).unwrap_or(Color::FALLBACK)
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_table_is_empty() {
        let table = ColorTable::disabled();
        for color in Color::ALL {
            assert_eq!(table.code(color), "");
        }
        assert_eq!(table.color_for(LogLevel::Error), ("", ""));
        assert!(!table.is_enabled());
    }

    #[cfg(feature = "console")]
    #[test]
    fn test_enabled_table_pairs_open_with_reset() {
        let table = ColorTable::new(true);
        let (open, close) = table.color_for(LogLevel::Error);
        assert_eq!(open, "\x1b[31m");
        assert_eq!(close, "\x1b[0m");
        assert_eq!(table.code(Color::Green), "\x1b[32m");
        assert_eq!(table.code(Color::BrightBlack), "\x1b[90m");
    }

    #[test]
    fn test_is_valid() {
        assert!(ColorTable::is_valid("red"));
        assert!(ColorTable::is_valid("Cyan"));
        assert!(!ColorTable::is_valid("chartreuse"));
    }

    #[test]
    fn test_invalid_color_falls_back_to_white() {
        assert_eq!(ColorTable::resolve("chartreuse"), Color::White);
        assert_eq!(ColorTable::resolve("blue"), Color::Blue);
    }

    #[test]
    fn test_probe_is_stable() {
        assert_eq!(ansi_supported(), ansi_supported());
    }
}
