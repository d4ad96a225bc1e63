//! Date/time rendering for log records
//!
//! Provides the date/time layout profiles and the `DateTimeSource`, which
//! reads "now" through an injectable [`Clock`] and renders the date, time
//! or combined string a record asks for.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::sync::Arc;

/// Date/time layout profiles
///
/// # Examples
///
/// ```
/// use rust_log_encoder::core::DateTimeFormat;
/// use chrono::{TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2099, 11, 1, 15, 30, 45).unwrap();
/// assert_eq!(DateTimeFormat::Us.format_date(&now), "11/01/2099");
/// assert_eq!(DateTimeFormat::Us.format_time(&now), "03:30:45 PM");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateTimeFormat {
    /// `2099-11-01` / `15:30:45`
    #[default]
    Iso,

    /// `11/01/2099` / `03:30:45 PM`
    Us,

    /// `01/11/2099` / `15:30:45`
    Eu,

    /// Seconds since the Unix epoch: `4097230245`
    ///
    /// Date, time and combined requests all collapse to this one value.
    Unix,

    /// strftime layouts for the date and time parts
    Custom { date: String, time: String },
}

impl DateTimeFormat {
    fn date_layout(&self) -> &str {
        match self {
            DateTimeFormat::Iso => "%Y-%m-%d",
            DateTimeFormat::Us => "%m/%d/%Y",
            DateTimeFormat::Eu => "%d/%m/%Y",
            DateTimeFormat::Unix => "%s",
            DateTimeFormat::Custom { date, .. } => date,
        }
    }

    fn time_layout(&self) -> &str {
        match self {
            DateTimeFormat::Iso | DateTimeFormat::Eu => "%H:%M:%S",
            DateTimeFormat::Us => "%I:%M:%S %p",
            DateTimeFormat::Unix => "%s",
            DateTimeFormat::Custom { time, .. } => time,
        }
    }

    #[must_use]
    pub fn format_date(&self, datetime: &DateTime<Utc>) -> String {
        render_layout(datetime, self.date_layout(), "%Y-%m-%d")
    }

    #[must_use]
    pub fn format_time(&self, datetime: &DateTime<Utc>) -> String {
        render_layout(datetime, self.time_layout(), "%H:%M:%S")
    }

    /// First layout chrono cannot parse, if any
    pub fn invalid_layout(&self) -> Option<&str> {
        [self.date_layout(), self.time_layout()]
            .into_iter()
            .find(|layout| StrftimeItems::new(layout).any(|item| matches!(item, Item::Error)))
    }

    /// Check if this is the epoch-seconds format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, DateTimeFormat::Unix)
    }
}

/// Render with `layout`, or `fallback` when the layout has bad specifiers.
fn render_layout(datetime: &DateTime<Utc>, layout: &str, fallback: &str) -> String {
    let mut out = String::with_capacity(layout.len() + 16);
    if write!(out, "{}", datetime.format(layout)).is_ok() {
        return out;
    }
    out.clear();
    let _ = write!(out, "{}", datetime.format(fallback));
    out
}

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Date/time strings for one record
///
/// At most one of the two shapes is populated: either `date`/`time`
/// individually, or `datetime` alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDateTime {
    pub date: String,
    pub time: String,
    pub datetime: String,
}

impl RenderedDateTime {
    pub fn is_empty(&self) -> bool {
        self.date.is_empty() && self.time.is_empty() && self.datetime.is_empty()
    }

    /// Single display string: the combined value, or whichever part is set.
    pub fn joined(&self) -> &str {
        if !self.datetime.is_empty() {
            &self.datetime
        } else if !self.date.is_empty() {
            &self.date
        } else {
            &self.time
        }
    }

    pub fn len(&self) -> usize {
        self.date.len() + self.time.len() + self.datetime.len()
    }
}

/// Renders "now" through an injectable clock
#[derive(Clone)]
pub struct DateTimeSource {
    clock: Arc<dyn Clock>,
}

impl DateTimeSource {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    pub fn fixed(instant: DateTime<Utc>) -> Self {
        Self::new(Arc::new(FixedClock(instant)))
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Render the requested parts of the current instant.
    ///
    /// The clock is only read when at least one part is requested.
    pub fn render(&self, want_date: bool, want_time: bool, format: &DateTimeFormat) -> RenderedDateTime {
        if !want_date && !want_time {
            return RenderedDateTime::default();
        }
        Self::render_at(&self.now(), want_date, want_time, format)
    }

    pub fn render_at(
        now: &DateTime<Utc>,
        want_date: bool,
        want_time: bool,
        format: &DateTimeFormat,
    ) -> RenderedDateTime {
        let mut rendered = RenderedDateTime::default();
        if !want_date && !want_time {
            return rendered;
        }

        if format.is_numeric() {
            rendered.datetime = now.timestamp().to_string();
        } else if want_date && want_time {
            let date = format.format_date(now);
            let time = format.format_time(now);
            let mut combined = String::with_capacity(date.len() + time.len() + 1);
            combined.push_str(&date);
            combined.push(' ');
            combined.push_str(&time);
            rendered.datetime = combined;
        } else if want_date {
            rendered.date = format.format_date(now);
        } else {
            rendered.time = format.format_time(now);
        }
        rendered
    }
}

impl Default for DateTimeSource {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for DateTimeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateTimeSource").finish_non_exhaustive()
    }
}
