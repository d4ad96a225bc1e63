//! Logging macros for ergonomic argument lists.
//!
//! Each argument is converted with [`Value::from`](crate::Value), so string
//! literals, numbers, booleans and chars can be mixed freely. The first
//! argument is the message; the rest pair up as key/value extras.
//!
//! # Examples
//!
//! ```
//! use rust_log_encoder::prelude::*;
//! use rust_log_encoder::info;
//!
//! let logger = Logger::builder().stdout(MemorySink::new()).build();
//!
//! // Message only
//! info!(logger, "Server started");
//!
//! // With extras
//! let port = 8080;
//! info!(logger, "Listening", "port", port, "tls", false);
//! ```

/// Log at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_log_encoder::prelude::*;
/// # let logger = Logger::builder().stdout(MemorySink::new()).stderr(MemorySink::new()).build();
/// use rust_log_encoder::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Request failed", "status", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:expr),+ $(,)?) => {
        $logger.log($level, &[$($crate::Value::from($arg)),+])
    };
}

/// Log a debug-level record.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg),+)
    };
}

/// Log an info-level record.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg),+)
    };
}

/// Log a warning-level record.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg),+)
    };
}

/// Log an error-level record.
///
/// # Examples
///
/// ```
/// # use rust_log_encoder::prelude::*;
/// # let logger = Logger::builder().stderr(MemorySink::new()).build();
/// use rust_log_encoder::error;
/// error!(logger, "Failed to connect", "host", "db.internal", "attempt", 3);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg),+)
    };
}

/// Log a fatal record and terminate through the logger's fatal handler.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.fatal_error(&[$($crate::Value::from($arg)),+])
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, Logger, LoggerConfig};
    use crate::sinks::MemorySink;
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Arc;

    fn logger() -> (Logger, MemorySink, MemorySink) {
        let out = MemorySink::new();
        let err = MemorySink::new();
        let config = LoggerConfig::new()
            .with_level(LogLevel::Debug)
            .with_date(false)
            .with_time(false);
        let logger = Logger::builder()
            .config(config)
            .stdout(out.clone())
            .stderr(err.clone())
            .build();
        (logger, out, err)
    }

    #[test]
    fn test_log_macro() {
        let (logger, out, _) = logger();
        log!(logger, LogLevel::Info, "Test message");
        log!(logger, LogLevel::Info, "Formatted", "answer", 42,);
        assert_eq!(
            out.records(),
            vec!["INFO: Test message\n", "INFO: Formatted answer=42\n"]
        );
    }

    #[test]
    fn test_level_macros() {
        let (logger, out, err) = logger();
        debug!(logger, "d");
        info!(logger, "i", "k", 'v');
        warn!(logger, "w", "ratio", 0.5);
        error!(logger, "e", "ok", false);

        assert_eq!(
            out.records(),
            vec!["DEBUG: d\n", "INFO: i k=\"v\"\n", "WARN: w ratio=0.5\n"]
        );
        assert_eq!(err.records(), vec!["ERROR: e ok=false\n"]);
    }

    #[test]
    fn test_fatal_macro() {
        let err = MemorySink::new();
        let code = Arc::new(AtomicI32::new(0));
        let seen = Arc::clone(&code);
        let logger = Logger::builder()
            .show_date(false)
            .show_time(false)
            .stdout(MemorySink::new())
            .stderr(err.clone())
            .on_fatal(Arc::new(move |c| seen.store(c, Ordering::SeqCst)))
            .build();

        fatal!(logger, "Critical failure", "system", "disk");
        assert_eq!(code.load(Ordering::SeqCst), 1);
        assert_eq!(err.records(), vec!["FATAL: Critical failure system=disk\n"]);
    }
}
