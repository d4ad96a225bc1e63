//! Console sink implementation

use crate::core::{LoggerError, Result, Sink};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Writes records to the process stdout or stderr
#[derive(Debug)]
pub struct ConsoleSink {
    stream: Stream,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self {
            stream: Stream::Stdout,
        }
    }

    pub fn stderr() -> Self {
        Self {
            stream: Stream::Stderr,
        }
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, record: &[u8]) -> Result<()> {
        // Hold the stream lock for the whole record.
        let result = match self.stream {
            Stream::Stdout => std::io::stdout().lock().write_all(record),
            Stream::Stderr => std::io::stderr().lock().write_all(record),
        };
        result.map_err(|e| LoggerError::io_operation("writing record", self.name(), e))
    }

    fn flush(&mut self) -> Result<()> {
        match self.stream {
            Stream::Stdout => std::io::stdout().flush()?,
            Stream::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.stream {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(ConsoleSink::stdout().name(), "stdout");
        assert_eq!(ConsoleSink::stderr().name(), "stderr");
    }

    #[test]
    fn test_write_and_flush() {
        let mut sink = ConsoleSink::stderr();
        sink.write(b"console sink test\n").expect("write");
        sink.flush().expect("flush");
    }
}
