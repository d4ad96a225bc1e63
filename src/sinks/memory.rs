//! In-memory sink
//!
//! Collects records in a shared buffer. Clones share the buffer, so a test
//! can keep one handle and give the other to a logger.

use crate::core::{Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each record as a string, in write order
    pub fn records(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|r| String::from_utf8_lossy(r).into_owned())
            .collect()
    }

    /// All records concatenated
    pub fn contents(&self) -> String {
        self.records().concat()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write(&mut self, record: &[u8]) -> Result<()> {
        self.records.lock().push(record.to_vec());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let handle = MemorySink::new();
        let mut sink = handle.clone();

        sink.write(b"one\n").expect("write");
        sink.write(b"two\n").expect("write");

        assert_eq!(handle.len(), 2);
        assert_eq!(handle.records(), vec!["one\n", "two\n"]);
        assert_eq!(handle.contents(), "one\ntwo\n");

        handle.clear();
        assert!(sink.records().is_empty());
    }
}
