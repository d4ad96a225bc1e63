//! File sink implementation

use crate::core::{LoggerError, Result, Sink};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends records to a file.
///
/// Each record is written under an exclusive advisory lock, so processes
/// sharing the file never interleave partial records.
#[derive(Debug)]
pub struct FileSink {
    file: File,
    path: PathBuf,
    name: String,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::file_sink(path.display().to_string(), e.to_string()))?;
        let name = format!("file:{}", path.display());

        Ok(Self { file, path, name })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn path_string(&self) -> String {
        self.path.display().to_string()
    }
}

impl Sink for FileSink {
    fn write(&mut self, record: &[u8]) -> Result<()> {
        FileExt::lock_exclusive(&self.file).map_err(|_| LoggerError::file_lock(self.path_string()))?;
        let written = self.file.write_all(record);
        let unlocked = FileExt::unlock(&self.file);

        written.map_err(|e| LoggerError::io_operation("writing record", self.path_string(), e))?;
        unlocked.map_err(|e| LoggerError::io_operation("unlocking log file", self.path_string(), e))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.file.flush()?;
        self.file.sync_data()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.file.flush();
    }
}
