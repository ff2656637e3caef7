//! Raw device nodes and capture files.
//!
//! The device name is a filesystem path that must already exist: a printer
//! node such as `/dev/usb/lp0`, or a file a virtual printer captures into.
//! Each job is opened in append mode, written in full and flushed.
//!
//! There is no status channel here, so the device always reports ready.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::PrintError;

use super::{DeviceProvider, DeviceStatus, PrintDevice};

/// Resolves device names as paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileProvider;

impl FileProvider {
    pub fn new() -> Self {
        Self
    }
}

impl DeviceProvider for FileProvider {
    type Device = FileDevice;

    fn resolve(&self, name: &str) -> Result<FileDevice, PrintError> {
        let path = Path::new(name);
        if !path.exists() {
            return Err(PrintError::DeviceNotFound);
        }
        if path.is_dir() {
            return Err(PrintError::PrintFailure(format!(
                "{} is a directory",
                path.display()
            )));
        }
        Ok(FileDevice {
            path: path.to_path_buf(),
            file: None,
        })
    }
}

/// A path-backed printer.
#[derive(Debug)]
pub struct FileDevice {
    path: PathBuf,
    file: Option<File>,
}

impl FileDevice {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrintDevice for FileDevice {
    fn query_status(&mut self) -> Result<DeviceStatus, PrintError> {
        Ok(DeviceStatus::READY)
    }

    fn open_job(&mut self, doc_name: &str) -> Result<(), PrintError> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                PrintError::PrintFailure(format!("Failed to open {}: {}", self.path.display(), e))
            })?;
        debug!(path = %self.path.display(), doc_name, "Opened job");
        self.file = Some(file);
        Ok(())
    }

    fn write_job(&mut self, data: &[u8]) -> Result<usize, PrintError> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| PrintError::PrintFailure("No open job".to_string()))?;
        file.write_all(data)
            .map_err(|e| PrintError::PrintFailure(format!("Write failed: {}", e)))?;
        Ok(data.len())
    }

    fn close_job(&mut self) -> Result<(), PrintError> {
        let mut file = self
            .file
            .take()
            .ok_or_else(|| PrintError::PrintFailure("No open job".to_string()))?;
        file.flush()
            .map_err(|e| PrintError::PrintFailure(format!("Flush failed: {}", e)))?;
        Ok(())
    }
}
