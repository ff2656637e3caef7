//! In-memory printer for tests and dry runs.
//!
//! A [`MemoryDevice`] is a shared handle onto the fake printer's state: tests
//! keep one to configure status and failures, and to inspect what the
//! transport did. [`MemoryProvider::resolve`] hands out a [`MemoryConnection`]
//! that records a [`DeviceEvent::Release`] when dropped.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::PrintError;

use super::{DeviceProvider, DeviceStatus, PrintDevice};

/// Lifecycle calls seen by a [`MemoryDevice`], in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    QueryStatus,
    OpenJob,
    WriteJob,
    CloseJob,
    Release,
}

/// A job as the fake printer received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryJob {
    pub name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Default)]
struct MemoryState {
    status: DeviceStatus,
    fail_open: Option<String>,
    fail_write: Option<String>,
    write_limit: Option<usize>,
    current: Option<MemoryJob>,
    jobs: Vec<MemoryJob>,
    events: Vec<DeviceEvent>,
    open_handles: usize,
}

/// Test handle onto a fake printer.
#[derive(Debug, Clone, Default)]
pub struct MemoryDevice {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryDevice {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_status(&self, status: DeviceStatus) {
        self.lock().status = status;
    }

    /// Make every `open_job` fail with `message`.
    pub fn fail_open(&self, message: &str) {
        self.lock().fail_open = Some(message.to_string());
    }

    /// Make every `write_job` fail with `message`.
    pub fn fail_write(&self, message: &str) {
        self.lock().fail_write = Some(message.to_string());
    }

    /// Accept at most `limit` bytes per write.
    pub fn truncate_writes(&self, limit: usize) {
        self.lock().write_limit = Some(limit);
    }

    /// Completed jobs, oldest first.
    pub fn jobs(&self) -> Vec<MemoryJob> {
        self.lock().jobs.clone()
    }

    pub fn events(&self) -> Vec<DeviceEvent> {
        self.lock().events.clone()
    }

    /// Connections resolved and not yet dropped.
    pub fn open_handles(&self) -> usize {
        self.lock().open_handles
    }

    fn connect(&self) -> MemoryConnection {
        self.lock().open_handles += 1;
        MemoryConnection {
            state: Arc::clone(&self.state),
        }
    }
}

/// Provider over a fixed set of named [`MemoryDevice`]s.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    devices: HashMap<String, MemoryDevice>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a ready device under `name` and return its handle.
    pub fn add(&mut self, name: &str) -> MemoryDevice {
        let device = MemoryDevice::new();
        self.devices.insert(name.to_string(), device.clone());
        device
    }
}

impl DeviceProvider for MemoryProvider {
    type Device = MemoryConnection;

    fn resolve(&self, name: &str) -> Result<MemoryConnection, PrintError> {
        self.devices
            .get(name)
            .map(MemoryDevice::connect)
            .ok_or(PrintError::DeviceNotFound)
    }
}

/// A resolved [`MemoryDevice`].
#[derive(Debug)]
pub struct MemoryConnection {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryConnection {
    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PrintDevice for MemoryConnection {
    fn query_status(&mut self) -> Result<DeviceStatus, PrintError> {
        let mut state = self.lock();
        state.events.push(DeviceEvent::QueryStatus);
        Ok(state.status)
    }

    fn open_job(&mut self, doc_name: &str) -> Result<(), PrintError> {
        let mut state = self.lock();
        state.events.push(DeviceEvent::OpenJob);
        if let Some(message) = &state.fail_open {
            return Err(PrintError::PrintFailure(message.clone()));
        }
        state.current = Some(MemoryJob {
            name: doc_name.to_string(),
            data: Vec::new(),
        });
        Ok(())
    }

    fn write_job(&mut self, data: &[u8]) -> Result<usize, PrintError> {
        let mut state = self.lock();
        state.events.push(DeviceEvent::WriteJob);
        if let Some(message) = &state.fail_write {
            return Err(PrintError::PrintFailure(message.clone()));
        }
        let accepted = state.write_limit.map_or(data.len(), |limit| limit.min(data.len()));
        match state.current.as_mut() {
            Some(job) => {
                job.data.extend_from_slice(&data[..accepted]);
                Ok(accepted)
            }
            None => Err(PrintError::PrintFailure("No open job".to_string())),
        }
    }

    fn close_job(&mut self) -> Result<(), PrintError> {
        let mut state = self.lock();
        state.events.push(DeviceEvent::CloseJob);
        match state.current.take() {
            Some(job) => {
                state.jobs.push(job);
                Ok(())
            }
            None => Err(PrintError::PrintFailure("No open job".to_string())),
        }
    }
}

impl Drop for MemoryConnection {
    fn drop(&mut self) {
        let mut state = self.lock();
        state.events.push(DeviceEvent::Release);
        state.open_handles = state.open_handles.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_unknown() {
        let provider = MemoryProvider::new();
        assert!(matches!(
            provider.resolve("nope"),
            Err(PrintError::DeviceNotFound)
        ));
    }

    #[test]
    fn test_connection_records_job() {
        let mut provider = MemoryProvider::new();
        let device = provider.add("lp");

        {
            let mut conn = provider.resolve("lp").unwrap();
            assert_eq!(device.open_handles(), 1);
            conn.open_job("doc").unwrap();
            assert_eq!(conn.write_job(b"ab").unwrap(), 2);
            assert_eq!(conn.write_job(b"c").unwrap(), 1);
            conn.close_job().unwrap();
        }

        assert_eq!(device.open_handles(), 0);
        assert_eq!(
            device.jobs(),
            vec![MemoryJob {
                name: "doc".into(),
                data: b"abc".to_vec()
            }]
        );
        assert_eq!(device.events().last(), Some(&DeviceEvent::Release));
    }

    #[test]
    fn test_write_without_job_fails() {
        let mut provider = MemoryProvider::new();
        provider.add("lp");
        let mut conn = provider.resolve("lp").unwrap();
        assert!(conn.write_job(b"x").is_err());
        assert!(conn.close_job().is_err());
    }

    #[test]
    fn test_truncated_write() {
        let mut provider = MemoryProvider::new();
        let device = provider.add("lp");
        device.truncate_writes(2);

        let mut conn = provider.resolve("lp").unwrap();
        conn.open_job("doc").unwrap();
        assert_eq!(conn.write_job(b"abcd").unwrap(), 2);
        conn.close_job().unwrap();
        assert_eq!(device.jobs()[0].data, b"ab");
    }
}
