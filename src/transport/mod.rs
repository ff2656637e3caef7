//! # Print Transport
//!
//! Delivers a finished [`CommandStream`] to a named printer as one raw job.
//!
//! ## Flow
//!
//! ```text
//! name ──► resolve ──► query_status ──► open_job ──► write_job ──► close_job
//!            │               │                           │
//!     DeviceNotFound   Offline / OutOfPaper /       PrintFailure
//!                      PaperJam / DeviceError
//! ```
//!
//! Every outcome is folded into a [`PrintJobResult`]; nothing is retried and
//! nothing panics past [`PrintTransport::print_bytes`]. The job is closed on
//! every exit path once it has been opened, and the device handle is released
//! when the resolved device goes out of scope.
//!
//! ## Backends
//!
//! | Provider | Device names | Platform |
//! |----------|--------------|----------|
//! | [`MemoryProvider`] | registered names | all (tests) |
//! | [`FileProvider`] | existing paths (`/dev/usb/lp0`, capture files) | all |
//! | [`SpoolerProvider`] | installed printer names | Windows |
//!
//! ## Example
//!
//! ```
//! use kiosk_receipt::receipt::render_text;
//! use kiosk_receipt::transport::{MemoryProvider, PrintTransport};
//!
//! let mut provider = MemoryProvider::new();
//! let device = provider.add("POS-80");
//! let transport = PrintTransport::new(provider);
//!
//! let result = transport.send("POS-80", &render_text(Some("hello")));
//! assert!(result.success);
//! assert_eq!(result.device_name, "POS-80");
//! assert_eq!(device.jobs().len(), 1);
//! ```

pub mod file;
pub mod memory;
#[cfg(windows)]
pub mod spooler;

pub use file::{FileDevice, FileProvider};
pub use memory::{DeviceEvent, MemoryConnection, MemoryDevice, MemoryJob, MemoryProvider};
#[cfg(windows)]
pub use spooler::{SpoolerDevice, SpoolerProvider};

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::error::PrintError;
use crate::stream::CommandStream;

/// Document name used when none is configured.
pub const DEFAULT_JOB_NAME: &str = "Kiosk Receipt";

// ============================================================================
// DEVICE SEAM
// ============================================================================

/// An open printer handle that accepts raw jobs.
///
/// Implementations release the underlying handle when dropped.
pub trait PrintDevice {
    /// Current status bits
    fn query_status(&mut self) -> Result<DeviceStatus, PrintError>;

    /// Start a raw job named `doc_name`
    fn open_job(&mut self, doc_name: &str) -> Result<(), PrintError>;

    /// Write to the open job; returns the number of bytes accepted
    fn write_job(&mut self, data: &[u8]) -> Result<usize, PrintError>;

    /// Finish the open job
    fn close_job(&mut self) -> Result<(), PrintError>;
}

/// Resolves a device name to an open [`PrintDevice`].
pub trait DeviceProvider {
    type Device: PrintDevice;

    /// Open the named device. Unknown names are [`PrintError::DeviceNotFound`].
    fn resolve(&self, name: &str) -> Result<Self::Device, PrintError>;
}

// ============================================================================
// STATUS
// ============================================================================

/// Printer status bits, using the Windows spooler's `PRINTER_STATUS_*` values.
///
/// Only the blocking bits make a device not ready. Informational states such
/// as busy, printing, waiting, processing, warming up or power save are
/// accepted and the job is sent. This differs from the kiosk shell, which
/// refused to print on any non-zero status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct DeviceStatus(u32);

impl DeviceStatus {
    pub const READY: Self = Self(0);
    pub const PAUSED: Self = Self(0x0000_0001);
    pub const ERROR: Self = Self(0x0000_0002);
    pub const PENDING_DELETION: Self = Self(0x0000_0004);
    pub const PAPER_JAM: Self = Self(0x0000_0008);
    pub const PAPER_OUT: Self = Self(0x0000_0010);
    pub const MANUAL_FEED: Self = Self(0x0000_0020);
    pub const PAPER_PROBLEM: Self = Self(0x0000_0040);
    pub const OFFLINE: Self = Self(0x0000_0080);
    pub const BUSY: Self = Self(0x0000_0200);
    pub const PRINTING: Self = Self(0x0000_0400);
    pub const WAITING: Self = Self(0x0000_2000);
    pub const PROCESSING: Self = Self(0x0000_4000);
    pub const WARMING_UP: Self = Self(0x0001_0000);
    pub const POWER_SAVE: Self = Self(0x0100_0000);

    /// Bits that stop a job from being sent.
    const BLOCKING: u32 = Self::PAUSED.0
        | Self::ERROR.0
        | Self::PENDING_DELETION.0
        | Self::PAPER_JAM.0
        | Self::PAPER_OUT.0
        | Self::MANUAL_FEED.0
        | Self::PAPER_PROBLEM.0
        | Self::OFFLINE.0;

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_ready(self) -> bool {
        self.0 & Self::BLOCKING == 0
    }

    /// Map the status to the error a job would fail with.
    ///
    /// Precedence: offline, out of paper, paper jam, then any other blocking
    /// bit as [`PrintError::DeviceError`] with the raw status.
    ///
    /// ```
    /// use kiosk_receipt::error::PrintError;
    /// use kiosk_receipt::transport::DeviceStatus;
    ///
    /// let status = DeviceStatus::PAPER_OUT | DeviceStatus::OFFLINE;
    /// assert_eq!(status.check(), Err(PrintError::Offline));
    /// assert_eq!(DeviceStatus::PRINTING.check(), Ok(()));
    /// ```
    pub fn check(self) -> Result<(), PrintError> {
        if self.is_ready() {
            Ok(())
        } else if self.contains(Self::OFFLINE) {
            Err(PrintError::Offline)
        } else if self.contains(Self::PAPER_OUT) {
            Err(PrintError::OutOfPaper)
        } else if self.contains(Self::PAPER_JAM) {
            Err(PrintError::PaperJam)
        } else {
            Err(PrintError::DeviceError(self.0))
        }
    }
}

impl std::ops::BitOr for DeviceStatus {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

// ============================================================================
// RESULT
// ============================================================================

/// Outcome of one print request, as handed back to the kiosk UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintJobResult {
    pub success: bool,
    pub message: String,
    pub device_name: String,
}

impl PrintJobResult {
    pub fn printed(device_name: &str) -> Self {
        Self {
            success: true,
            message: format!("Printed to {}", device_name),
            device_name: device_name.to_string(),
        }
    }

    pub fn failed(device_name: &str, error: &PrintError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            device_name: device_name.to_string(),
        }
    }
}

// ============================================================================
// JOB GUARD
// ============================================================================

/// An open job. Closes itself on drop if [`Job::close`] was not reached.
struct Job<'a, D: PrintDevice> {
    device: &'a mut D,
    open: bool,
}

impl<'a, D: PrintDevice> Job<'a, D> {
    fn open(device: &'a mut D, doc_name: &str) -> Result<Self, PrintError> {
        device.open_job(doc_name)?;
        Ok(Self { device, open: true })
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), PrintError> {
        let written = self.device.write_job(data)?;
        if written != data.len() {
            return Err(PrintError::PrintFailure(format!(
                "Incomplete write: {} of {} bytes",
                written,
                data.len()
            )));
        }
        Ok(())
    }

    fn close(mut self) -> Result<(), PrintError> {
        self.open = false;
        self.device.close_job()
    }
}

impl<D: PrintDevice> Drop for Job<'_, D> {
    fn drop(&mut self) {
        if self.open
            && let Err(e) = self.device.close_job()
        {
            warn!(error = %e, "Failed to close print job");
        }
    }
}

// ============================================================================
// TRANSPORT
// ============================================================================

/// Sends raw jobs through a [`DeviceProvider`].
#[derive(Debug, Clone)]
pub struct PrintTransport<P> {
    provider: P,
    job_name: String,
}

impl<P: DeviceProvider> PrintTransport<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            job_name: DEFAULT_JOB_NAME.to_string(),
        }
    }

    /// Set the document name shown in the printer queue.
    pub fn with_job_name(mut self, job_name: impl Into<String>) -> Self {
        self.job_name = job_name.into();
        self
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    /// Print a rendered receipt.
    pub fn send(&self, device_name: &str, stream: &CommandStream) -> PrintJobResult {
        self.print_bytes(device_name, stream.as_bytes())
    }

    /// Print a raw byte buffer.
    #[instrument(skip(self, data), fields(device = device_name, data_len = data.len()))]
    pub fn print_bytes(&self, device_name: &str, data: &[u8]) -> PrintJobResult {
        match self.deliver(device_name, data) {
            Ok(()) => {
                info!("Print job sent successfully");
                PrintJobResult::printed(device_name)
            }
            Err(e) => {
                warn!(error = %e, "Print job failed");
                PrintJobResult::failed(device_name, &e)
            }
        }
    }

    /// Same as [`print_bytes`](Self::print_bytes), but returns the error.
    pub fn deliver(&self, device_name: &str, data: &[u8]) -> Result<(), PrintError> {
        if device_name.trim().is_empty() {
            return Err(PrintError::DeviceNotFound);
        }

        let mut device = self.provider.resolve(device_name)?;

        let status = device.query_status()?;
        debug!(%status, "Device status");
        status.check()?;

        let mut job = Job::open(&mut device, &self.job_name)?;
        job.write_all(data)?;
        job.close()
    }
}
