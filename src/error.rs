//! # Error Types
//!
//! Error types used throughout the kiosk-receipt library.
//!
//! Renderers fail with [`RenderError`]; the transport maps every failure to
//! a [`PrintError`] and then into a [`PrintJobResult`](crate::PrintJobResult),
//! so the `Display` text of a `PrintError` is what the kiosk user reads.

use thiserror::Error;

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    /// Image bytes could not be decoded
    #[error("Image decode error: {0}")]
    Decode(String),
}

impl From<image::ImageError> for RenderError {
    fn from(e: image::ImageError) -> Self {
        RenderError::Decode(e.to_string())
    }
}

impl From<base64::DecodeError> for RenderError {
    fn from(e: base64::DecodeError) -> Self {
        RenderError::Decode(format!("invalid base64 payload: {}", e))
    }
}

/// Print transport errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrintError {
    /// No device name given, or the name does not resolve
    #[error("No printer selected! Please restart and select a printer.")]
    DeviceNotFound,

    /// Device reports offline
    #[error("Printer is OFFLINE. Please turn on the printer.")]
    Offline,

    /// Device reports paper out
    #[error("Printer is OUT OF PAPER")]
    OutOfPaper,

    /// Device reports a paper jam
    #[error("PAPER JAM detected")]
    PaperJam,

    /// Device is not ready for another reason; carries the raw status bits
    #[error("Printer error (status: {0})")]
    DeviceError(u32),

    /// Opening, writing or closing the job failed
    #[error("Print failed: {0}")]
    PrintFailure(String),
}

impl From<std::io::Error> for PrintError {
    fn from(e: std::io::Error) -> Self {
        PrintError::PrintFailure(e.to_string())
    }
}

/// Top-level error for the command-line front end
#[derive(Debug, Error)]
pub enum KioskError {
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Printing failed; carries the user-facing message
    #[error("{0}")]
    Print(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
