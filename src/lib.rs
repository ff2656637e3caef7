//! # Kiosk Receipt - ESC/POS Receipt Rendering and Print Transport
//!
//! Turns kiosk print content into ESC/POS byte streams and delivers them to a
//! named printer as one raw job. It provides:
//!
//! - **Protocol implementation**: ESC/POS command fragments
//! - **Text receipts**: plain text, the self-test receipt, and receipts
//!   composed from HTML fragments
//! - **Markup extraction**: a forgiving tokenizer and line extractor for the
//!   HTML subset kiosk pages send
//! - **Raster images**: grayscale threshold to `GS v 0` rows
//! - **Transport**: status check, raw job delivery, structured results
//!
//! ## Quick Start
//!
//! ```
//! use kiosk_receipt::{MemoryProvider, PrintTransport, render_html};
//!
//! let stream = render_html("<div>Game Card</div><p><b>Balance: 120</b></p>");
//!
//! let mut provider = MemoryProvider::new();
//! let printer = provider.add("POS-80");
//! let transport = PrintTransport::new(provider);
//!
//! let result = transport.send("POS-80", &stream);
//! assert!(result.success);
//! assert_eq!(result.message, "Printed to POS-80");
//! assert_eq!(printer.jobs()[0].data, stream.as_bytes());
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/POS command builders |
//! | [`stream`] | Receipt lines and the command stream builder |
//! | [`receipt`] | Text, self-test and markup receipts |
//! | [`markup`] | HTML fragment to display lines |
//! | [`render`] | Raster image rendering |
//! | [`transport`] | Device seam and print delivery |
//! | [`printer`] | Paper configurations |
//! | [`error`] | Error types |
//!
//! ## Supported Printers
//!
//! 80mm ESC/POS receipt printers (576 dots at 203 DPI). Renderers never talk
//! to a device; any backend implementing
//! [`DeviceProvider`](transport::DeviceProvider) can carry the stream.

pub mod error;
pub mod markup;
pub mod printer;
pub mod protocol;
pub mod receipt;
pub mod render;
pub mod stream;
pub mod transport;

// Re-exports for convenience
pub use error::{KioskError, PrintError, RenderError};
pub use printer::PrinterConfig;
pub use receipt::{MarkupLayout, render_html, render_html_with, render_text};
pub use render::{render_image, render_image_bytes};
pub use stream::{CommandStream, ReceiptLine, StreamBuilder};
pub use transport::{
    DeviceProvider, DeviceStatus, FileProvider, MemoryProvider, PrintDevice, PrintJobResult,
    PrintTransport,
};
#[cfg(windows)]
pub use transport::SpoolerProvider;
