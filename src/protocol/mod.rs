//! # ESC/POS Protocol Implementation
//!
//! Low-level command builders for ESC/POS thermal receipt printers. Every
//! function is pure and returns a byte fragment.
//!
//! ## Module Structure
//!
//! - [`commands`]: Basic printer commands (init, cut, feed)
//! - [`text`]: Alignment and emphasis
//! - [`graphics`]: Raster bit image rows
//!
//! ## Usage Example
//!
//! ```
//! use kiosk_receipt::protocol::{commands, graphics, text};
//!
//! let mut data = Vec::new();
//!
//! data.extend(commands::init());
//!
//! data.extend(text::align_center());
//! data.extend(text::bold_on());
//! data.extend(b"RECEIPT\n");
//! data.extend(text::bold_off());
//! data.extend(text::align_left());
//!
//! // One 8-dot raster row of alternating dots
//! data.extend(graphics::raster_row(&[0xAA]));
//!
//! data.extend(commands::line_feeds(4));
//! data.extend(commands::cut());
//!
//! assert_eq!(&data[..2], &[0x1B, 0x40]);
//! assert_eq!(&data[data.len() - 2..], &[0x1B, 0x69]);
//! ```

pub mod commands;
pub mod graphics;
pub mod text;
