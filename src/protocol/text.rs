//! # ESC/POS Text Styling Commands
//!
//! Alignment and emphasis for receipt text.
//!
//! ## Paper Geometry
//!
//! | Paper | Font A columns | Rule width used by receipts |
//! |-------|----------------|-----------------------------|
//! | 80mm  | 48             | 42                          |
//!
//! Receipts draw their rules 42 characters wide so they stay clear of the
//! margins on printers that default to a narrower font.

use super::commands::ESC;

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

/// # Select Justification (ESC a n)
///
/// Sets the alignment for subsequent text lines.
///
/// ## Protocol Details
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC a n  |
/// | Hex     | 1B 61 n  |
/// | Decimal | 27 97 n  |
///
/// ## Parameters
///
/// - `n = 0`: Left alignment (default)
/// - `n = 1`: Center alignment
/// - `n = 2`: Right alignment
///
/// ## Behavior
///
/// - Affects all subsequent lines until changed
/// - Takes effect at start of next line
/// - Reset by ESC @ (initialize)
///
/// ## Example
///
/// ```
/// use kiosk_receipt::protocol::text::{align, Alignment};
///
/// let center = align(Alignment::Center);
/// assert_eq!(center, vec![0x1B, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

/// Convenience function for left alignment
#[inline]
pub fn align_left() -> Vec<u8> {
    align(Alignment::Left)
}

/// Convenience function for center alignment
#[inline]
pub fn align_center() -> Vec<u8> {
    align(Alignment::Center)
}

// ============================================================================
// EMPHASIS
// ============================================================================

/// Text emphasis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emphasis {
    #[default]
    Normal,
    Bold,
}

/// # Turn Emphasized Mode On (ESC E 1)
///
/// | Format  | Bytes     |
/// |---------|-----------|
/// | ASCII   | ESC E 1   |
/// | Hex     | 1B 45 01  |
/// | Decimal | 27 69 1   |
///
/// ## Example
///
/// ```
/// use kiosk_receipt::protocol::text::{bold_on, bold_off};
///
/// let mut data = Vec::new();
/// data.extend(bold_on());
/// data.extend(b"TOTAL");
/// data.extend(bold_off());
/// assert_eq!(&data[..3], &[0x1B, 0x45, 0x01]);
/// ```
#[inline]
pub fn bold_on() -> Vec<u8> {
    vec![ESC, b'E', 1]
}

/// # Turn Emphasized Mode Off (ESC E 0)
#[inline]
pub fn bold_off() -> Vec<u8> {
    vec![ESC, b'E', 0]
}

/// Wrap `text` in bold on/off when emphasis is requested.
pub fn emphasized(text: &str, emphasis: Emphasis) -> Vec<u8> {
    match emphasis {
        Emphasis::Normal => text.as_bytes().to_vec(),
        Emphasis::Bold => {
            let mut out = Vec::with_capacity(text.len() + 6);
            out.extend(bold_on());
            out.extend_from_slice(text.as_bytes());
            out.extend(bold_off());
            out
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
