//! # ESC/POS Raster Graphics
//!
//! Raster bit image command (`GS v 0`) used to print images.
//!
//! ## Bit Packing
//!
//! Graphics data is packed as bytes where each bit represents one dot:
//! - Bit 7 (MSB) = leftmost dot
//! - Bit 0 (LSB) = rightmost dot
//! - 1 = black (print), 0 = white (no print)
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0x0F = 00001111 = ░░░░████
//! Byte value 0xAA = 10101010 = █░█░█░█░
//! ```
//!
//! ## One Row per Command
//!
//! Images are sent one `GS v 0` command per dot row. Some firmware caps the
//! row count of a single raster command, and a single-row command is valid
//! everywhere; the cost is an 8-byte header per row.

use super::commands::{GS, u16_le};

/// Length of a raster row header in bytes.
pub const RASTER_HEADER_LEN: usize = 8;

/// # Raster Row Header (GS v 0 m xL xH yL yH)
///
/// Header for a single-row raster bit image in normal density.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS v 0 m xL xH yL yH |
/// | Hex     | 1D 76 30 00 xL xH 01 00 |
///
/// ## Parameters
///
/// - `m = 0`: normal density
/// - `xL, xH`: width in bytes, little-endian
/// - `yL, yH`: always `1, 0` (one row)
///
/// ## Example
///
/// ```
/// use kiosk_receipt::protocol::graphics;
///
/// let header = graphics::raster_row_header(72);
/// assert_eq!(header, [0x1D, 0x76, 0x30, 0x00, 72, 0, 1, 0]);
/// ```
pub fn raster_row_header(width_bytes: u16) -> [u8; RASTER_HEADER_LEN] {
    let [xl, xh] = u16_le(width_bytes);
    [GS, b'v', b'0', 0x00, xl, xh, 1, 0]
}

/// Header plus one row of packed pixel data.
pub fn raster_row(row: &[u8]) -> Vec<u8> {
    debug_assert!(
        row.len() <= u16::MAX as usize,
        "raster row of {} bytes exceeds u16 width",
        row.len()
    );

    let mut cmd = Vec::with_capacity(RASTER_HEADER_LEN + row.len());
    cmd.extend_from_slice(&raster_row_header(row.len() as u16));
    cmd.extend_from_slice(row);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_row_header() {
        assert_eq!(
            raster_row_header(1),
            [0x1D, 0x76, 0x30, 0x00, 0x01, 0x00, 0x01, 0x00]
        );
    }

    #[test]
    fn test_raster_row_header_wide() {
        // 300 = 0x012C
        assert_eq!(raster_row_header(300)[4..6], [0x2C, 0x01]);
    }

    #[test]
    fn test_raster_row() {
        let cmd = raster_row(&[0xAA, 0x0F]);
        assert_eq!(cmd.len(), RASTER_HEADER_LEN + 2);
        assert_eq!(&cmd[..8], &raster_row_header(2));
        assert_eq!(&cmd[8..], &[0xAA, 0x0F]);
    }
}
