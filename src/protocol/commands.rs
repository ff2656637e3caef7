//! # ESC/POS Protocol Commands
//!
//! Basic printer control for ESC/POS thermal receipt printers: initialization,
//! paper feeding and cutting.
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`
//! - Two bytes: `ESC @`, `ESC i`
//! - Multi-byte with parameters: `ESC d n`, `GS v 0 m xL xH yL yH`
//!
//! Parameters are raw byte values, not ASCII digits: `ESC d 5` is
//! `1B 64 05`.
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
///
/// Most ESC/POS commands begin with ESC (0x1B).
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for graphics commands such as `GS v 0`.
/// - Hex: 0x1D, Decimal: 29
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
pub const LF: u8 = 0x0A;

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on default state. Every command stream
/// starts with it so a previous, possibly interrupted job cannot leak
/// alignment or emphasis into the next one.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## Example
///
/// ```
/// use kiosk_receipt::protocol::commands;
///
/// let init = commands::init();
/// assert_eq!(init, vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// CUTTER CONTROL COMMANDS
// ============================================================================

/// # Cut Paper (ESC i)
///
/// Cuts the paper at the current position. Printers without an autocutter
/// ignore it.
///
/// ## Protocol Details
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | ESC i   |
/// | Hex     | 1B 69   |
/// | Decimal | 27 105  |
///
/// The cutter sits a few lines above the print head, so a cut should always
/// follow a feed (see [`feed_lines`] and [`line_feeds`]).
#[inline]
pub fn cut() -> Vec<u8> {
    vec![ESC, b'i']
}

// ============================================================================
// PAPER FEED COMMANDS
// ============================================================================

/// # Print and Feed n Lines (ESC d n)
///
/// | Format  | Bytes      |
/// |---------|------------|
/// | ASCII   | ESC d n    |
/// | Hex     | 1B 64 n    |
/// | Decimal | 27 100 n   |
///
/// ## Example
///
/// ```
/// use kiosk_receipt::protocol::commands;
///
/// assert_eq!(commands::feed_lines(5), vec![0x1B, 0x64, 0x05]);
/// ```
#[inline]
pub fn feed_lines(n: u8) -> Vec<u8> {
    vec![ESC, b'd', n]
}

/// N bare line feeds.
///
/// The text and image renderers feed with bare `LF`s before [`cut`]; the
/// self-test receipt uses [`feed_lines`].
#[inline]
pub fn line_feeds(n: usize) -> Vec<u8> {
    vec![LF; n]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ## Example
///
/// ```
/// use kiosk_receipt::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(72), [0x48, 0x00]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert_eq!(init(), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_cut() {
        assert_eq!(cut(), vec![0x1B, 0x69]);
    }

    #[test]
    fn test_feed_lines() {
        assert_eq!(feed_lines(0), vec![0x1B, 0x64, 0x00]);
        assert_eq!(feed_lines(5), vec![0x1B, 0x64, 0x05]);
        assert_eq!(feed_lines(255), vec![0x1B, 0x64, 0xFF]);
    }

    #[test]
    fn test_line_feeds() {
        assert_eq!(line_feeds(4), vec![b'\n'; 4]);
        assert!(line_feeds(0).is_empty());
    }

    #[test]
    fn test_u16_le() {
        assert_eq!(u16_le(0x0000), [0x00, 0x00]);
        assert_eq!(u16_le(0x00FF), [0xFF, 0x00]);
        assert_eq!(u16_le(0xFF00), [0x00, 0xFF]);
        assert_eq!(u16_le(576), [0x40, 0x02]);
    }
}
