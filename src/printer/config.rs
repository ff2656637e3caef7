//! # Printer Configuration
//!
//! Hardware characteristics of the kiosk's receipt printer.
//!
//! ## Supported Paper
//!
//! | Paper | Width (dots) | Resolution | Rule width |
//! |-------|--------------|------------|------------|
//! | 80mm  | 576          | 203 DPI    | 42 chars   |
//!
//! ## Usage
//!
//! ```
//! use kiosk_receipt::printer::PrinterConfig;
//!
//! let config = PrinterConfig::PAPER_80MM;
//! assert_eq!(config.width_dots, 576);
//! assert_eq!(config.rule('-'), "-".repeat(42));
//! ```

/// # Printer Configuration
///
/// - **width_dots**: Maximum printable width in dots (pixels); images wider
///   than this are downscaled
/// - **rule_width**: Characters in a divider rule (`=====`, `-----`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Maximum print width in dots (pixels)
    pub width_dots: u16,

    /// Characters per divider rule
    pub rule_width: usize,
}

impl PrinterConfig {
    /// # 80mm Thermal Receipt Printer
    ///
    /// ## Print Area
    ///
    /// ```text
    /// ├── 4mm ──┼────── 72mm printable ──────┼── 4mm ──┤
    /// │ margin  │   576 dots @ 203 DPI       │ margin  │
    /// ```
    pub const PAPER_80MM: Self = Self {
        width_dots: 576,
        rule_width: 42,
    };

    /// A divider rule of `ch` repeated `rule_width` times.
    pub fn rule(&self, ch: char) -> String {
        std::iter::repeat_n(ch, self.rule_width).collect()
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::PAPER_80MM
    }
}

// ============================================================================
// TESTS
// ============================================================================
