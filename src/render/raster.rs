//! # Raster Image Rendering
//!
//! Converts a bitmap into `GS v 0` raster rows.
//!
//! ## Pipeline
//!
//! ```text
//! DynamicImage ──► luma8 ──► (Lanczos3 downscale if wider than max) ──►
//!   threshold (< 128 = ink) ──► MSB-first packing ──► one GS v 0 per row
//! ```
//!
//! The stream is `ESC @`, center alignment, the rows, 5 line feeds and a cut.
//! Decoding failures return [`RenderError::Decode`] before any byte is
//! produced.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage};
use tracing::debug;

use crate::error::RenderError;
use crate::printer::PrinterConfig;
use crate::protocol::graphics;
use crate::protocol::text::Alignment;
use crate::stream::{CommandStream, Feed, StreamBuilder};

/// Gray values strictly below this print as ink.
pub const DARKNESS_THRESHOLD: u8 = 128;

/// Default maximum width in dots (80mm paper at 203 DPI).
pub const DEFAULT_MAX_WIDTH: u32 = PrinterConfig::PAPER_80MM.width_dots as u32;

/// Line feeds before the cut on image receipts
pub const IMAGE_FEED_LINES: usize = 5;

/// Widest image a single `GS v 0` row can describe.
const MAX_RASTER_DOTS: u32 = u16::MAX as u32 * 8;

// ============================================================================
// RASTER IMAGE
// ============================================================================

/// A 1-bit image, row-major, MSB first, each row padded to whole bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterImage {
    /// Threshold a grayscale image at [`DARKNESS_THRESHOLD`].
    ///
    /// ```
    /// use image::{GrayImage, Luma};
    /// use kiosk_receipt::render::raster::RasterImage;
    ///
    /// let mut gray = GrayImage::new(8, 1);
    /// for x in 0..8 {
    ///     let v = if x % 2 == 0 { 0 } else { 255 };
    ///     gray.put_pixel(x, 0, Luma([v]));
    /// }
    /// let raster = RasterImage::from_gray(&gray);
    /// assert_eq!(raster.data(), &[0xAA]);
    /// ```
    pub fn from_gray(gray: &GrayImage) -> Self {
        let (width, height) = gray.dimensions();
        let width_bytes = width.div_ceil(8) as usize;
        let mut data = vec![0u8; width_bytes * height as usize];

        if width_bytes > 0 {
            for (y, row) in data.chunks_exact_mut(width_bytes).enumerate() {
                for x in 0..width {
                    let luma = gray.get_pixel(x, y as u32).0[0];
                    if luma < DARKNESS_THRESHOLD {
                        row[(x / 8) as usize] |= 0x80 >> (x % 8);
                    }
                }
            }
        }

        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per packed row: `ceil(width / 8)`.
    pub fn width_bytes(&self) -> usize {
        self.width.div_ceil(8) as usize
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Packed rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        let width_bytes = self.width_bytes().max(1);
        let rows = if self.width_bytes() == 0 { 0 } else { self.height as usize };
        self.data.chunks(width_bytes).take(rows)
    }
}

// ============================================================================
// SCALING
// ============================================================================

/// Height after scaling `width × height` down to `max_width`.
pub fn scaled_height(width: u32, height: u32, max_width: u32) -> u32 {
    let scaled = (height as f64 * max_width as f64 / width as f64).round();
    (scaled as u32).max(1)
}

/// Grayscale conversion, then a proportional Lanczos3 downscale when the
/// image is wider than `max_width`.
pub fn prepare_gray(image: &DynamicImage, max_width: u32) -> GrayImage {
    let max_width = max_width.clamp(1, MAX_RASTER_DOTS);
    let gray = image.to_luma8();
    let (width, height) = gray.dimensions();

    if width <= max_width {
        return gray;
    }

    let new_height = scaled_height(width, height, max_width);
    debug!(
        from_width = width,
        from_height = height,
        to_width = max_width,
        to_height = new_height,
        "downscaling image"
    );
    image::imageops::resize(&gray, max_width, new_height, FilterType::Lanczos3)
}

// ============================================================================
// RENDERING
// ============================================================================

/// Render a decoded image as a raster receipt.
pub fn render_image(image: &DynamicImage, max_width: u32) -> CommandStream {
    let gray = prepare_gray(image, max_width);
    let raster = RasterImage::from_gray(&gray);
    debug!(
        width = raster.width(),
        height = raster.height(),
        width_bytes = raster.width_bytes(),
        "rendering raster image"
    );
    render_raster(&raster)
}

/// Serialize an already thresholded image.
pub fn render_raster(raster: &RasterImage) -> CommandStream {
    let mut b = StreamBuilder::new();
    b.align(Alignment::Center);
    for row in raster.rows() {
        b.raw(&graphics::raster_row(row));
    }
    b.finish_receipt(Feed::LineFeeds(IMAGE_FEED_LINES))
}

/// Decode encoded image bytes (PNG, JPEG, GIF, BMP) and render them.
pub fn render_image_bytes(bytes: &[u8], max_width: u32) -> Result<CommandStream, RenderError> {
    let image = image::load_from_memory(bytes)?;
    Ok(render_image(&image, max_width))
}

/// Decode a base64 image payload, with or without a `data:...;base64,`
/// prefix.
pub fn decode_data_url(payload: &str) -> Result<Vec<u8>, RenderError> {
    let encoded = payload
        .split_once(',')
        .map_or(payload, |(_, data)| data)
        .trim();
    Ok(STANDARD.decode(encoded)?)
}
