//! # Rendering Module
//!
//! Image content for thermal printers.
//!
//! ## Modules
//!
//! - [`raster`]: Grayscale threshold and `GS v 0` row encoding
//!
//! ## Usage Example
//!
//! ```
//! use image::{DynamicImage, GrayImage};
//! use kiosk_receipt::render::raster;
//!
//! // A 16×4 white image
//! let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(16, 4, image::Luma([255])));
//! let stream = raster::render_image(&img, raster::DEFAULT_MAX_WIDTH);
//!
//! // init + center, 4 rows of (8-byte header + 2 data bytes), 5 LF + cut
//! assert_eq!(stream.len(), 5 + 4 * 10 + 5 + 2);
//! ```

pub mod raster;

pub use raster::{RasterImage, render_image, render_image_bytes};
