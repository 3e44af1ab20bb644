//! Rasterized source bitmap produced by a renderer.

use crate::error::{Error, Result};
use image::{imageops, RgbaImage};
use std::path::Path;

/// The single rasterized bitmap of a fully rendered itinerary.
///
/// Immutable once built; pagination only borrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pixels: RgbaImage,
}

impl SourceImage {
    /// Wrap an RGBA buffer. Fails if either dimension is zero.
    pub fn new(pixels: RgbaImage) -> Result<Self> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::InvalidInput(format!(
                "source image must have positive dimensions, got {}x{}",
                width, height
            )));
        }
        Ok(Self { pixels })
    }

    /// Create a uniformly filled image.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        Self::new(RgbaImage::from_pixel(width, height, image::Rgba(rgba)))
    }

    /// Decode an encoded image (PNG or JPEG).
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(data)?;
        Self::new(decoded.to_rgba8())
    }

    /// Decode an image file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let decoded = image::open(path)?;
        Self::new(decoded.to_rgba8())
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Dimensions as (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Borrow the underlying pixel buffer.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Copy rows `[top, top + rows)` into a new full-width buffer.
    ///
    /// The band is clamped to the image height.
    pub fn extract_band(&self, top: u32, rows: u32) -> RgbaImage {
        let top = top.min(self.height());
        let rows = rows.min(self.height() - top);
        imageops::crop_imm(&self.pixels, 0, top, self.width(), rows).to_image()
    }

    /// Consume the source and return its pixel buffer.
    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }
}
