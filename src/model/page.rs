//! Page-level types.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Where a page image is drawn on its physical page, in geometry units
/// measured from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Horizontal offset from the left edge
    pub x: f64,

    /// Vertical offset from the top edge
    pub y: f64,

    /// Drawn width
    pub width: f64,

    /// Drawn height
    pub height: f64,
}

/// A single page of the paginated document.
#[derive(Debug, Clone)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// First source row covered by this page
    pub source_top: u32,

    /// Pixel band extracted from the source image
    pub image: RgbaImage,

    /// Placement of the band on the physical page
    pub placement: Placement,
}

impl Page {
    /// Create a new page.
    pub fn new(number: u32, source_top: u32, image: RgbaImage, placement: Placement) -> Self {
        Self {
            number,
            source_top,
            image,
            placement,
        }
    }

    /// Number of source rows on this page.
    pub fn extracted_height(&self) -> u32 {
        self.image.height()
    }

    /// Width of the page image in pixels.
    pub fn pixel_width(&self) -> u32 {
        self.image.width()
    }

    /// Source rows covered, as a half-open range.
    pub fn source_rows(&self) -> std::ops::Range<u32> {
        self.source_top..self.source_top + self.extracted_height()
    }
}
