//! Rendering collaborators.
//!
//! The itinerary is turned into HTML markup (a [`Surface`]); a [`Renderer`]
//! rasterizes that surface into a [`SourceImage`] and a [`PrintSurface`]
//! hands the print document to whatever prints it. Both are injected so
//! pagination stays independent of how rasterization happens.

mod capture;
mod command;
mod markup;
mod print;

pub use capture::CaptureRenderer;
pub use command::CommandRenderer;
pub use markup::{escape_html, to_preview_markup, to_print_document, PRINT_STYLESHEET};
pub use print::HtmlFilePrinter;

use crate::error::Result;
use crate::model::{Itinerary, SourceImage};

/// Default capture width in CSS pixels.
pub const DEFAULT_SURFACE_WIDTH: u32 = 800;

/// Default device-pixel scale used when capturing.
pub const DEFAULT_SURFACE_SCALE: f32 = 2.0;

/// Options describing how the surface is captured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceOptions {
    /// Layout width in CSS pixels
    pub width_px: u32,

    /// Device-pixel scale applied by the rasterizer
    pub scale: f32,
}

impl SurfaceOptions {
    /// Create surface options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout width.
    pub fn with_width(mut self, width_px: u32) -> Self {
        self.width_px = width_px;
        self
    }

    /// Set the capture scale.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            width_px: DEFAULT_SURFACE_WIDTH,
            scale: DEFAULT_SURFACE_SCALE,
        }
    }
}

/// A visual surface to rasterize: a standalone HTML document plus the
/// capture parameters.
#[derive(Debug, Clone)]
pub struct Surface {
    /// Standalone HTML document
    pub markup: String,

    /// Layout width in CSS pixels
    pub width_px: u32,

    /// Device-pixel scale
    pub scale: f32,
}

impl Surface {
    /// Build the export surface for an itinerary.
    pub fn for_itinerary(itinerary: &Itinerary, options: &SurfaceOptions) -> Self {
        Self {
            markup: to_print_document(itinerary),
            width_px: options.width_px,
            scale: options.scale,
        }
    }

    /// Expected pixel width of the rasterized output.
    pub fn output_width(&self) -> u32 {
        (self.width_px as f32 * self.scale).round() as u32
    }
}

/// Rasterizes a surface into a single bitmap.
pub trait Renderer: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Produce the full-height bitmap of `surface`.
    fn render(&self, surface: &Surface) -> Result<SourceImage>;
}

/// Opens a print surface for markup. Printing bypasses pagination.
pub trait PrintSurface {
    /// Hand the print document to the printer.
    fn print_surface(&self, markup: &str) -> Result<()>;
}
