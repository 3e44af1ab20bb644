//! # tripdoc
//!
//! Printable export for multi-day travel itineraries.
//!
//! An itinerary is rendered to HTML, rasterized into one tall bitmap by an
//! injected [`render::Renderer`], sliced into page-sized bands and written
//! as an image-per-page PDF. A separate print path hands the HTML to a
//! [`render::PrintSurface`] without any pagination.
//!
//! ## Quick Start
//!
//! ```no_run
//! use tripdoc::{export_pdf, Itinerary};
//!
//! fn main() -> tripdoc::Result<()> {
//!     let itinerary = Itinerary::from_path("trip.json")?;
//!     let pdf = export_pdf(&itinerary, "capture.png")?;
//!     std::fs::write(itinerary.suggested_filename("pdf"), pdf)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Pagination
//!
//! ```
//! use tripdoc::{paginate, PageGeometry, SourceImage};
//!
//! let source = SourceImage::filled(800, 800, [255, 255, 255, 255]).unwrap();
//! let doc = paginate(&source, &PageGeometry::a4()).unwrap();
//! assert_eq!(doc.page_count(), 1);
//! ```

pub mod error;
pub mod export;
pub mod model;
pub mod paginate;
pub mod render;
pub mod writer;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types
pub use error::{Error, Result};
pub use export::{print, ExportOptions, ExportResult, Exporter};
pub use model::{
    Day, Document, Hotel, Itinerary, Orientation, Page, PageGeometry, PaginationPath, PaperSize,
    Payment, Placement, SourceImage, Transport, TransportKind, Unit,
};
pub use paginate::{page_count, paginate, plan, PageSlice, PaginationPlan, Paginator};
pub use render::{
    CaptureRenderer, CommandRenderer, HtmlFilePrinter, PrintSurface, Renderer, Surface,
    SurfaceOptions,
};
pub use writer::{save_pdf, write_pdf, WriteOptions};

use std::path::Path;

/// Export an itinerary to PDF bytes from an existing capture image,
/// on A4 portrait pages.
///
/// # Arguments
///
/// * `itinerary` - The itinerary to export
/// * `capture` - Path to a PNG or JPEG capture of the rendered itinerary
pub fn export_pdf<P: AsRef<Path>>(itinerary: &Itinerary, capture: P) -> Result<Vec<u8>> {
    let exporter = Exporter::new(CaptureRenderer::from_path(capture.as_ref()));
    Ok(exporter.export(itinerary)?.pdf)
}

/// Paginate an image file and write it as a PDF.
///
/// # Example
///
/// ```no_run
/// use tripdoc::{image_to_pdf, PageGeometry};
///
/// let pages = image_to_pdf("capture.png", "capture.pdf", &PageGeometry::a4()).unwrap();
/// println!("{} pages", pages);
/// ```
pub fn image_to_pdf<P: AsRef<Path>, Q: AsRef<Path>>(
    image: P,
    output: Q,
    geometry: &PageGeometry,
) -> Result<u32> {
    let source = SourceImage::open(image)?;
    let doc = paginate(&source, geometry)?;
    save_pdf(&doc, output, &WriteOptions::default())?;
    Ok(doc.page_count())
}
