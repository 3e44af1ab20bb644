//! Export pipeline: itinerary -> surface -> source image -> pages -> PDF.
//!
//! # Example
//!
//! ```no_run
//! use tripdoc::export::{Exporter, ExportOptions};
//! use tripdoc::model::Itinerary;
//! use tripdoc::render::CaptureRenderer;
//!
//! fn main() -> tripdoc::Result<()> {
//!     let itinerary = Itinerary::from_path("trip.json")?;
//!     let exporter = Exporter::new(CaptureRenderer::from_path("capture.png"))
//!         .with_options(ExportOptions::default());
//!
//!     let path = exporter.export_to_dir(&itinerary, ".")?;
//!     println!("saved {}", path.display());
//!     Ok(())
//! }
//! ```

use crate::error::Result;
use crate::model::{Itinerary, PageGeometry};
use crate::paginate::{cut, plan, PaginationPlan};
use crate::render::{to_print_document, PrintSurface, Renderer, Surface, SurfaceOptions};
use crate::writer::{write_pdf, WriteOptions};
use std::fs;
use std::path::{Path, PathBuf};

/// Options for an export run.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Physical page layout
    pub geometry: PageGeometry,

    /// PDF writer options
    pub write: WriteOptions,

    /// Surface capture options
    pub surface: SurfaceOptions,
}

impl ExportOptions {
    /// Create new export options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set the writer options.
    pub fn with_write_options(mut self, write: WriteOptions) -> Self {
        self.write = write;
        self
    }

    /// Set the surface options.
    pub fn with_surface(mut self, surface: SurfaceOptions) -> Self {
        self.surface = surface;
        self
    }
}

/// Result of an export run.
#[derive(Debug, Clone)]
pub struct ExportResult {
    /// Serialized PDF
    pub pdf: Vec<u8>,

    /// File name derived from the itinerary title
    pub filename: String,

    /// How the source image was paginated
    pub plan: PaginationPlan,
}

impl ExportResult {
    /// Number of pages in the PDF.
    pub fn page_count(&self) -> u32 {
        self.plan.page_count()
    }

    /// Size of the PDF in bytes.
    pub fn len(&self) -> usize {
        self.pdf.len()
    }

    /// Check if the PDF is empty.
    pub fn is_empty(&self) -> bool {
        self.pdf.is_empty()
    }
}

/// Drives a renderer, the paginator and the PDF writer.
pub struct Exporter<R: Renderer> {
    renderer: R,
    options: ExportOptions,
}

impl<R: Renderer> Exporter<R> {
    /// Create an exporter around a renderer.
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            options: ExportOptions::default(),
        }
    }

    /// Set export options.
    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    /// Current export options.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Render, paginate and serialize an itinerary.
    ///
    /// Any failure aborts the export; no partial PDF is returned.
    pub fn export(&self, itinerary: &Itinerary) -> Result<ExportResult> {
        let surface = Surface::for_itinerary(itinerary, &self.options.surface);
        log::debug!("rendering surface with {}", self.renderer.name());
        let source = self.renderer.render(&surface)?;

        let geometry = &self.options.geometry;
        let plan = plan(source.width(), source.height(), geometry)?;
        let doc = cut(&source, geometry, &plan)?;
        drop(source);

        let mut write = self.options.write.clone();
        if write.title.is_none() && !itinerary.title.trim().is_empty() {
            write.title = Some(itinerary.title.clone());
        }
        let pdf = write_pdf(&doc, &write)?;

        Ok(ExportResult {
            pdf,
            filename: itinerary.suggested_filename("pdf"),
            plan,
        })
    }

    /// Export and save under the suggested file name inside `dir`.
    pub fn export_to_dir<P: AsRef<Path>>(&self, itinerary: &Itinerary, dir: P) -> Result<PathBuf> {
        let result = self.export(itinerary)?;
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(&result.filename);
        fs::write(&path, &result.pdf)?;
        log::info!(
            "saved {} page itinerary to {}",
            result.page_count(),
            path.display()
        );
        Ok(path)
    }
}

/// Send the itinerary's print document to a print surface.
///
/// This path is independent of rasterization and pagination.
pub fn print(itinerary: &Itinerary, printer: &dyn PrintSurface) -> Result<()> {
    printer.print_surface(&to_print_document(itinerary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_options_builder() {
        let options = ExportOptions::new()
            .with_geometry(PageGeometry::a4().with_top_margin(5.0))
            .with_surface(SurfaceOptions::new().with_width(640))
            .with_write_options(WriteOptions::new().sequential());
        assert_eq!(options.geometry.top_margin, 5.0);
        assert_eq!(options.surface.width_px, 640);
        assert!(!options.write.parallel);
    }
}
