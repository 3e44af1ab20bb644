//! Pagination of a tall source bitmap into page-sized bands.
//!
//! Pagination is pure: it borrows the source image, copies each planned
//! band into its own buffer and hands the pages to a [`Document`]. Writing
//! the document anywhere is left to [`crate::writer`].
//!
//! # Example
//!
//! ```
//! use tripdoc::model::{PageGeometry, SourceImage};
//! use tripdoc::paginate::paginate;
//!
//! let source = SourceImage::filled(794, 2500, [255, 255, 255, 255]).unwrap();
//! let doc = paginate(&source, &PageGeometry::a4()).unwrap();
//! assert_eq!(doc.page_count(), 3);
//! assert_eq!(doc.total_rows(), 2500);
//! ```

mod plan;

pub use plan::{page_count, plan, PageSlice, PaginationPlan};

use crate::error::{Error, Result};
use crate::model::{Document, Page, PageGeometry, SourceImage};

/// Paginate `source` against `geometry`.
///
/// Returns one page when the source fits on a single page, otherwise
/// `ceil(height / slice_height_px)` pages that cover every source row
/// exactly once, in order.
pub fn paginate(source: &SourceImage, geometry: &PageGeometry) -> Result<Document> {
    let plan = plan(source.width(), source.height(), geometry)?;
    cut(source, geometry, &plan)
}

/// Cut the bands of a previously computed plan out of `source`.
///
/// The plan must have been made for this source's dimensions.
pub fn cut(source: &SourceImage, geometry: &PageGeometry, plan: &PaginationPlan) -> Result<Document> {
    if (plan.source_width, plan.source_height) != source.dimensions() {
        return Err(Error::InvalidInput(format!(
            "plan was made for a {}x{} source, got {}x{}",
            plan.source_width,
            plan.source_height,
            source.width(),
            source.height()
        )));
    }
    let mut doc = Document::new(*geometry, plan.path);
    for slice in &plan.slices {
        let band = source.extract_band(slice.source_top, slice.rows);
        doc.add_page(Page::new(
            slice.number,
            slice.source_top,
            band,
            slice.placement,
        ));
    }
    Ok(doc)
}

/// Reusable paginator bound to one page geometry.
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    geometry: PageGeometry,
}

impl Paginator {
    /// Create a paginator for the given geometry.
    pub fn new(geometry: PageGeometry) -> Self {
        Self { geometry }
    }

    /// Geometry used by this paginator.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Plan without copying pixels.
    pub fn plan(&self, width: u32, height: u32) -> Result<PaginationPlan> {
        plan(width, height, &self.geometry)
    }

    /// Paginate a source image.
    pub fn paginate(&self, source: &SourceImage) -> Result<Document> {
        paginate(source, &self.geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PaginationPath;
    use image::{Rgba, RgbaImage};

    fn striped(width: u32, height: u32) -> SourceImage {
        let mut pixels = RgbaImage::new(width, height);
        for (_, y, px) in pixels.enumerate_pixels_mut() {
            *px = Rgba([(y % 251) as u8, (y / 251) as u8, 0, 255]);
        }
        SourceImage::new(pixels).unwrap()
    }

    #[test]
    fn test_bands_follow_source_rows() {
        let geometry = PageGeometry::new(200.0, 270.0)
            .with_top_margin(10.0)
            .with_unit_per_px(0.25);
        let source = striped(4, 2500);
        let doc = paginate(&source, &geometry).unwrap();

        assert_eq!(doc.path, PaginationPath::MultiPage);
        assert_eq!(doc.page_heights(), vec![1000, 1000, 500]);
        for page in &doc.pages {
            let first = page.image.get_pixel(0, 0);
            assert_eq!(first, source.pixels().get_pixel(0, page.source_top));
            let last_row = page.extracted_height() - 1;
            assert_eq!(
                page.image.get_pixel(3, last_row),
                source.pixels().get_pixel(3, page.source_top + last_row)
            );
        }
    }

    #[test]
    fn test_cut_rejects_foreign_plan() {
        let geometry = PageGeometry::a4();
        let plan = plan(10, 20, &geometry).unwrap();
        let source = striped(10, 21);
        assert!(matches!(
            cut(&source, &geometry, &plan),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_single_page_keeps_whole_image() {
        let source = striped(10, 20);
        let doc = Paginator::default().paginate(&source).unwrap();
        assert_eq!(doc.path, PaginationPath::SinglePage);
        assert_eq!(doc.page_count(), 1);
        assert_eq!(&doc.pages[0].image, source.pixels());
    }
}
