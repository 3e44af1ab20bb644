//! Page planning: decides how source rows map onto physical pages
//! without touching pixel data.

use crate::error::{Error, Result};
use crate::model::{PageGeometry, PaginationPath, Placement};
use serde::Serialize;

/// One planned page: a contiguous band of source rows and where it lands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSlice {
    /// Page number (1-indexed)
    pub number: u32,

    /// First source row
    pub source_top: u32,

    /// Number of source rows
    pub rows: u32,

    /// Placement on the physical page
    pub placement: Placement,
}

/// Result of planning a source image against a page geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationPlan {
    /// Strategy chosen
    pub path: PaginationPath,

    /// Source width in pixels
    pub source_width: u32,

    /// Source height in pixels
    pub source_height: u32,

    /// Rows per page on the multi-page path
    pub slice_height_px: Option<u32>,

    /// Uniform scale ratio on the single-page path
    pub scale: Option<f64>,

    /// Planned pages in top-to-bottom order
    pub slices: Vec<PageSlice>,
}

impl PaginationPlan {
    /// Number of planned pages.
    pub fn page_count(&self) -> u32 {
        self.slices.len() as u32
    }

    /// Row count of every planned page.
    pub fn page_heights(&self) -> Vec<u32> {
        self.slices.iter().map(|s| s.rows).collect()
    }
}

/// Strategy decided for a source before any page is laid out.
enum Layout {
    SinglePage { ratio: f64 },
    MultiPage { slice_height: u32 },
}

fn layout(width: u32, height: u32, geometry: &PageGeometry) -> Result<Layout> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidInput(format!(
            "source image must have positive dimensions, got {}x{}",
            width, height
        )));
    }
    geometry.validate()?;

    let img_width = geometry.px_to_units(f64::from(width));
    let img_height = geometry.px_to_units(f64::from(height));

    if img_height <= geometry.height {
        let ratio = (geometry.width / img_width).min(geometry.height / img_height);
        return Ok(Layout::SinglePage { ratio });
    }

    let slice_height = geometry.slice_height_px();
    if slice_height <= 0 {
        return Err(Error::DegenerateGeometry(format!(
            "page height {}{} leaves no room for content after {}{} margins",
            geometry.height,
            geometry.unit.label(),
            geometry.top_margin,
            geometry.unit.label()
        )));
    }
    Ok(Layout::MultiPage {
        slice_height: u32::try_from(slice_height).unwrap_or(u32::MAX),
    })
}

/// Number of pages a `width` x `height` pixel source paginates into.
///
/// Same decision as [`plan`] without laying out any page.
pub fn page_count(width: u32, height: u32, geometry: &PageGeometry) -> Result<u32> {
    match layout(width, height, geometry)? {
        Layout::SinglePage { .. } => Ok(1),
        Layout::MultiPage { slice_height } => Ok(height.div_ceil(slice_height)),
    }
}

/// Plan pagination of a `width` x `height` pixel source.
///
/// A source whose physical height fits on one page is scaled uniformly and
/// centered horizontally. Anything taller is cut into bands of
/// [`PageGeometry::slice_height_px`] rows, each stretched to full page width.
pub fn plan(width: u32, height: u32, geometry: &PageGeometry) -> Result<PaginationPlan> {
    let slice_height = match layout(width, height, geometry)? {
        Layout::SinglePage { ratio } => {
            if ratio > 1.0 {
                log::warn!("single page source is upscaled by {:.3}", ratio);
            }
            let img_width = geometry.px_to_units(f64::from(width));
            let img_height = geometry.px_to_units(f64::from(height));
            let drawn_width = img_width * ratio;
            let placement = Placement {
                x: (geometry.width - drawn_width) / 2.0,
                y: geometry.top_margin,
                width: drawn_width,
                height: img_height * ratio,
            };
            log::debug!(
                "{}x{} px source fits on one page (scale {:.3})",
                width,
                height,
                ratio
            );
            return Ok(PaginationPlan {
                path: PaginationPath::SinglePage,
                source_width: width,
                source_height: height,
                slice_height_px: None,
                scale: Some(ratio),
                slices: vec![PageSlice {
                    number: 1,
                    source_top: 0,
                    rows: height,
                    placement,
                }],
            });
        }
        Layout::MultiPage { slice_height } => slice_height,
    };

    let total = u64::from(height);
    let mut slices = Vec::with_capacity(height.div_ceil(slice_height) as usize);
    let mut cursor: u64 = 0;
    while cursor < total {
        let rows = (total - cursor).min(u64::from(slice_height)) as u32;
        slices.push(PageSlice {
            number: slices.len() as u32 + 1,
            source_top: cursor as u32,
            rows,
            placement: Placement {
                x: 0.0,
                y: geometry.top_margin,
                width: geometry.width,
                height: geometry.px_to_units(f64::from(rows)),
            },
        });
        cursor += u64::from(slice_height);
    }

    log::debug!(
        "{}x{} px source split into {} pages of {} rows",
        width,
        height,
        slices.len(),
        slice_height
    );

    Ok(PaginationPlan {
        path: PaginationPath::MultiPage,
        source_width: width,
        source_height: height,
        slice_height_px: Some(slice_height),
        scale: None,
        slices,
    })
}
