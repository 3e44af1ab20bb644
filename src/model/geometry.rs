//! Physical page geometry and pixel/unit conversion.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Millimeters per CSS pixel at 96 DPI.
pub const MM_PER_PX: f64 = 0.264583;

/// Default top margin in millimeters.
pub const DEFAULT_TOP_MARGIN_MM: f64 = 10.0;

/// Physical unit used by a [`PageGeometry`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Millimeters
    #[default]
    Millimeter,
    /// PDF points (1/72 inch)
    Point,
    /// Inches
    Inch,
}

impl Unit {
    /// Number of PDF points in one unit.
    pub fn points_per_unit(self) -> f64 {
        match self {
            Unit::Millimeter => 72.0 / 25.4,
            Unit::Point => 1.0,
            Unit::Inch => 72.0,
        }
    }

    /// Short label for display.
    pub fn label(self) -> &'static str {
        match self {
            Unit::Millimeter => "mm",
            Unit::Point => "pt",
            Unit::Inch => "in",
        }
    }
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperSize {
    /// ISO A4 (210 x 297 mm)
    #[default]
    A4,
    /// ISO A5 (148 x 210 mm)
    A5,
    /// US Letter (8.5 x 11 in)
    Letter,
    /// US Legal (8.5 x 14 in)
    Legal,
}

impl PaperSize {
    /// Portrait dimensions in millimeters as (width, height).
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
        }
    }

    /// Parse a paper size name (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "a4" => Some(PaperSize::A4),
            "a5" => Some(PaperSize::A5),
            "letter" => Some(PaperSize::Letter),
            "legal" => Some(PaperSize::Legal),
            _ => None,
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Physical page size, top margin and the unit-per-pixel conversion
/// factor used to map the source bitmap onto pages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Page width in `unit`
    pub width: f64,

    /// Page height in `unit`
    pub height: f64,

    /// Top margin in `unit`; the same amount is reserved at the bottom
    /// when slicing across pages
    pub top_margin: f64,

    /// Size of one source pixel in `unit`
    pub unit_per_px: f64,

    /// Physical unit of the dimensions above
    pub unit: Unit,
}

impl PageGeometry {
    /// Create a geometry from explicit dimensions in millimeters.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            top_margin: DEFAULT_TOP_MARGIN_MM,
            unit_per_px: MM_PER_PX,
            unit: Unit::Millimeter,
        }
    }

    /// A4 portrait, 10 mm top margin, 96 DPI pixels.
    pub fn a4() -> Self {
        Self::paper(PaperSize::A4, Orientation::Portrait)
    }

    /// Geometry for a standard paper size.
    pub fn paper(size: PaperSize, orientation: Orientation) -> Self {
        let (w, h) = size.dimensions_mm();
        match orientation {
            Orientation::Portrait => Self::new(w, h),
            Orientation::Landscape => Self::new(h, w),
        }
    }

    /// Set the top margin.
    pub fn with_top_margin(mut self, margin: f64) -> Self {
        self.top_margin = margin;
        self
    }

    /// Set the unit-per-pixel conversion factor.
    pub fn with_unit_per_px(mut self, factor: f64) -> Self {
        self.unit_per_px = factor;
        self
    }

    /// Set the unit. Dimensions are not converted.
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    /// Convert a pixel length to physical units.
    pub fn px_to_units(&self, px: f64) -> f64 {
        px * self.unit_per_px
    }

    /// Convert a physical length to (fractional) pixels.
    pub fn units_to_px(&self, units: f64) -> f64 {
        units / self.unit_per_px
    }

    /// Convert a physical length to PDF points.
    pub fn units_to_points(&self, units: f64) -> f64 {
        units * self.unit.points_per_unit()
    }

    /// Page size in PDF points as (width, height).
    pub fn size_in_points(&self) -> (f64, f64) {
        (
            self.units_to_points(self.width),
            self.units_to_points(self.height),
        )
    }

    /// Number of source rows that fit on one page after reserving the top
    /// and bottom margins. May be zero or negative for degenerate input.
    pub fn slice_height_px(&self) -> i64 {
        self.units_to_px(self.height - 2.0 * self.top_margin).floor() as i64
    }

    /// Check that every dimension is finite and positive.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("width", self.width),
            ("height", self.height),
            ("unit-per-pixel factor", self.unit_per_px),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::DegenerateGeometry(format!(
                    "page {} must be positive, got {}",
                    name, value
                )));
            }
        }
        if !self.top_margin.is_finite() || self.top_margin < 0.0 {
            return Err(Error::DegenerateGeometry(format!(
                "top margin must be non-negative, got {}",
                self.top_margin
            )));
        }
        Ok(())
    }

    /// Check if the page is in landscape orientation.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}
