//! Model types for itinerary export.
//!
//! The itinerary is what the user edits; the source image, geometry,
//! pages and document are what pagination consumes and produces.

mod document;
mod geometry;
mod itinerary;
mod page;
mod source;

pub use document::{Document, PaginationPath};
pub use geometry::{
    Orientation, PageGeometry, PaperSize, Unit, DEFAULT_TOP_MARGIN_MM, MM_PER_PX,
};
pub use itinerary::{Day, Hotel, Itinerary, Payment, Transport, TransportKind};
pub use page::{Page, Placement};
pub use source::SourceImage;
