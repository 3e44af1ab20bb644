//! Document-level types.

use super::{Page, PageGeometry};
use serde::{Deserialize, Serialize};

/// Which pagination strategy produced a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationPath {
    /// The whole image fits on one page and is scaled uniformly.
    SinglePage,
    /// The image is sliced into page-height bands.
    MultiPage,
}

/// An ordered sequence of pages ready for a writer.
#[derive(Debug, Clone)]
pub struct Document {
    /// Geometry shared by every page
    pub geometry: PageGeometry,

    /// Strategy used to build the pages
    pub path: PaginationPath,

    /// Pages in top-to-bottom order
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new(geometry: PageGeometry, path: PaginationPath) -> Self {
        Self {
            geometry,
            path,
            pages: Vec::new(),
        }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Extracted height of every page, in order.
    pub fn page_heights(&self) -> Vec<u32> {
        self.pages.iter().map(Page::extracted_height).collect()
    }

    /// Total number of source rows covered by all pages.
    pub fn total_rows(&self) -> u64 {
        self.pages
            .iter()
            .map(|p| u64::from(p.extracted_height()))
            .sum()
    }
}
