//! PDF writer for paginated documents.
//!
//! Each page becomes one PDF page holding a single image XObject drawn at
//! the page's placement. Page images are flattened onto white and
//! deflated, in parallel across pages unless sequential encoding is
//! requested.

mod encode;

pub use encode::{encode_image, flatten_rgb, EncodedImage};

use crate::error::{Error, Result};
use crate::model::{Document, Page, PageGeometry};
use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, Stream};
use rayon::prelude::*;
use std::fs;
use std::path::Path;

/// PDF version written to the header.
pub const PDF_VERSION: &str = "1.5";

/// Options for writing PDF output.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Document title stored in the Info dictionary
    pub title: Option<String>,

    /// Creator application stored in the Info dictionary
    pub creator: String,

    /// Encode page images in parallel
    pub parallel: bool,

    /// zlib compression level (0-9)
    pub compression_level: u32,

    /// Fixed creation date (current time when unset)
    pub creation_date: Option<DateTime<Utc>>,
}

impl WriteOptions {
    /// Create new write options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the creator application.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = creator.into();
        self
    }

    /// Encode pages one after another.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the zlib compression level.
    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = level.min(9);
        self
    }

    /// Pin the creation date.
    pub fn with_creation_date(mut self, date: DateTime<Utc>) -> Self {
        self.creation_date = Some(date);
        self
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            title: None,
            creator: format!("tripdoc {}", env!("CARGO_PKG_VERSION")),
            parallel: true,
            compression_level: 6,
            creation_date: None,
        }
    }
}

fn to_points(geometry: &PageGeometry, units: f64) -> f32 {
    geometry.units_to_points(units) as f32
}

/// Drawing operations placing image `name` on a page.
fn page_operations(page: &Page, geometry: &PageGeometry, name: &str) -> Vec<Operation> {
    let (_, page_height) = geometry.size_in_points();
    let p = page.placement;
    let width = to_points(geometry, p.width);
    let height = to_points(geometry, p.height);
    let x = to_points(geometry, p.x);
    // PDF origin is bottom-left; placement is measured from the top.
    let y = (page_height - geometry.units_to_points(p.y + p.height)) as f32;

    vec![
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![
                width.into(),
                0.into(),
                0.into(),
                height.into(),
                x.into(),
                y.into(),
            ],
        ),
        Operation::new("Do", vec![Object::Name(name.as_bytes().to_vec())]),
        Operation::new("Q", vec![]),
    ]
}

fn encode_pages(doc: &Document, options: &WriteOptions) -> Result<Vec<EncodedImage>> {
    let level = options.compression_level;
    if options.parallel {
        doc.pages
            .par_iter()
            .map(|page| encode_image(&page.image, level))
            .collect()
    } else {
        doc.pages
            .iter()
            .map(|page| encode_image(&page.image, level))
            .collect()
    }
}

/// Serialize a paginated document to PDF bytes.
pub fn write_pdf(doc: &Document, options: &WriteOptions) -> Result<Vec<u8>> {
    if doc.is_empty() {
        return Err(Error::InvalidInput("document has no pages".to_string()));
    }

    let geometry = &doc.geometry;
    let (page_width, page_height) = geometry.size_in_points();
    let encoded = encode_pages(doc, options)?;

    let mut pdf = lopdf::Document::with_version(PDF_VERSION);
    let pages_id = pdf.new_object_id();
    let mut kids: Vec<Object> = Vec::with_capacity(doc.pages.len());

    for (page, image) in doc.pages.iter().zip(encoded) {
        let image_id = pdf.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width as i64,
                "Height" => image.height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
            },
            image.data,
        ));

        let name = format!("Im{}", page.number);
        let content = Content {
            operations: page_operations(page, geometry, &name),
        };
        let content_id = pdf.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(page_width as f32),
                Object::Real(page_height as f32),
            ],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! {
                    name.as_str() => image_id,
                },
            },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    pdf.set_object(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        },
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);

    let created = options
        .creation_date
        .unwrap_or_else(Utc::now)
        .format("D:%Y%m%d%H%M%SZ")
        .to_string();
    let mut info = dictionary! {
        "Creator" => Object::string_literal(options.creator.as_str()),
        "Producer" => Object::string_literal(format!("tripdoc {}", env!("CARGO_PKG_VERSION"))),
        "CreationDate" => Object::string_literal(created),
    };
    if let Some(ref title) = options.title {
        info.set("Title", Object::string_literal(title.as_str()));
    }
    let info_id = pdf.add_object(info);
    pdf.trailer.set("Info", info_id);

    let mut buffer = Vec::new();
    pdf.save_to(&mut buffer)?;
    log::debug!(
        "wrote {} page PDF ({} bytes)",
        doc.page_count(),
        buffer.len()
    );
    Ok(buffer)
}

/// Write a paginated document to a PDF file.
pub fn save_pdf<P: AsRef<Path>>(doc: &Document, path: P, options: &WriteOptions) -> Result<()> {
    let bytes = write_pdf(doc, options)?;
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    log::info!("saved {} page PDF to {}", doc.page_count(), path.display());
    Ok(())
}
