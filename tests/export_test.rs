//! Integration tests for the export pipeline.

use std::sync::atomic::{AtomicUsize, Ordering};
use tripdoc::error::{Error, Result};
use tripdoc::export::{print, ExportOptions, Exporter};
use tripdoc::model::{Itinerary, PageGeometry, SourceImage};
use tripdoc::render::{HtmlFilePrinter, PrintSurface, Renderer, Surface};
use tripdoc::writer::WriteOptions;

/// Mock renderer producing a blank image of a fixed size.
struct FixedRenderer {
    width: u32,
    height: u32,
    calls: AtomicUsize,
}

impl FixedRenderer {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Renderer for FixedRenderer {
    fn name(&self) -> &str {
        "fixed"
    }

    fn render(&self, surface: &Surface) -> Result<SourceImage> {
        assert!(surface.markup.contains("<h1>"));
        self.calls.fetch_add(1, Ordering::SeqCst);
        SourceImage::filled(self.width, self.height, [255, 255, 255, 255])
    }
}

/// Mock renderer that always fails.
struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn name(&self) -> &str {
        "failing"
    }

    fn render(&self, _surface: &Surface) -> Result<SourceImage> {
        Err(Error::Render("rasterizer crashed".to_string()))
    }
}

/// Print surface that records what it was given.
struct RecordingPrinter {
    printed: std::cell::RefCell<Vec<String>>,
}

impl PrintSurface for RecordingPrinter {
    fn print_surface(&self, markup: &str) -> Result<()> {
        self.printed.borrow_mut().push(markup.to_string());
        Ok(())
    }
}

fn small_pages() -> ExportOptions {
    ExportOptions::new()
        .with_geometry(
            PageGeometry::new(200.0, 270.0)
                .with_top_margin(10.0)
                .with_unit_per_px(0.25),
        )
        .with_write_options(WriteOptions::new().sequential())
}

#[test]
fn test_export_multi_page_pdf() {
    let renderer = FixedRenderer::new(64, 2500);
    let exporter = Exporter::new(renderer).with_options(small_pages());
    let result = exporter.export(&Itinerary::default()).unwrap();

    assert_eq!(result.page_count(), 3);
    assert_eq!(result.plan.page_heights(), vec![1000, 1000, 500]);
    assert_eq!(result.filename, "vigovia_sample_trip.pdf");

    let pdf = lopdf::Document::load_mem(&result.pdf).unwrap();
    assert_eq!(pdf.get_pages().len(), 3);
}

#[test]
fn test_export_single_page_pdf() {
    let exporter = Exporter::new(FixedRenderer::new(64, 100)).with_options(small_pages());
    let result = exporter.export(&Itinerary::default()).unwrap();

    assert_eq!(result.page_count(), 1);
    let pdf = lopdf::Document::load_mem(&result.pdf).unwrap();
    assert_eq!(pdf.get_pages().len(), 1);
}

#[test]
fn test_page_media_box_matches_geometry() {
    let exporter = Exporter::new(FixedRenderer::new(32, 2000));
    let result = exporter.export(&Itinerary::default()).unwrap();
    let pdf = lopdf::Document::load_mem(&result.pdf).unwrap();

    let (_, page_id) = pdf.get_pages().into_iter().next().unwrap();
    let page = pdf.get_dictionary(page_id).unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
    let height = media_box[3].as_float().unwrap();
    // A4 height: 297 mm = 841.89 pt
    assert!((height - 841.89).abs() < 0.01);
}

#[test]
fn test_parallel_and_sequential_agree() {
    let fixed_date = chrono::DateTime::parse_from_rfc3339("2024-05-01T00:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);

    let export_with = |write: WriteOptions| {
        Exporter::new(FixedRenderer::new(48, 2500))
            .with_options(small_pages().with_write_options(write.with_creation_date(fixed_date)))
            .export(&Itinerary::default())
            .unwrap()
            .pdf
    };

    let parallel = export_with(WriteOptions::new());
    let sequential = export_with(WriteOptions::new().sequential());
    assert_eq!(parallel, sequential);
}

#[test]
fn test_renderer_failure_aborts_export() {
    let exporter = Exporter::new(FailingRenderer);
    let err = exporter.export(&Itinerary::default()).unwrap_err();
    assert!(matches!(err, Error::Render(_)));
}

#[test]
fn test_degenerate_geometry_aborts_export() {
    let options = ExportOptions::new().with_geometry(
        PageGeometry::new(200.0, 20.0)
            .with_top_margin(10.0)
            .with_unit_per_px(0.25),
    );
    let exporter = Exporter::new(FixedRenderer::new(10, 1000)).with_options(options);
    let err = exporter.export(&Itinerary::default()).unwrap_err();
    assert!(matches!(err, Error::DegenerateGeometry(_)));
}

#[test]
fn test_export_to_dir_uses_title() {
    let dir = tempfile::tempdir().unwrap();
    let mut itinerary = Itinerary::default();
    itinerary.title = "Kerala Backwaters Escape".to_string();

    let exporter = Exporter::new(FixedRenderer::new(16, 400));
    let path = exporter.export_to_dir(&itinerary, dir.path()).unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "kerala_backwaters_escape.pdf"
    );
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn test_print_bypasses_renderer() {
    let printer = RecordingPrinter {
        printed: Default::default(),
    };
    print(&Itinerary::default(), &printer).unwrap();

    let printed = printer.printed.borrow();
    assert_eq!(printed.len(), 1);
    assert!(printed[0].starts_with("<html><head><title>Itinerary</title>"));
    assert!(printed[0].contains("Vigovia Sample Trip"));
}

#[test]
fn test_print_to_html_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ticket.html");
    print(&Itinerary::default(), &HtmlFilePrinter::new(&path)).unwrap();
    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("Day 1 - Arrival"));
}

fn text(object: &lopdf::Object) -> String {
    match object {
        lopdf::Object::String(bytes, _) => String::from_utf8_lossy(bytes).into_owned(),
        other => panic!("expected a string, got {:?}", other),
    }
}

#[test]
fn test_written_pages_read_back() {
    let exporter = Exporter::new(FixedRenderer::new(64, 2500)).with_options(small_pages());
    let result = exporter.export(&Itinerary::default()).unwrap();
    let pdf = lopdf::Document::load_mem(&result.pdf).unwrap();

    let (page_width, page_height) = small_pages().geometry.size_in_points();
    let mut image_heights = Vec::new();

    for (_, page_id) in pdf.get_pages() {
        let page = pdf.get_dictionary(page_id).unwrap();
        let xobjects = page
            .get(b"Resources")
            .and_then(|r| r.as_dict())
            .and_then(|r| r.get(b"XObject"))
            .and_then(|x| x.as_dict())
            .unwrap();
        let (_, image_ref) = xobjects.iter().next().unwrap();
        let image = pdf
            .get_object(image_ref.as_reference().unwrap())
            .and_then(|o| o.as_stream())
            .unwrap();
        assert_eq!(image.dict.get(b"Width").unwrap().as_i64().unwrap(), 64);
        image_heights.push(image.dict.get(b"Height").unwrap().as_i64().unwrap());

        let content = lopdf::content::Content::decode(&pdf.get_page_content(page_id).unwrap())
            .unwrap();
        let cm = content
            .operations
            .iter()
            .find(|op| op.operator == "cm")
            .unwrap();
        let matrix: Vec<f32> = cm.operands.iter().map(|o| o.as_float().unwrap()).collect();
        // stretched to full width at the left edge
        assert!((f64::from(matrix[0]) - page_width).abs() < 0.01);
        assert_eq!(matrix[4], 0.0);
        // top edge sits at the 10 mm margin below the top of the page
        let top = f64::from(matrix[5] + matrix[3]);
        assert!((page_height - top - 10.0 * 72.0 / 25.4).abs() < 0.01);
    }
    assert_eq!(image_heights, vec![1000, 1000, 500]);

    let info_id = pdf.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let info = pdf.get_dictionary(info_id).unwrap();
    assert_eq!(text(info.get(b"Title").unwrap()), "Vigovia Sample Trip");
    assert!(text(info.get(b"Creator").unwrap()).starts_with("tripdoc"));
    assert!(text(info.get(b"Producer").unwrap()).starts_with("tripdoc"));
    assert!(text(info.get(b"CreationDate").unwrap()).starts_with("D:"));
}
