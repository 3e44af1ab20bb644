//! C-ABI FFI bindings for cross-language integration.
//!
//! This module provides a C-compatible API for using tripdoc from other
//! languages such as C#, Python, and Node.js.

use std::ffi::{c_char, CStr, CString};
use std::path::Path;
use std::ptr;

use crate::export::Exporter;
use crate::model::{Itinerary, PageGeometry};
use crate::paginate::page_count;
use crate::render::{to_print_document, CaptureRenderer};

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct TripdocResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The result data (null if failed). Must be freed with `tripdoc_free_string`.
    pub data: *mut c_char,
    /// Error message (null if succeeded). Must be freed with `tripdoc_free_string`.
    pub error: *mut c_char,
}

impl TripdocResult {
    fn success(data: String) -> Self {
        Self {
            success: true,
            data: CString::new(data).unwrap_or_default().into_raw(),
            error: ptr::null_mut(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error: CString::new(message).unwrap_or_default().into_raw(),
        }
    }
}

unsafe fn read_str<'a>(value: *const c_char, what: &str) -> Result<&'a str, String> {
    if value.is_null() {
        return Err(format!("{} cannot be null", what));
    }
    CStr::from_ptr(value)
        .to_str()
        .map_err(|_| format!("Invalid UTF-8 {}", what))
}

/// Export an itinerary (JSON) to a PDF file using an existing capture image.
///
/// On success `data` holds the number of pages written.
///
/// # Safety
///
/// All arguments must be valid null-terminated UTF-8 strings.
/// The returned result must be freed with `tripdoc_free_result`.
#[no_mangle]
pub unsafe extern "C" fn tripdoc_export_pdf(
    itinerary_json: *const c_char,
    capture_path: *const c_char,
    output_path: *const c_char,
) -> TripdocResult {
    let json = match read_str(itinerary_json, "itinerary") {
        Ok(s) => s,
        Err(e) => return TripdocResult::error(e),
    };
    let capture = match read_str(capture_path, "capture path") {
        Ok(s) => s,
        Err(e) => return TripdocResult::error(e),
    };
    let output = match read_str(output_path, "output path") {
        Ok(s) => s,
        Err(e) => return TripdocResult::error(e),
    };

    match export_pdf_internal(json, Path::new(capture), Path::new(output)) {
        Ok(pages) => TripdocResult::success(pages.to_string()),
        Err(e) => TripdocResult::error(e.to_string()),
    }
}

fn export_pdf_internal(json: &str, capture: &Path, output: &Path) -> crate::Result<u32> {
    let itinerary = Itinerary::from_json(json)?;
    let result = Exporter::new(CaptureRenderer::from_path(capture)).export(&itinerary)?;
    std::fs::write(output, &result.pdf)?;
    Ok(result.page_count())
}

/// Build the printable HTML document for an itinerary (JSON).
///
/// # Safety
///
/// `itinerary_json` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `tripdoc_free_result`.
#[no_mangle]
pub unsafe extern "C" fn tripdoc_print_markup(itinerary_json: *const c_char) -> TripdocResult {
    let json = match read_str(itinerary_json, "itinerary") {
        Ok(s) => s,
        Err(e) => return TripdocResult::error(e),
    };

    match Itinerary::from_json(json) {
        Ok(itinerary) => TripdocResult::success(to_print_document(&itinerary)),
        Err(e) => TripdocResult::error(e.to_string()),
    }
}

/// Number of A4 pages a `width_px` x `height_px` capture paginates into.
///
/// Returns -1 for invalid dimensions.
#[no_mangle]
pub extern "C" fn tripdoc_page_count(width_px: u32, height_px: u32) -> i32 {
    match page_count(width_px, height_px, &PageGeometry::a4()) {
        Ok(count) => i32::try_from(count).unwrap_or(-1),
        Err(_) => -1,
    }
}

/// Free a result returned by tripdoc functions.
///
/// # Safety
///
/// The result must have been returned by a tripdoc function and not freed before.
#[no_mangle]
pub unsafe extern "C" fn tripdoc_free_result(result: TripdocResult) {
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

/// Free a string returned by tripdoc functions.
///
/// # Safety
///
/// The pointer must have been returned by a tripdoc function and not freed before.
#[no_mangle]
pub unsafe extern "C" fn tripdoc_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Get the library version.
///
/// The returned string is static and must not be freed.
#[no_mangle]
pub extern "C" fn tripdoc_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
