//! Error types for tripdoc library.

use std::io;
use thiserror::Error;

/// Result type alias for tripdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while exporting an itinerary.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source image cannot be paginated (zero width or height).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The page geometry leaves no room for content.
    #[error("Degenerate page geometry: {0}")]
    DegenerateGeometry(String),

    /// The renderer failed to produce a source image.
    #[error("Rendering failed: {0}")]
    Render(String),

    /// Error decoding or encoding image data.
    #[error("Image error: {0}")]
    Image(String),

    /// Error assembling or serializing the PDF document.
    #[error("PDF write error: {0}")]
    PdfWrite(String),

    /// The itinerary could not be parsed or serialized.
    #[error("Itinerary error: {0}")]
    Itinerary(String),

    /// The print surface rejected the document.
    #[error("Print error: {0}")]
    Print(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::PdfWrite(err.to_string()),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Error::Io(e),
            _ => Error::Image(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Itinerary(err.to_string())
    }
}
