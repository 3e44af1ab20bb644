//! Renderer backed by an already-rasterized capture.

use super::{Renderer, Surface};
use crate::error::{Error, Result};
use crate::model::SourceImage;
use std::path::{Path, PathBuf};

enum CaptureSource {
    Bytes(Vec<u8>),
    File(PathBuf),
    Image(SourceImage),
}

/// Serves a capture produced elsewhere (a browser screenshot, an earlier
/// rasterizer run). The surface markup is ignored.
pub struct CaptureRenderer {
    source: CaptureSource,
}

impl CaptureRenderer {
    /// Serve encoded PNG or JPEG bytes.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self {
            source: CaptureSource::Bytes(data),
        }
    }

    /// Serve an image file, decoded on each render.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: CaptureSource::File(path.into()),
        }
    }

    /// Serve a decoded image.
    pub fn from_image(image: SourceImage) -> Self {
        Self {
            source: CaptureSource::Image(image),
        }
    }

    fn decode_file(path: &Path) -> Result<SourceImage> {
        if !path.exists() {
            return Err(Error::Render(format!(
                "capture not found: {}",
                path.display()
            )));
        }
        SourceImage::open(path)
    }
}

impl Renderer for CaptureRenderer {
    fn name(&self) -> &str {
        "capture"
    }

    fn render(&self, surface: &Surface) -> Result<SourceImage> {
        let image = match &self.source {
            CaptureSource::Bytes(data) => SourceImage::from_bytes(data)?,
            CaptureSource::File(path) => Self::decode_file(path)?,
            CaptureSource::Image(image) => image.clone(),
        };
        if image.width() != surface.output_width() {
            log::debug!(
                "capture width {} px differs from surface width {} px",
                image.width(),
                surface.output_width()
            );
        }
        Ok(image)
    }
}
