//! Page image encoding for embedding as PDF image XObjects.

use crate::error::Result;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::RgbaImage;
use std::io::Write;

/// A page image ready to be embedded: zlib-compressed 8-bit RGB rows.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Composite RGBA pixels over white and drop the alpha channel.
pub fn flatten_rgb(image: &RgbaImage) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(image.width() as usize * image.height() as usize * 3);
    for px in image.pixels() {
        let [r, g, b, a] = px.0;
        let alpha = u32::from(a);
        for channel in [r, g, b] {
            let blended = (u32::from(channel) * alpha + 255 * (255 - alpha) + 127) / 255;
            rgb.push(blended as u8);
        }
    }
    rgb
}

/// Flatten and deflate a page image.
pub fn encode_image(image: &RgbaImage, level: u32) -> Result<EncodedImage> {
    let rgb = flatten_rgb(image);
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(rgb.len() / 4), Compression::new(level));
    encoder.write_all(&rgb)?;
    let data = encoder.finish()?;
    Ok(EncodedImage {
        width: image.width(),
        height: image.height(),
        data,
    })
}
