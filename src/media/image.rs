// SPDX-License-Identifier: MPL-2.0
//! Image decoding from raster formats (PNG, JPEG, GIF, WebP, ...) and SVG.

use crate::domain::image::RawImage;
use crate::error::{Error, Result};
use iced::widget::image;
use resvg::usvg;

/// A decoded image ready to be drawn.
///
/// Cloning is cheap: the renderer handle is reference-counted.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// Creates a new `ImageData` from RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            handle: image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }

    /// Wraps pixels decoded on a background thread.
    #[must_use]
    pub fn from_raw(raw: RawImage) -> Self {
        let (width, height) = (raw.width(), raw.height());
        Self::from_rgba(width, height, raw.into_rgba())
    }

    /// Memory footprint once uploaded (4 bytes per pixel).
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// Whether `name` or the leading bytes identify an SVG document.
fn looks_like_svg(name: &str, bytes: &[u8]) -> bool {
    let lower = name.to_ascii_lowercase();
    let path_part = lower.split(['?', '#']).next().unwrap_or_default();
    if path_part.ends_with(".svg") {
        return true;
    }
    let head = &bytes[..bytes.len().min(256)];
    String::from_utf8_lossy(head).contains("<svg")
}

fn rasterize_svg(bytes: &[u8]) -> Result<RawImage> {
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
        .map_err(|e| Error::Svg(e.to_string()))?;

    let pixmap_size = tree.size().to_int_size();
    let width = pixmap_size.width();
    let height = pixmap_size.height();
    if width == 0 || height == 0 {
        return Err(Error::Svg("SVG has empty dimensions".into()));
    }

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| Error::Svg("Failed to allocate SVG pixmap".into()))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha; the renderer expects straight RGBA.
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgba.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    Ok(RawImage::from_rgba(width, height, rgba))
}

/// Decodes an encoded image.
///
/// `name` is the source the bytes came from; it is only used to recognise
/// SVG documents.
///
/// # Errors
///
/// Returns [`Error::Svg`] when an SVG cannot be parsed and [`Error::Image`]
/// for undecodable raster data.
pub fn decode_bytes(bytes: &[u8], name: &str) -> Result<RawImage> {
    if looks_like_svg(name, bytes) {
        return rasterize_svg(bytes);
    }

    let img = image_rs::load_from_memory(bytes)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(RawImage::from_rgba(width, height, rgba.into_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{ImageBuffer, Rgba};
    use std::fs;
    use tempfile::tempdir;

    const TINY_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="4"><rect width="8" height="4" fill="red"/></svg>"#;

    #[test]
    fn decodes_png_file() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("pixel.png");
        let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        buffer.save(&path).expect("failed to write png");

        let bytes = fs::read(&path).expect("failed to read png");
        let raw = decode_bytes(&bytes, "pixel.png").expect("png should decode");
        assert_eq!((raw.width(), raw.height()), (3, 2));
        assert_eq!(&raw.rgba_bytes()[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn rasterizes_svg_by_extension_and_content() {
        let by_name = decode_bytes(TINY_SVG.as_bytes(), "icon.SVG").expect("svg should render");
        assert_eq!((by_name.width(), by_name.height()), (8, 4));

        let by_content =
            decode_bytes(TINY_SVG.as_bytes(), "https://cdn/x?id=1").expect("svg should render");
        assert_eq!(by_content.width(), 8);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = decode_bytes(b"definitely not an image", "noise.bin").unwrap_err();
        assert!(matches!(err, Error::Image(_)));
    }

    #[test]
    fn translucent_svg_pixels_are_straight_alpha() {
        const HALF_RED: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2"><rect width="2" height="2" fill="red" fill-opacity="0.5"/></svg>"#;

        let raw = decode_bytes(HALF_RED.as_bytes(), "half.svg").expect("svg should render");
        let pixel = &raw.rgba_bytes()[..4];
        assert!(pixel[0] >= 250, "red channel was {}", pixel[0]);
        assert_eq!((pixel[1], pixel[2]), (0, 0));
        assert!((126..=129).contains(&pixel[3]), "alpha was {}", pixel[3]);
    }

    #[test]
    fn image_data_reports_size() {
        let raw = RawImage::from_rgba(2, 2, vec![0u8; 16]);
        let data = ImageData::from_raw(raw);
        assert_eq!(data.size_bytes(), 16);
    }
}
