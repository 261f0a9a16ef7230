// SPDX-License-Identifier: MPL-2.0
//! Decoded image data without presentation dependencies.

use std::sync::Arc;

/// A decoded image: dimensions plus RGBA8 pixels.
///
/// Produced by image fetchers on a background thread and turned into a
/// renderer handle by the presentation layer.
///
/// # Example
///
/// ```
/// use iced_lightbox::domain::image::RawImage;
///
/// let image = RawImage::from_rgba(4, 2, vec![0u8; 4 * 2 * 4]);
/// assert_eq!(image.size_bytes(), 32);
/// assert!(!image.is_portrait());
/// ```
#[derive(Debug, Clone)]
pub struct RawImage {
    width: u32,
    height: u32,
    rgba_bytes: Arc<Vec<u8>>,
}

impl RawImage {
    /// Creates a new `RawImage` from dimensions and RGBA pixel data.
    ///
    /// # Panics
    ///
    /// Panics if the pixel data length doesn't match `width * height * 4`.
    #[must_use]
    pub fn new(width: u32, height: u32, rgba_bytes: Arc<Vec<u8>>) -> Self {
        let expected_len = (width as usize) * (height as usize) * 4;
        assert_eq!(
            rgba_bytes.len(),
            expected_len,
            "RGBA data length mismatch: expected {expected_len}, got {}",
            rgba_bytes.len()
        );

        Self {
            width,
            height,
            rgba_bytes,
        }
    }

    /// Creates a new `RawImage` from owned RGBA pixel data.
    ///
    /// # Panics
    ///
    /// Panics if the pixel data length doesn't match `width * height * 4`.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, rgba_bytes: Vec<u8>) -> Self {
        Self::new(width, height, Arc::new(rgba_bytes))
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn rgba_bytes(&self) -> &[u8] {
        &self.rgba_bytes
    }

    /// Memory footprint of the pixel buffer (4 bytes per pixel).
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.rgba_bytes.len()
    }

    #[must_use]
    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }

    /// Consumes the image and returns its pixels, cloning only if shared.
    #[must_use]
    pub fn into_rgba(self) -> Vec<u8> {
        Arc::try_unwrap(self.rgba_bytes).unwrap_or_else(|shared| (*shared).clone())
    }
}

impl PartialEq for RawImage {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.rgba_bytes == other.rgba_bytes
    }
}

impl Eq for RawImage {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_image_reports_dimensions_and_size() {
        let image = RawImage::from_rgba(10, 20, vec![0u8; 10 * 20 * 4]);
        assert_eq!(image.width(), 10);
        assert_eq!(image.height(), 20);
        assert_eq!(image.size_bytes(), 800);
        assert!(image.is_portrait());
    }

    #[test]
    #[should_panic(expected = "RGBA data length mismatch")]
    fn raw_image_rejects_short_buffer() {
        let _ = RawImage::from_rgba(10, 10, vec![0u8; 10]);
    }

    #[test]
    fn into_rgba_returns_pixels() {
        let image = RawImage::from_rgba(1, 1, vec![1, 2, 3, 4]);
        assert_eq!(image.into_rgba(), vec![1, 2, 3, 4]);
    }
}
