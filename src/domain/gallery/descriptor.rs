// SPDX-License-Identifier: MPL-2.0
//! Image descriptors supplied by the caller.

use super::srcset::SrcSet;

/// Intrinsic pixel size of an image, known ahead of loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeHint {
    pub width: u32,
    pub height: u32,
}

impl SizeHint {
    /// Returns `None` when either dimension is zero.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    #[must_use]
    pub fn aspect_ratio(self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// One entry of the gallery.
///
/// Immutable once handed to the viewer. The `src` is required; everything
/// else is optional presentation detail.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDescriptor {
    src: String,
    src_set: SrcSet,
    caption: Option<String>,
    copyright: Option<String>,
    size_hint: Option<SizeHint>,
}

impl ImageDescriptor {
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            src_set: SrcSet::default(),
            caption: None,
            copyright: None,
            size_hint: None,
        }
    }

    #[must_use]
    pub fn with_src_set(mut self, src_set: SrcSet) -> Self {
        self.src_set = src_set;
        self
    }

    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    #[must_use]
    pub fn with_copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyright = Some(copyright.into());
        self
    }

    #[must_use]
    pub fn with_size_hint(mut self, size_hint: SizeHint) -> Self {
        self.size_hint = Some(size_hint);
        self
    }

    #[must_use]
    pub fn src(&self) -> &str {
        &self.src
    }

    #[must_use]
    pub fn src_set(&self) -> &SrcSet {
        &self.src_set
    }

    #[must_use]
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    #[must_use]
    pub fn copyright(&self) -> Option<&str> {
        self.copyright.as_deref()
    }

    #[must_use]
    pub fn size_hint(&self) -> Option<SizeHint> {
        self.size_hint
    }

    /// The source actually fetched for a given display width.
    ///
    /// Uses the best width candidate of the source set when one exists,
    /// otherwise `src`.
    #[must_use]
    pub fn source_for_width(&self, display_width: Option<u32>) -> &str {
        display_width
            .and_then(|width| self.src_set.select(width))
            .unwrap_or(&self.src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_optional_fields() {
        let descriptor = ImageDescriptor::new("a.jpg")
            .with_caption("Harbour")
            .with_copyright("© 2024")
            .with_size_hint(SizeHint::new(1600, 900).unwrap());

        assert_eq!(descriptor.src(), "a.jpg");
        assert_eq!(descriptor.caption(), Some("Harbour"));
        assert_eq!(descriptor.copyright(), Some("© 2024"));
        assert_eq!(descriptor.size_hint().map(|s| s.width), Some(1600));
    }

    #[test]
    fn size_hint_rejects_zero_dimensions() {
        assert!(SizeHint::new(0, 10).is_none());
        assert!(SizeHint::new(10, 0).is_none());
    }

    #[test]
    fn source_for_width_prefers_src_set_candidate() {
        let descriptor = ImageDescriptor::new("full.jpg")
            .with_src_set(SrcSet::parse("small.jpg 640w, large.jpg 1920w"));

        assert_eq!(descriptor.source_for_width(Some(600)), "small.jpg");
        assert_eq!(descriptor.source_for_width(Some(1300)), "large.jpg");
        assert_eq!(descriptor.source_for_width(None), "full.jpg");
    }

    #[test]
    fn source_for_width_falls_back_to_src_without_width_candidates() {
        let descriptor =
            ImageDescriptor::new("full.jpg").with_src_set(SrcSet::parse("retina.jpg 2x"));
        assert_eq!(descriptor.source_for_width(Some(800)), "full.jpg");
    }
}
