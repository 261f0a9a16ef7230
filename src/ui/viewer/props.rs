// SPDX-License-Identifier: MPL-2.0
//! Construction arguments of the lightbox.
//!
//! Props are built either in code through [`ViewerProps::builder`] or from an
//! untyped TOML document (a gallery manifest) through
//! [`ViewerPropsBuilder::from_toml_str`]. Both paths fail fast with a
//! [`ValidationError`] naming the offending field; no viewer is created from
//! partially valid input.
//!
//! # Manifest format
//!
//! ```toml
//! layout = "auto"              # cover | contain | auto
//! background = "#000000eb"
//! max_image_width = 1300
//! start_index = 0
//!
//! [[images]]
//! src = "photos/harbour.jpg"
//! src_set = ["photos/harbour-640.jpg 640w", "photos/harbour-1920.jpg 1920w"]
//! caption = "Harbour at dawn"
//! copyright = "J. Doe"
//! width = 1920
//! height = 1280
//! ```
//!
//! A bare string in `images` is shorthand for `{ src = "..." }`.

use crate::domain::gallery::{
    BackgroundColor, ImageDescriptor, LayoutMode, MaxImageWidth, SizeHint, SrcSet,
};
use crate::error::{Result, ValidationError};
use std::fmt;
use toml::Value;

/// Invoked once when the user dismisses the viewer.
pub type CloseCallback = Box<dyn FnMut() + Send>;

/// Validated construction arguments.
pub struct ViewerProps {
    images: Vec<ImageDescriptor>,
    layout: LayoutMode,
    background: BackgroundColor,
    max_image_width: MaxImageWidth,
    start_index: usize,
    on_close: Option<CloseCallback>,
}

impl fmt::Debug for ViewerProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewerProps")
            .field("images", &self.images)
            .field("layout", &self.layout)
            .field("background", &self.background)
            .field("max_image_width", &self.max_image_width)
            .field("start_index", &self.start_index)
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

impl ViewerProps {
    #[must_use]
    pub fn builder(images: Vec<ImageDescriptor>) -> ViewerPropsBuilder {
        ViewerPropsBuilder::new(images)
    }

    #[must_use]
    pub fn images(&self) -> &[ImageDescriptor] {
        &self.images
    }

    #[must_use]
    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    #[must_use]
    pub fn background(&self) -> BackgroundColor {
        self.background
    }

    #[must_use]
    pub fn max_image_width(&self) -> MaxImageWidth {
        self.max_image_width
    }

    /// Start position, already clamped to the image list.
    #[must_use]
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Source to fetch for each image, picked from its source set for the
    /// maximum display width.
    #[must_use]
    pub fn sources(&self) -> Vec<String> {
        let width = Some(self.max_image_width.value());
        self.images
            .iter()
            .map(|image| image.source_for_width(width).to_string())
            .collect()
    }

    /// Separates the close callback from the rest of the props.
    pub fn take_on_close(&mut self) -> Option<CloseCallback> {
        self.on_close.take()
    }
}

/// Builder for [`ViewerProps`].
///
/// Optional values left unset fall back to the defaults: `contain` layout,
/// the default backdrop, 1300 px maximum width and the first image.
pub struct ViewerPropsBuilder {
    images: Vec<ImageDescriptor>,
    layout: Option<LayoutMode>,
    background: Option<String>,
    fallback_background: Option<BackgroundColor>,
    max_image_width: Option<u32>,
    start_index: Option<i64>,
    on_close: Option<CloseCallback>,
}

impl fmt::Debug for ViewerPropsBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewerPropsBuilder")
            .field("images", &self.images.len())
            .field("layout", &self.layout)
            .field("background", &self.background)
            .field("max_image_width", &self.max_image_width)
            .field("start_index", &self.start_index)
            .finish_non_exhaustive()
    }
}

impl ViewerPropsBuilder {
    #[must_use]
    pub fn new(images: Vec<ImageDescriptor>) -> Self {
        Self {
            images,
            layout: None,
            background: None,
            fallback_background: None,
            max_image_width: None,
            start_index: None,
            on_close: None,
        }
    }

    #[must_use]
    pub fn layout(mut self, layout: LayoutMode) -> Self {
        self.layout = Some(layout);
        self
    }

    #[must_use]
    pub fn background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    #[must_use]
    pub fn max_image_width(mut self, pixels: u32) -> Self {
        self.max_image_width = Some(pixels);
        self
    }

    /// Start position. Out-of-range values are clamped, not rejected.
    #[must_use]
    pub fn start_index(mut self, index: i64) -> Self {
        self.start_index = Some(index);
        self
    }

    #[must_use]
    pub fn on_close(mut self, callback: impl FnMut() + Send + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    /// Fills values this builder does not set yet, leaving explicit ones alone.
    #[must_use]
    pub fn or_defaults(
        mut self,
        layout: LayoutMode,
        background: BackgroundColor,
        max_image_width: MaxImageWidth,
    ) -> Self {
        self.layout.get_or_insert(layout);
        self.fallback_background = Some(background);
        self.max_image_width.get_or_insert(max_image_width.value());
        self
    }

    /// Validates and builds the props.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Validation`] for an empty image list, an
    /// unparseable background or a zero maximum width.
    pub fn build(self) -> Result<ViewerProps> {
        if self.images.is_empty() {
            return Err(ValidationError::new("images", "a non-empty Array", "[]").into());
        }
        for (index, image) in self.images.iter().enumerate() {
            check_src(&format!("images[{index}].src"), image.src())?;
        }

        let background = match self.background {
            None => self.fallback_background.unwrap_or_default(),
            Some(value) => BackgroundColor::parse(&value).ok_or_else(|| {
                ValidationError::new("background", "a color String", format!("{value:?}"))
            })?,
        };

        let max_image_width = match self.max_image_width {
            None => MaxImageWidth::default(),
            Some(pixels) => MaxImageWidth::new(pixels).ok_or_else(|| {
                ValidationError::new("max_image_width", "a positive Integer", pixels.to_string())
            })?,
        };

        let last = self.images.len() - 1;
        let start_index = self
            .start_index
            .map_or(0, |index| usize::try_from(index.max(0)).unwrap_or(usize::MAX).min(last));

        Ok(ViewerProps {
            images: self.images,
            layout: self.layout.unwrap_or_default(),
            background,
            max_image_width,
            start_index,
            on_close: self.on_close,
        })
    }

    /// Reads a gallery manifest.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Config`] for malformed TOML and
    /// [`crate::error::Error::Validation`] for well-formed TOML of the wrong
    /// shape.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table = content.parse::<toml::Table>()?;
        Self::from_toml(&Value::Table(table))
    }

    /// Builds from an already parsed TOML value, checking the shape of every
    /// field.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Validation`] naming the first field that
    /// has an unexpected type or value.
    pub fn from_toml(value: &Value) -> Result<Self> {
        let Value::Table(table) = value else {
            return Err(ValidationError::new("props", "a Table", describe(value)).into());
        };

        let images = match table.get("images") {
            Some(Value::Array(entries)) => entries
                .iter()
                .enumerate()
                .map(|(index, entry)| descriptor_from_toml(index, entry))
                .collect::<std::result::Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(ValidationError::new("images", "an Array", describe(other)).into())
            }
            None => return Err(ValidationError::new("images", "an Array", "nothing").into()),
        };

        let mut builder = Self::new(images);

        if let Some(layout) = table.get("layout") {
            let parsed = layout.as_str().and_then(LayoutMode::parse).ok_or_else(|| {
                ValidationError::new(
                    "layout",
                    "one of 'cover', 'contain' or 'auto'",
                    describe(layout),
                )
            })?;
            builder = builder.layout(parsed);
        }

        if let Some(background) = table.get("background") {
            let text = background.as_str().ok_or_else(|| {
                ValidationError::new("background", "a color String", describe(background))
            })?;
            builder = builder.background(text);
        }

        if let Some(width) = table.get("max_image_width") {
            builder = builder.max_image_width(positive_u32("max_image_width", width)?);
        }

        if let Some(start) = table.get("start_index") {
            let index = start.as_integer().ok_or_else(|| {
                ValidationError::new("start_index", "an Integer", describe(start))
            })?;
            builder = builder.start_index(index);
        }

        Ok(builder)
    }
}

fn descriptor_from_toml(
    index: usize,
    entry: &Value,
) -> std::result::Result<ImageDescriptor, ValidationError> {
    let field = |name: &str| format!("images[{index}].{name}");

    let table = match entry {
        Value::String(src) => {
            check_src(&format!("images[{index}]"), src)?;
            return Ok(ImageDescriptor::new(src.as_str()));
        }
        Value::Table(table) => table,
        other => {
            return Err(ValidationError::new(
                format!("images[{index}]"),
                "a Table or String",
                describe(other),
            ))
        }
    };

    let src = match table.get("src") {
        Some(Value::String(src)) => src.as_str(),
        Some(other) => return Err(ValidationError::new(field("src"), "a String", describe(other))),
        None => return Err(ValidationError::new(field("src"), "a String", "nothing")),
    };
    check_src(&field("src"), src)?;
    let mut descriptor = ImageDescriptor::new(src);

    if let Some(value) = table.get("src_set").or_else(|| table.get("srcset")) {
        let src_set = match value {
            Value::String(text) => SrcSet::parse(text),
            Value::Array(entries) => {
                let mut candidates = Vec::with_capacity(entries.len());
                for (i, candidate) in entries.iter().enumerate() {
                    let text = candidate.as_str().ok_or_else(|| {
                        ValidationError::new(
                            format!("images[{index}].src_set[{i}]"),
                            "a String",
                            describe(candidate),
                        )
                    })?;
                    candidates.push(text);
                }
                SrcSet::from_entries(candidates)
            }
            other => {
                return Err(ValidationError::new(
                    field("src_set"),
                    "a String or Array",
                    describe(other),
                ))
            }
        };
        descriptor = descriptor.with_src_set(src_set);
    }

    for name in ["caption", "copyright"] {
        let Some(value) = table.get(name) else {
            continue;
        };
        let text = value
            .as_str()
            .ok_or_else(|| ValidationError::new(field(name), "a String", describe(value)))?;
        descriptor = if name == "caption" {
            descriptor.with_caption(text)
        } else {
            descriptor.with_copyright(text)
        };
    }

    match (table.get("width"), table.get("height")) {
        (None, None) => {}
        (Some(width), Some(height)) => {
            let width = positive_u32(&field("width"), width)?;
            let height = positive_u32(&field("height"), height)?;
            if let Some(hint) = SizeHint::new(width, height) {
                descriptor = descriptor.with_size_hint(hint);
            }
        }
        (Some(_), None) => {
            return Err(ValidationError::new(field("height"), "a positive Integer", "nothing"))
        }
        (None, Some(_)) => {
            return Err(ValidationError::new(field("width"), "a positive Integer", "nothing"))
        }
    }

    Ok(descriptor)
}

fn check_src(field: &str, src: &str) -> std::result::Result<(), ValidationError> {
    if src.trim().is_empty() {
        return Err(ValidationError::new(field, "a non-empty String", format!("{src:?}")));
    }
    Ok(())
}

fn positive_u32(field: &str, value: &Value) -> std::result::Result<u32, ValidationError> {
    value
        .as_integer()
        .filter(|n| *n > 0)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| ValidationError::new(field, "a positive Integer", describe(value)))
}

/// Short rendering of a supplied value for error messages.
fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("{s:?}"),
        Value::Integer(n) => n.to_string(),
        Value::Float(x) => x.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(dt) => dt.to_string(),
        Value::Array(items) => format!("an Array of {} item(s)", items.len()),
        Value::Table(_) => "a Table".to_string(),
    }
}
