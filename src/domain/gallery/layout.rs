// SPDX-License-Identifier: MPL-2.0
//! Layout modes and their resolution against the viewport.

use std::fmt;

/// Visible area the image is laid out in, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_portrait(self) -> bool {
        self.height > self.width
    }
}

/// How an image is fitted into its container once everything is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fit {
    /// Crop to fill.
    Cover,
    /// Letterbox to fit.
    Contain,
}

impl Fit {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Fit::Cover => Fit::Contain,
            Fit::Contain => Fit::Cover,
        }
    }
}

/// Layout mode requested by the caller.
///
/// `Auto` is never stored as a resolved value: it is re-evaluated against the
/// current viewport every time the view is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutMode {
    Cover,
    #[default]
    Contain,
    Auto,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 3] = [LayoutMode::Cover, LayoutMode::Contain, LayoutMode::Auto];

    /// Parses the lowercase names `cover`, `contain` and `auto`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cover" => Some(LayoutMode::Cover),
            "contain" => Some(LayoutMode::Contain),
            "auto" => Some(LayoutMode::Auto),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutMode::Cover => "cover",
            LayoutMode::Contain => "contain",
            LayoutMode::Auto => "auto",
        }
    }

    /// Resolves to a concrete fit.
    ///
    /// `Auto` gives `Contain` for portrait viewports (height > width) and
    /// `Cover` otherwise. Without a known viewport it falls back to `Contain`.
    #[must_use]
    pub fn resolve(self, viewport: Option<Viewport>) -> Fit {
        match self {
            LayoutMode::Cover => Fit::Cover,
            LayoutMode::Contain => Fit::Contain,
            LayoutMode::Auto => match viewport {
                Some(v) if !v.is_portrait() => Fit::Cover,
                _ => Fit::Contain,
            },
        }
    }

    /// The explicit mode opposite to what this mode currently resolves to.
    #[must_use]
    pub fn toggled(self, viewport: Option<Viewport>) -> Self {
        match self.resolve(viewport).opposite() {
            Fit::Cover => LayoutMode::Cover,
            Fit::Contain => LayoutMode::Contain,
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
