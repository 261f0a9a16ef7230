// SPDX-License-Identifier: MPL-2.0
//! Gallery newtypes.
//!
//! Type-safe wrappers for the viewer's numeric settings, ensuring they are
//! always within valid ranges.

use std::num::NonZeroU32;
use std::time::Duration;

// =============================================================================
// MaxImageWidth
// =============================================================================

/// Default maximum display width in pixels.
pub const DEFAULT_MAX_IMAGE_WIDTH: u32 = 1300;

/// Maximum width of the image container, in logical pixels. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxImageWidth(NonZeroU32);

impl MaxImageWidth {
    /// Returns `None` for zero.
    #[must_use]
    pub fn new(pixels: u32) -> Option<Self> {
        NonZeroU32::new(pixels).map(Self)
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0.get()
    }
}

impl Default for MaxImageWidth {
    fn default() -> Self {
        Self(NonZeroU32::new(DEFAULT_MAX_IMAGE_WIDTH).unwrap_or(NonZeroU32::MIN))
    }
}

// =============================================================================
// LoadingGrace
// =============================================================================

/// Loading grace bounds in milliseconds.
pub mod grace_bounds {
    pub const MIN_MS: u64 = 0;
    pub const MAX_MS: u64 = 2_000;
    pub const DEFAULT_MS: u64 = 200;
}

/// How long a load may take before the loading indicator is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingGrace(u64);

impl LoadingGrace {
    /// Creates a new grace delay, clamping to the valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(grace_bounds::MIN_MS, grace_bounds::MAX_MS))
    }

    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for LoadingGrace {
    fn default() -> Self {
        Self(grace_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// Lookahead
// =============================================================================

/// Lookahead bounds (images preloaded past the target, per direction).
pub mod lookahead_bounds {
    pub const MIN: usize = 1;
    pub const MAX: usize = 4;
    pub const DEFAULT: usize = 2;
}

/// Number of images preloaded beyond the navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookahead(usize);

impl Lookahead {
    /// Creates a new lookahead, clamping to the valid range.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self(count.clamp(lookahead_bounds::MIN, lookahead_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for Lookahead {
    fn default() -> Self {
        Self(lookahead_bounds::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_image_width_rejects_zero() {
        assert!(MaxImageWidth::new(0).is_none());
        assert_eq!(MaxImageWidth::new(800).map(MaxImageWidth::value), Some(800));
        assert_eq!(MaxImageWidth::default().value(), DEFAULT_MAX_IMAGE_WIDTH);
    }

    #[test]
    fn loading_grace_clamps_to_max() {
        assert_eq!(LoadingGrace::from_millis(60_000).as_millis(), grace_bounds::MAX_MS);
        assert_eq!(
            LoadingGrace::default().as_duration(),
            Duration::from_millis(grace_bounds::DEFAULT_MS)
        );
    }

    #[test]
    fn lookahead_clamps_to_range() {
        assert_eq!(Lookahead::new(0).value(), lookahead_bounds::MIN);
        assert_eq!(Lookahead::new(99).value(), lookahead_bounds::MAX);
        assert_eq!(Lookahead::default().value(), 2);
    }
}
