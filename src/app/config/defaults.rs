// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Display**: Layout mode and image width
//! - **Preload**: Neighbour preloading and cache limits

pub use crate::domain::gallery::newtypes::{grace_bounds, lookahead_bounds, DEFAULT_MAX_IMAGE_WIDTH};

// ==========================================================================
// Display Defaults
// ==========================================================================

/// Layout mode used when neither the manifest nor the CLI sets one.
pub const DEFAULT_LAYOUT: &str = "contain";

// ==========================================================================
// Preload Defaults
// ==========================================================================

/// Default preload cache size in megabytes.
pub const DEFAULT_PRELOAD_CACHE_MB: u32 = 64;

/// Minimum preload cache size in megabytes.
pub const MIN_PRELOAD_CACHE_MB: u32 = 8;

/// Maximum preload cache size in megabytes.
pub const MAX_PRELOAD_CACHE_MB: u32 = 512;

/// Default number of decoded images kept by the preload cache.
pub const DEFAULT_PRELOAD_MAX_IMAGES: usize = crate::media::preload::DEFAULT_MAX_IMAGES;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_PRELOAD_CACHE_MB <= DEFAULT_PRELOAD_CACHE_MB);
    assert!(DEFAULT_PRELOAD_CACHE_MB <= MAX_PRELOAD_CACHE_MB);
    assert!(lookahead_bounds::MIN <= lookahead_bounds::DEFAULT);
    assert!(lookahead_bounds::DEFAULT <= lookahead_bounds::MAX);
    assert!(grace_bounds::DEFAULT_MS <= grace_bounds::MAX_MS);
    assert!(DEFAULT_MAX_IMAGE_WIDTH > 0);
};
