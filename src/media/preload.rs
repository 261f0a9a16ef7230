// SPDX-License-Identifier: MPL-2.0
//! Preload cache shared by the viewers of one session.
//!
//! The cache remembers which sources have already been fetched so that
//! navigating back and forth never fetches the same image twice, and keeps the
//! decoded images around so that a preloaded neighbour is shown instantly.
//!
//! # Design
//!
//! - **Session-scoped**: owned by the host and passed by `&mut` into the viewer,
//!   never a global. Each test gets its own cache.
//! - **Deduplicating**: a source that is cached or already in flight is never
//!   handed out for fetching a second time.
//! - **Memory-bounded**: LRU eviction by byte and image-count limits.
//!
//! # Usage
//!
//! ```ignore
//! let mut cache = PreloadCache::new(config);
//!
//! if cache.begin_fetch(&source) {
//!     // spawn the fetch; report back with `complete` or `fail`
//! }
//! ```

use crate::media::ImageData;
use lru::LruCache;
use std::collections::HashSet;
use std::num::NonZeroUsize;
use tracing::debug;

/// Default cache size in bytes (64 MB).
pub const DEFAULT_PRELOAD_CACHE_BYTES: usize = 64 * 1024 * 1024;

/// Minimum cache size in bytes (8 MB).
pub const MIN_PRELOAD_CACHE_BYTES: usize = 8 * 1024 * 1024;

/// Maximum cache size in bytes (512 MB).
pub const MAX_PRELOAD_CACHE_BYTES: usize = 512 * 1024 * 1024;

/// Default maximum number of images to keep.
pub const DEFAULT_MAX_IMAGES: usize = 24;

/// Minimum images to keep.
pub const MIN_MAX_IMAGES: usize = 4;

/// Maximum images to keep.
pub const MAX_MAX_IMAGES: usize = 128;

/// Configuration for the preload cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadConfig {
    /// Maximum cache size in bytes.
    pub max_bytes: usize,

    /// Maximum number of images to cache.
    pub max_images: usize,

    /// Whether neighbours are preloaded and fetched images retained.
    pub enabled: bool,
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_PRELOAD_CACHE_BYTES,
            max_images: DEFAULT_MAX_IMAGES,
            enabled: true,
        }
    }
}

impl PreloadConfig {
    /// Creates a new configuration, clamping the limits to their valid ranges.
    #[must_use]
    pub fn new(max_bytes: usize, max_images: usize) -> Self {
        Self {
            max_bytes: max_bytes.clamp(MIN_PRELOAD_CACHE_BYTES, MAX_PRELOAD_CACHE_BYTES),
            max_images: max_images.clamp(MIN_MAX_IMAGES, MAX_MAX_IMAGES),
            enabled: true,
        }
    }

    /// Creates a disabled configuration.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

/// Statistics about cache behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreloadStats {
    /// Number of images currently cached.
    pub image_count: usize,

    /// Total bytes currently used by cached images.
    pub total_bytes: usize,

    /// Lookups that found an image.
    pub hits: u64,

    /// Lookups that found nothing.
    pub misses: u64,

    /// Fetches handed out to callers.
    pub fetches: u64,

    /// Requests answered without a fetch (cached or already in flight).
    pub deduplicated: u64,

    /// Fetches that completed with an error.
    pub failures: u64,

    /// Images evicted due to limits.
    pub evictions: u64,
}

impl PreloadStats {
    /// Returns the lookup hit rate as a percentage (0.0 - 100.0).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Session-scoped cache of fetched images, keyed by source URL.
pub struct PreloadCache {
    cache: LruCache<String, ImageData>,
    in_flight: HashSet<String>,
    config: PreloadConfig,
    current_bytes: usize,
    stats: PreloadStats,
}

impl PreloadCache {
    #[must_use]
    pub fn new(config: PreloadConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_images).unwrap_or(NonZeroUsize::MIN);

        Self {
            cache: LruCache::new(capacity),
            in_flight: HashSet::new(),
            config,
            current_bytes: 0,
            stats: PreloadStats::default(),
        }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(PreloadConfig::default())
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Claims `source` for fetching.
    ///
    /// Returns `true` when the caller must issue the fetch, `false` when the
    /// source is already cached or another fetch for it is in flight. With
    /// caching disabled only the in-flight check applies.
    pub fn begin_fetch(&mut self, source: &str) -> bool {
        if self.config.enabled && self.cache.contains(source) {
            self.stats.deduplicated += 1;
            debug!(source, "preload skipped: already cached");
            return false;
        }
        if !self.in_flight.insert(source.to_string()) {
            self.stats.deduplicated += 1;
            debug!(source, "preload skipped: already in flight");
            return false;
        }
        self.stats.fetches += 1;
        true
    }

    /// Records a successful fetch and stores the image.
    ///
    /// Returns `true` if the image was retained. Images larger than half the
    /// byte budget are not retained.
    pub fn complete(&mut self, source: &str, image: ImageData) -> bool {
        self.in_flight.remove(source);

        if !self.config.enabled {
            return false;
        }

        let image_size = image.size_bytes();
        if image_size > self.config.max_bytes / 2 {
            debug!(source, image_size, "image too large to retain");
            return false;
        }

        if let Some(existing) = self.cache.pop(source) {
            self.current_bytes = self.current_bytes.saturating_sub(existing.size_bytes());
        }

        while self.current_bytes + image_size > self.config.max_bytes && !self.cache.is_empty() {
            self.evict_lru();
        }
        if self.cache.len() == self.cache.cap().get() {
            self.evict_lru();
        }

        self.current_bytes += image_size;
        self.cache.put(source.to_string(), image);
        self.stats.image_count = self.cache.len();
        self.stats.total_bytes = self.current_bytes;
        true
    }

    /// Records a failed fetch. The source may be requested again later.
    pub fn fail(&mut self, source: &str) {
        self.in_flight.remove(source);
        self.stats.failures += 1;
    }

    fn evict_lru(&mut self) {
        if let Some((source, evicted)) = self.cache.pop_lru() {
            self.current_bytes = self.current_bytes.saturating_sub(evicted.size_bytes());
            self.stats.evictions += 1;
            debug!(source, "evicted from preload cache");
        }
    }

    /// Gets an image and marks it as recently used.
    pub fn get(&mut self, source: &str) -> Option<ImageData> {
        if !self.config.enabled {
            return None;
        }

        if let Some(image) = self.cache.get(source) {
            self.stats.hits += 1;
            Some(image.clone())
        } else {
            self.stats.misses += 1;
            None
        }
    }

    /// Checks for a cached image without touching LRU order or statistics.
    #[must_use]
    pub fn contains(&self, source: &str) -> bool {
        self.config.enabled && self.cache.contains(source)
    }

    #[must_use]
    pub fn is_in_flight(&self, source: &str) -> bool {
        self.in_flight.contains(source)
    }

    /// Drops all cached images. In-flight fetches are left to complete.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.current_bytes = 0;
        self.stats.image_count = 0;
        self.stats.total_bytes = 0;
    }

    #[must_use]
    pub fn stats(&self) -> PreloadStats {
        self.stats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.current_bytes
    }

    #[must_use]
    pub fn config(&self) -> &PreloadConfig {
        &self.config
    }
}

impl Default for PreloadCache {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for PreloadCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreloadCache")
            .field("enabled", &self.config.enabled)
            .field("image_count", &self.cache.len())
            .field("in_flight", &self.in_flight.len())
            .field("memory_usage", &self.current_bytes)
            .field("max_bytes", &self.config.max_bytes)
            .field("max_images", &self.config.max_images)
            .field("stats", &self.stats)
            .finish()
    }
}
