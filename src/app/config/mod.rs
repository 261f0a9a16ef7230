// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[display]` - Default layout mode, background colour, maximum image width
//! - `[preload]` - Neighbour preloading, cache limits and loading grace delay
//!
//! Values given in a gallery manifest or on the command line take precedence
//! over these settings.
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass `--config-dir` on the command line
//! 3. Set `ICED_LIGHTBOX_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_lightbox::app::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.general.language = Some("fr".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::domain::gallery::{BackgroundColor, LayoutMode, LoadingGrace, Lookahead, MaxImageWidth};
use crate::error::{Error, Result};
use crate::media::PreloadConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Display settings applied to galleries that don't set their own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Layout mode: `cover`, `contain` or `auto`.
    #[serde(default = "default_layout", skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,

    /// Backdrop colour (`#rrggbb`, `#rrggbbaa`, `black`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    /// Maximum displayed image width in pixels (contain layout only).
    #[serde(
        default = "default_max_image_width",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_image_width: Option<u32>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            layout: default_layout(),
            background: None,
            max_image_width: default_max_image_width(),
        }
    }
}

/// Preloading settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreloadSettings {
    /// Whether neighbours are preloaded.
    #[serde(default = "default_enabled", skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Images preloaded past the navigation target.
    #[serde(default = "default_lookahead", skip_serializing_if = "Option::is_none")]
    pub lookahead: Option<usize>,

    /// Maximum number of decoded images kept in memory.
    #[serde(default = "default_max_images", skip_serializing_if = "Option::is_none")]
    pub max_images: Option<usize>,

    /// Maximum memory used by decoded images, in megabytes.
    #[serde(default = "default_cache_mb", skip_serializing_if = "Option::is_none")]
    pub cache_mb: Option<u32>,

    /// Delay before the loading indicator appears, in milliseconds.
    #[serde(
        default = "default_loading_grace_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub loading_grace_ms: Option<u64>,
}

impl Default for PreloadSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            lookahead: default_lookahead(),
            max_images: default_max_images(),
            cache_mb: default_cache_mb(),
            loading_grace_ms: default_loading_grace_ms(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub preload: PreloadSettings,
}

impl Config {
    /// Configured layout mode. Unknown values fall back to the default.
    #[must_use]
    pub fn layout(&self) -> LayoutMode {
        match self.display.layout.as_deref() {
            None => LayoutMode::default(),
            Some(value) => LayoutMode::parse(value).unwrap_or_else(|| {
                warn!(value, "unknown layout in settings, using default");
                LayoutMode::default()
            }),
        }
    }

    /// Configured backdrop colour. Unparseable values fall back to the default.
    #[must_use]
    pub fn background(&self) -> BackgroundColor {
        match self.display.background.as_deref() {
            None => BackgroundColor::default(),
            Some(value) => BackgroundColor::parse(value).unwrap_or_else(|| {
                warn!(value, "invalid background in settings, using default");
                BackgroundColor::default()
            }),
        }
    }

    #[must_use]
    pub fn max_image_width(&self) -> MaxImageWidth {
        self.display
            .max_image_width
            .and_then(MaxImageWidth::new)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn lookahead(&self) -> Lookahead {
        self.preload
            .lookahead
            .map(Lookahead::new)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn loading_grace(&self) -> LoadingGrace {
        self.preload
            .loading_grace_ms
            .map(LoadingGrace::from_millis)
            .unwrap_or_default()
    }

    /// Preload cache limits derived from the `[preload]` section.
    #[must_use]
    pub fn preload_config(&self) -> PreloadConfig {
        if !self.preload.enabled.unwrap_or(true) {
            return PreloadConfig::disabled();
        }
        let cache_mb = self
            .preload
            .cache_mb
            .unwrap_or(DEFAULT_PRELOAD_CACHE_MB)
            .clamp(MIN_PRELOAD_CACHE_MB, MAX_PRELOAD_CACHE_MB);
        let max_images = self
            .preload
            .max_images
            .unwrap_or(DEFAULT_PRELOAD_MAX_IMAGES);

        PreloadConfig::new(cache_mb as usize * 1024 * 1024, max_images)
    }
}

// =============================================================================
// Default Value Functions (for serde)
// =============================================================================

#[allow(clippy::unnecessary_wraps)]
fn default_layout() -> Option<String> {
    Some(DEFAULT_LAYOUT.to_string())
}

#[allow(clippy::unnecessary_wraps)]
fn default_max_image_width() -> Option<u32> {
    Some(DEFAULT_MAX_IMAGE_WIDTH)
}

#[allow(clippy::unnecessary_wraps)]
fn default_enabled() -> Option<bool> {
    Some(true)
}

#[allow(clippy::unnecessary_wraps)]
fn default_lookahead() -> Option<usize> {
    Some(lookahead_bounds::DEFAULT)
}

#[allow(clippy::unnecessary_wraps)]
fn default_max_images() -> Option<usize> {
    Some(DEFAULT_PRELOAD_MAX_IMAGES)
}

#[allow(clippy::unnecessary_wraps)]
fn default_cache_mb() -> Option<u32> {
    Some(DEFAULT_PRELOAD_CACHE_MB)
}

#[allow(clippy::unnecessary_wraps)]
fn default_loading_grace_ms() -> Option<u64> {
    Some(grace_bounds::DEFAULT_MS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning i18n key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from `base_dir/settings.toml` when given, otherwise
/// from the resolved config directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    warn!(path = %path.display(), %err, "failed to load settings");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads a configuration file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`] if
/// it is not valid TOML for this schema.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
///
/// # Errors
///
/// See [`save_to_path`].
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration under `base_dir` when given.
///
/// # Errors
///
/// See [`save_to_path`].
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Writes the configuration, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`Error::Io`] on write failure and [`Error::Config`] if the
/// configuration cannot be serialized.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_sections() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
            },
            display: DisplayConfig {
                layout: Some("auto".to_string()),
                background: Some("#101010".to_string()),
                max_image_width: Some(900),
            },
            preload: PreloadSettings {
                enabled: Some(false),
                lookahead: Some(3),
                max_images: Some(10),
                cache_mb: Some(32),
                loading_grace_ms: Some(0),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config: Config = toml::from_str("[general]\nlanguage = \"fr\"\n").unwrap();
        assert_eq!(config.display, DisplayConfig::default());
        assert_eq!(config.preload, PreloadSettings::default());
        assert_eq!(config.layout(), LayoutMode::Contain);
    }

    #[test]
    fn invalid_file_yields_defaults_and_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "not = valid = toml").unwrap();

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn missing_file_yields_defaults_without_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn load_from_path_rejects_wrong_types() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "[display]\nmax_image_width = \"wide\"\n").unwrap();

        assert!(matches!(load_from_path(&path), Err(Error::Config(_))));
    }

    #[test]
    fn unknown_values_fall_back_to_defaults() {
        let mut config = Config::default();
        config.display.layout = Some("stretch".to_string());
        config.display.background = Some("#zzz".to_string());
        config.display.max_image_width = Some(0);

        assert_eq!(config.layout(), LayoutMode::default());
        assert_eq!(config.background(), BackgroundColor::default());
        assert_eq!(config.max_image_width(), MaxImageWidth::default());
    }

    #[test]
    fn preload_config_converts_megabytes_and_honours_disable() {
        let mut config = Config::default();
        config.preload.cache_mb = Some(16);
        let preload = config.preload_config();
        assert!(preload.enabled);
        assert_eq!(preload.max_bytes, 16 * 1024 * 1024);

        config.preload.enabled = Some(false);
        assert!(!config.preload_config().enabled);
    }

    #[test]
    fn lookahead_and_grace_are_clamped() {
        let mut config = Config::default();
        config.preload.lookahead = Some(99);
        config.preload.loading_grace_ms = Some(60_000);

        assert_eq!(config.lookahead().value(), lookahead_bounds::MAX);
        assert_eq!(config.loading_grace().as_millis(), grace_bounds::MAX_MS);
    }
}
