// SPDX-License-Identifier: MPL-2.0
//! Startup: turns command-line flags and settings into a ready viewer.
//!
//! Precedence for every viewer option is command line, then gallery manifest,
//! then `settings.toml`, then built-in defaults. Invalid props abort startup
//! before any window opens.

use super::config::{self, Config};
use super::message::Flags;
use crate::domain::gallery::{ImageDescriptor, LayoutMode};
use crate::error::{Result, ValidationError};
use crate::infrastructure::fetch::{FileFetcher, HttpFetcher, SourceFetcher};
use crate::ui::viewer::{Lightbox, ViewerOptions, ViewerProps, ViewerPropsBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Everything `App` needs to boot.
pub struct Launch {
    pub lang: Option<String>,
    pub config: Config,
    /// i18n key of a settings problem to report once the UI is up.
    pub config_warning: Option<String>,
    pub viewer: Lightbox,
}

impl std::fmt::Debug for Launch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Launch")
            .field("lang", &self.lang)
            .field("config_warning", &self.config_warning)
            .field("viewer", &self.viewer)
            .finish_non_exhaustive()
    }
}

impl Launch {
    /// Loads settings from the resolved config directory and builds the viewer.
    ///
    /// # Errors
    ///
    /// Fails when the manifest cannot be read or the props do not validate.
    pub fn prepare(flags: Flags) -> Result<Self> {
        let (config, config_warning) = config::load();
        Self::prepare_with_config(flags, config, config_warning)
    }

    /// Builds the viewer against an already loaded configuration.
    ///
    /// # Errors
    ///
    /// Fails when the manifest cannot be read or the props do not validate.
    pub fn prepare_with_config(
        flags: Flags,
        config: Config,
        config_warning: Option<String>,
    ) -> Result<Self> {
        let (builder, base_dir) = gallery_builder(&flags.inputs)?;
        let props = apply_overrides(builder, &flags)?
            .or_defaults(
                config.layout(),
                config.background(),
                config.max_image_width(),
            )
            .build()?;

        let file = match base_dir {
            Some(dir) => FileFetcher::with_base_dir(dir),
            None => FileFetcher::new(),
        };
        let fetcher = SourceFetcher::new(file, HttpFetcher::new());
        let options = ViewerOptions {
            lookahead: config.lookahead(),
            loading_grace: config.loading_grace(),
        };
        let viewer = Lightbox::new(props, Arc::new(fetcher), options)?;

        Ok(Self {
            lang: flags.lang,
            config,
            config_warning,
            viewer,
        })
    }
}

fn is_manifest(input: &str) -> bool {
    Path::new(input)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

/// Reads a single manifest argument, or treats every argument as an image.
/// Returns the directory relative sources are resolved against.
fn gallery_builder(inputs: &[String]) -> Result<(ViewerPropsBuilder, Option<PathBuf>)> {
    if let [single] = inputs {
        if is_manifest(single) {
            let path = Path::new(single);
            let content = fs::read_to_string(path)?;
            let builder = ViewerPropsBuilder::from_toml_str(&content)?;
            let base_dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map(Path::to_path_buf);
            debug!(manifest = %path.display(), ?builder, "read gallery manifest");
            return Ok((builder, base_dir));
        }
    }

    let images = inputs
        .iter()
        .map(|input| ImageDescriptor::new(input.as_str()))
        .collect();
    Ok((ViewerProps::builder(images), None))
}

fn apply_overrides(mut builder: ViewerPropsBuilder, flags: &Flags) -> Result<ViewerPropsBuilder> {
    if let Some(layout) = flags.layout.as_deref() {
        let mode = LayoutMode::parse(layout).ok_or_else(|| {
            ValidationError::new(
                "layout",
                "one of 'cover', 'contain' or 'auto'",
                format!("{layout:?}"),
            )
        })?;
        builder = builder.layout(mode);
    }
    if let Some(background) = flags.background.as_deref() {
        builder = builder.background(background);
    }
    if let Some(width) = flags.max_image_width {
        builder = builder.max_image_width(width);
    }
    if let Some(index) = flags.start_index {
        builder = builder.start_index(index);
    }
    Ok(builder)
}
