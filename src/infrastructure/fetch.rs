// SPDX-License-Identifier: MPL-2.0
//! Adapters implementing the [`ImageFetcher`] port.
//!
//! - [`FileFetcher`] reads local paths and `file://` URLs
//! - [`HttpFetcher`] downloads `http://` and `https://` URLs
//! - [`SourceFetcher`] dispatches between the two by [`SourceKind`]
//!
//! All fetchers block; callers run them through `tokio::task::spawn_blocking`.

use crate::application::port::{FetchError, ImageFetcher};
use crate::domain::image::RawImage;
use crate::media::image::decode_bytes;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("IcedLightbox/", env!("CARGO_PKG_VERSION"));
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// How an image source string should be retrieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    File,
    Http,
    Unsupported,
}

impl SourceKind {
    /// Classifies a source by its URL scheme. Strings without a scheme are
    /// file paths.
    #[must_use]
    pub fn classify(source: &str) -> Self {
        let lower = source.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return SourceKind::Http;
        }
        if lower.starts_with("file://") {
            return SourceKind::File;
        }
        match lower.split_once("://") {
            Some(_) => SourceKind::Unsupported,
            None => SourceKind::File,
        }
    }
}

/// Reads images from the local filesystem.
///
/// Relative paths are resolved against `base_dir` (typically the directory of
/// the gallery manifest) when one is set.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    base_dir: Option<PathBuf>,
}

impl FileFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    /// Filesystem path a source refers to.
    #[must_use]
    pub fn resolve(&self, source: &str) -> PathBuf {
        let raw = source
            .strip_prefix("file://")
            .or_else(|| source.strip_prefix("FILE://"))
            .unwrap_or(source);
        let path = Path::new(raw);

        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ImageFetcher for FileFetcher {
    fn fetch(&self, source: &str) -> Result<RawImage, FetchError> {
        let path = self.resolve(source);
        let bytes = std::fs::read(&path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => FetchError::NotFound(source.to_string()),
            _ => FetchError::Io(err.to_string()),
        })?;

        debug!(path = %path.display(), bytes = bytes.len(), "read image file");
        decode_bytes(&bytes, source).map_err(FetchError::from)
    }
}

/// Downloads images over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    timeout: Duration,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self {
            timeout: HTTP_TIMEOUT,
        }
    }
}

impl HttpFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl ImageFetcher for HttpFetcher {
    fn fetch(&self, source: &str) -> Result<RawImage, FetchError> {
        // The blocking client owns its own runtime, so it is created on the
        // calling worker thread rather than stored.
        let client = reqwest::blocking::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let response = client
            .get(source)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(source.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Network(format!("HTTP status: {status}")));
        }

        let bytes = response
            .bytes()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        debug!(source, bytes = bytes.len(), "downloaded image");
        decode_bytes(&bytes, source).map_err(FetchError::from)
    }
}

/// Fetches any supported source by dispatching on its scheme.
#[derive(Debug, Clone, Default)]
pub struct SourceFetcher {
    file: FileFetcher,
    http: HttpFetcher,
}

impl SourceFetcher {
    #[must_use]
    pub fn new(file: FileFetcher, http: HttpFetcher) -> Self {
        Self { file, http }
    }
}

impl ImageFetcher for SourceFetcher {
    fn fetch(&self, source: &str) -> Result<RawImage, FetchError> {
        match SourceKind::classify(source) {
            SourceKind::File => self.file.fetch(source),
            SourceKind::Http => self.http.fetch(source),
            SourceKind::Unsupported => Err(FetchError::Unsupported(source.to_string())),
        }
    }
}
