// SPDX-License-Identifier: MPL-2.0
//! Image fetching port definition.
//!
//! An [`ImageFetcher`] resolves an image source (a path, `file://` URL or
//! `http(s)://` URL) into decoded pixels. Implementations are blocking; the UI
//! runs them on a worker thread.

use crate::domain::image::RawImage;
use crate::error::Error;
use std::fmt;

/// Errors that can occur while fetching an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The source does not exist.
    NotFound(String),

    /// The source could not be read.
    Io(String),

    /// A remote source could not be retrieved.
    Network(String),

    /// The bytes were retrieved but could not be decoded.
    Decode(String),

    /// The source scheme is not handled by this fetcher.
    Unsupported(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NotFound(source) => write!(f, "Image not found: {source}"),
            FetchError::Io(msg) => write!(f, "I/O error: {msg}"),
            FetchError::Network(msg) => write!(f, "Network error: {msg}"),
            FetchError::Decode(msg) => write!(f, "Cannot decode image: {msg}"),
            FetchError::Unsupported(source) => write!(f, "Unsupported image source: {source}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<Error> for FetchError {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(msg) => FetchError::Io(msg),
            Error::Fetch(msg) => FetchError::Network(msg),
            Error::Image(msg) | Error::Svg(msg) => FetchError::Decode(msg),
            other => FetchError::Io(other.to_string()),
        }
    }
}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        Error::Fetch(err.to_string())
    }
}

/// Trait for fetching and decoding images.
///
/// # Example
///
/// ```ignore
/// use iced_lightbox::application::port::ImageFetcher;
///
/// fn dimensions(fetcher: &dyn ImageFetcher, source: &str) -> Option<(u32, u32)> {
///     let image = fetcher.fetch(source).ok()?;
///     Some((image.width(), image.height()))
/// }
/// ```
pub trait ImageFetcher: Send + Sync {
    /// Fetches and decodes `source`.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] describing why the image is unavailable.
    fn fetch(&self, source: &str) -> Result<RawImage, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_source() {
        let err = FetchError::NotFound("cat.jpg".into());
        assert_eq!(err.to_string(), "Image not found: cat.jpg");
    }

    #[test]
    fn decode_errors_map_from_crate_errors() {
        let err: FetchError = Error::Svg("bad path data".into()).into();
        assert_eq!(err, FetchError::Decode("bad path data".into()));

        let err: FetchError = Error::Io("denied".into()).into();
        assert_eq!(err, FetchError::Io("denied".into()));
    }

    #[test]
    fn converts_into_crate_fetch_error() {
        let err: Error = FetchError::Network("timeout".into()).into();
        assert!(matches!(err, Error::Fetch(ref msg) if msg.contains("timeout")));
    }
}
