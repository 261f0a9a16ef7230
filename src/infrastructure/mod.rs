// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`fetch`]: Filesystem and HTTP image fetching (implements [`ImageFetcher`])
//! - [`fullscreen`]: Iced window and headless fullscreen (implements
//!   [`FullscreenCapability`])
//!
//! [`ImageFetcher`]: crate::application::port::ImageFetcher
//! [`FullscreenCapability`]: crate::application::port::FullscreenCapability

pub mod fetch;
pub mod fullscreen;

// Re-export main types for convenience
pub use fetch::{FileFetcher, HttpFetcher, SourceFetcher, SourceKind};
pub use fullscreen::{HeadlessFullscreen, HeadlessOutcome, WindowFullscreen};
