// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//!
//! # Available Ports
//!
//! - [`fetch`]: Turning an image source into decoded pixels
//! - [`fullscreen`]: Querying and changing the host's fullscreen state
//!
//! # Design Notes
//!
//! - Traits are `Send + Sync` where appropriate for thread-safe usage
//! - Methods return `Result` with port-specific error types
//! - No `async fn` - use Iced's `Task` return type pattern in callers

pub mod fetch;
pub mod fullscreen;

pub use fetch::{FetchError, ImageFetcher};
pub use fullscreen::FullscreenCapability;
