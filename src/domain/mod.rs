// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core lightbox types with ZERO external dependencies.
//!
//! This module contains pure value objects and rules: what an image in the
//! gallery looks like, how layout modes resolve against a viewport, and the
//! bounded numeric settings the viewer works with.
//!
//! # Modules
//!
//! - [`gallery`]: Gallery types ([`ImageDescriptor`](gallery::ImageDescriptor),
//!   [`SrcSet`](gallery::SrcSet), [`LayoutMode`](gallery::LayoutMode),
//!   [`Viewport`](gallery::Viewport), [`BackgroundColor`](gallery::BackgroundColor))
//! - [`image`]: Decoded pixel data ([`RawImage`](image::RawImage))

pub mod gallery;
pub mod image;
