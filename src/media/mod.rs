// SPDX-License-Identifier: MPL-2.0
//! Image data, decoding and the session-scoped preload cache.

pub mod image;
pub mod preload;

pub use image::{decode_bytes, ImageData};
pub use preload::{PreloadCache, PreloadConfig, PreloadStats};
