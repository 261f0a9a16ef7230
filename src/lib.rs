// SPDX-License-Identifier: MPL-2.0
//! `iced_lightbox` is a full-window image gallery viewer built with the Iced GUI
//! framework.
//!
//! It shows one image of a gallery at a time with previous/next navigation,
//! preloads the images around the current one, and offers fullscreen and
//! cover/contain layout toggles. Text is localized with Fluent.
//!
//! # Layers
//!
//! - [`domain`] - Pure gallery types (descriptors, layout modes, newtypes)
//! - [`application`] - Navigation sequencing and the ports it depends on
//! - [`infrastructure`] - File/HTTP fetchers and window fullscreen adapters
//! - [`media`] - Image decoding and the preload cache
//! - [`ui`] - The lightbox component, styles and widgets
//! - [`app`] - Iced application shell, configuration and paths

pub mod app;
pub mod application;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod media;
pub mod ui;

pub use app::config;
