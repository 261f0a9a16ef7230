// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! The lightbox follows the Elm-style "state down, messages up" pattern: the
//! [`viewer`] component owns its state, emits messages and reports effects to
//! the application shell.
//!
//! # Shared Infrastructure
//!
//! - [`widgets`] - Custom Iced widgets (loading spinner)
//! - [`styles`] - Centralized styling (buttons, overlays)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing, motion)
//! - [`icons`] - Inline SVG icons

pub mod design_tokens;
pub mod icons;
pub mod styles;
pub mod viewer;
pub mod widgets;
