// SPDX-License-Identifier: MPL-2.0
//! Lightbox viewer: full-window display of one image out of a gallery, with
//! previous/next navigation, a layout toggle, fullscreen and close controls.

pub mod component;
pub mod props;
mod view;

pub use component::{Effect, Lightbox, Message, Shortcut, ViewerOptions};
pub use props::{CloseCallback, ViewerProps, ViewerPropsBuilder};
pub use view::counter_label;
