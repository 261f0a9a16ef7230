// SPDX-License-Identifier: MPL-2.0
//! Centralized icon module.
//!
//! Icons are small inline SVG documents. Handles are created once on first
//! access, cached in a `OnceLock`, and tinted at draw time through
//! [`styles::overlay::icon`](super::styles::overlay::icon).
//!
//! # Naming Convention
//!
//! Icons use generic visual names describing the icon's appearance,
//! not the action context (e.g., `cross` not `close_viewer`).

use crate::ui::design_tokens::{palette::WHITE, sizing};
use crate::ui::styles::overlay;
use iced::widget::svg::{Handle, Svg};
use iced::Length;
use std::sync::OnceLock;

/// Macro to define an icon function with a cached handle.
macro_rules! define_icon {
    ($name:ident, $body:literal, $doc:literal) => {
        #[doc = $doc]
        pub fn $name<'a>() -> Svg<'a> {
            static HANDLE: OnceLock<Handle> = OnceLock::new();
            let handle = HANDLE.get_or_init(|| {
                Handle::from_memory(concat!(
                    r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="black" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#,
                    $body,
                    "</svg>"
                ).as_bytes())
            });
            Svg::new(handle.clone())
        }
    };
}

define_icon!(
    chevron_left,
    r#"<polyline points="15 18 9 12 15 6"/>"#,
    "Chevron pointing left."
);
define_icon!(
    chevron_right,
    r#"<polyline points="9 18 15 12 9 6"/>"#,
    "Chevron pointing right."
);
define_icon!(
    cross,
    r#"<line x1="18" y1="6" x2="6" y2="18"/><line x1="6" y1="6" x2="18" y2="18"/>"#,
    "Diagonal cross."
);
define_icon!(
    corners_out,
    r#"<polyline points="15 3 21 3 21 9"/><polyline points="9 21 3 21 3 15"/><line x1="21" y1="3" x2="14" y2="10"/><line x1="3" y1="21" x2="10" y2="14"/>"#,
    "Arrows pointing out to opposite corners."
);
define_icon!(
    corners_in,
    r#"<polyline points="4 14 10 14 10 20"/><polyline points="20 10 14 10 14 4"/><line x1="14" y1="10" x2="21" y2="3"/><line x1="3" y1="21" x2="10" y2="14"/>"#,
    "Arrows pointing in from opposite corners."
);
define_icon!(
    frame_filled,
    r#"<rect x="3" y="3" width="18" height="18" rx="2"/><rect x="7" y="7" width="10" height="10" fill="black"/>"#,
    "Square frame with a filled centre."
);
define_icon!(
    frame_fitted,
    r#"<rect x="3" y="3" width="18" height="18" rx="2"/><rect x="7" y="9" width="10" height="6"/>"#,
    "Square frame with a letterboxed rectangle inside."
);

/// Sizes an icon for the overlay and tints it white.
pub fn overlay_icon(icon: Svg<'_>) -> Svg<'_> {
    icon.width(Length::Fixed(sizing::ICON_MD))
        .height(Length::Fixed(sizing::ICON_MD))
        .style(overlay::icon(WHITE))
}
