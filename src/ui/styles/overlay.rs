// SPDX-License-Identifier: MPL-2.0
//! Overlay styles for the backdrop, position counter and caption bar.

use crate::domain::gallery::BackgroundColor;
use crate::ui::design_tokens::{
    opacity,
    palette::{BLACK, WHITE},
};
use iced::widget::{container, svg};
use iced::{Background, Border, Color, Theme};

/// Converts a configured background into an Iced color, scaled by `fade`
/// (1.0 fully shown, 0.0 gone).
#[must_use]
pub fn backdrop_color(background: BackgroundColor, fade: f32) -> Color {
    Color::from_rgba(
        background.r,
        background.g,
        background.b,
        background.a * fade.clamp(0.0, 1.0),
    )
}

/// Full-window backdrop behind the image.
pub fn backdrop(background: BackgroundColor, fade: f32) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(backdrop_color(background, fade))),
        text_color: Some(WHITE),
        ..Default::default()
    }
}

/// Generic style for overlay indicators like the position counter.
pub fn indicator(rad: f32) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_STRONG,
            ..BLACK
        })),
        text_color: Some(WHITE),
        border: Border {
            color: Color {
                a: opacity::OVERLAY_SUBTLE,
                ..WHITE
            },
            width: 1.0,
            radius: rad.into(),
        },
        ..Default::default()
    }
}

/// Style for the caption bar under the image.
#[must_use]
pub fn caption_bar(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..BLACK
        })),
        text_color: Some(WHITE),
        ..Default::default()
    }
}

/// Style for SVG icons drawn on the overlay.
pub fn icon(color: Color) -> impl Fn(&Theme, svg::Status) -> svg::Style {
    move |_theme: &Theme, _status: svg::Status| svg::Style { color: Some(color) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backdrop_fades_alpha_only() {
        let background = BackgroundColor::rgba(0.1, 0.2, 0.3, 0.8);
        let color = backdrop_color(background, 0.5);
        assert!((color.a - 0.4).abs() < f32::EPSILON);
        assert!((color.r - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn fade_is_clamped() {
        let color = backdrop_color(BackgroundColor::BLACK, 3.0);
        assert!((color.a - 1.0).abs() < f32::EPSILON);
    }
}
