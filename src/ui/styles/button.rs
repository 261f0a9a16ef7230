// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{BLACK, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Style for toolbar buttons (fullscreen, layout, close).
///
/// Transparent at rest, a dark disc on hover.
pub fn control(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = match status {
        button::Status::Hovered => opacity::OVERLAY_MEDIUM,
        button::Status::Pressed => opacity::OVERLAY_STRONG,
        _ => opacity::TRANSPARENT,
    };

    button::Style {
        background: Some(Background::Color(Color { a: alpha, ..BLACK })),
        text_color: WHITE,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: radius::FULL.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Style for the previous/next buttons.
///
/// A disabled button stays in place but fades out.
pub fn navigation(_theme: &Theme, status: button::Status) -> button::Style {
    let (alpha, text_alpha) = match status {
        button::Status::Hovered => (opacity::OVERLAY_HOVER, opacity::OPAQUE),
        button::Status::Pressed => (opacity::OVERLAY_PRESSED, opacity::OPAQUE),
        button::Status::Disabled => (opacity::OVERLAY_SUBTLE, opacity::DISABLED),
        button::Status::Active => (opacity::OVERLAY_MEDIUM, opacity::OPAQUE),
    };

    button::Style {
        background: Some(Background::Color(Color { a: alpha, ..BLACK })),
        text_color: Color {
            a: text_alpha,
            ..WHITE
        },
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: radius::MD.into(),
        },
        shadow: if matches!(status, button::Status::Disabled) {
            shadow::NONE
        } else {
            shadow::MD
        },
        snap: true,
    }
}
