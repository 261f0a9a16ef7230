// SPDX-License-Identifier: MPL-2.0
//! Loading spinner drawn on a canvas.

use crate::ui::design_tokens::{motion, sizing};
use iced::widget::canvas::{self, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Theme};
use std::f32::consts::{PI, TAU};

/// Rotation of the spinner, advanced on every animation tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpinnerPhase(f32);

impl SpinnerPhase {
    /// Advances by one animation step, wrapping at a full turn.
    pub fn advance(&mut self) {
        self.0 = (self.0 + motion::SPINNER_STEP) % TAU;
    }

    #[must_use]
    pub fn radians(self) -> f32 {
        self.0
    }
}

/// Half-circle arc rotating over a faint full ring.
pub struct AnimatedSpinner {
    phase: SpinnerPhase,
    color: Color,
    size: f32,
}

impl AnimatedSpinner {
    #[must_use]
    pub fn new(color: Color, phase: SpinnerPhase) -> Self {
        Self {
            phase,
            color,
            size: sizing::ICON_XL,
        }
    }

    pub fn into_element<'a, Message: 'a>(self) -> iced::Element<'a, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let center = frame.center();
        let radius = frame.width().min(frame.height()) / 2.0 - 4.0;

        frame.stroke(
            &Path::circle(center, radius),
            Stroke::default().with_width(3.0).with_color(Color {
                a: 0.25,
                ..self.color
            }),
        );

        // -90° so the arc starts at the top
        let start = self.phase.radians() - PI / 2.0;
        let arc = Path::new(|builder| {
            let segments = 30;
            for i in 0..=segments {
                #[allow(clippy::cast_precision_loss)]
                let angle = start + PI * (i as f32 / segments as f32);
                let point = Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                );
                if i == 0 {
                    builder.move_to(point);
                } else {
                    builder.line_to(point);
                }
            }
        });

        frame.stroke(
            &arc,
            Stroke::default()
                .with_width(3.0)
                .with_color(self.color)
                .with_line_cap(canvas::LineCap::Round),
        );

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_wraps_after_full_turn() {
        let mut phase = SpinnerPhase::default();
        for _ in 0..1_000 {
            phase.advance();
            assert!(phase.radians() >= 0.0 && phase.radians() < TAU);
        }
    }
}
