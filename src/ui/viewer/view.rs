// SPDX-License-Identifier: MPL-2.0
//! Rendering of the lightbox.

use crate::application::navigation::DisplayStatus;
use crate::domain::gallery::{
    BackgroundColor, Direction, Fit, ImageDescriptor, MaxImageWidth, SizeHint,
};
use crate::i18n::fluent::I18n;
use crate::media::ImageData;
use crate::ui::design_tokens::{palette, radius, sizing, spacing, typography};
use crate::ui::icons;
use crate::ui::styles::{button as button_style, overlay};
use crate::ui::viewer::component::Message;
use crate::ui::widgets::{AnimatedSpinner, SpinnerPhase};
use iced::widget::{button, column, container, row, text, tooltip, Column, Image};
use iced::{Alignment, ContentFit, Element, Length, Size};

/// Everything the view needs from the component, borrowed for one frame.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub descriptor: &'a ImageDescriptor,
    pub image: Option<&'a ImageData>,
    pub status: &'a DisplayStatus,
    pub loading: bool,
    pub index: usize,
    pub count: usize,
    pub at_first: bool,
    pub at_last: bool,
    pub fit: Fit,
    pub max_image_width: MaxImageWidth,
    pub background: BackgroundColor,
    pub fullscreen_available: bool,
    pub fullscreen_active: bool,
    pub spinner: SpinnerPhase,
    pub fade: f32,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let previous = nav_button(
        icons::chevron_left(),
        ctx.i18n.tr("viewer-previous"),
        (!ctx.at_first).then_some(Message::Navigate(Direction::Previous)),
    );
    let next = nav_button(
        icons::chevron_right(),
        ctx.i18n.tr("viewer-next"),
        (!ctx.at_last).then_some(Message::Navigate(Direction::Next)),
    );

    let stage = row![previous, stage(&ctx), next]
        .spacing(spacing::XS)
        .padding([0.0, spacing::XS])
        .align_y(Alignment::Center)
        .height(Length::Fill);

    let mut layers = Column::new()
        .push(toolbar(&ctx))
        .push(stage)
        .width(Length::Fill)
        .height(Length::Fill);

    if let Some(caption) = caption_bar(&ctx) {
        layers = layers.push(caption);
    }

    container(layers)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(overlay::backdrop(ctx.background, ctx.fade))
        .into()
}

/// Position label such as `3 / 12`.
#[must_use]
pub fn counter_label(i18n: &I18n, index: usize, count: usize) -> String {
    let current = (index + 1).to_string();
    let total = count.to_string();
    i18n.tr_with_args("viewer-counter", &[("current", &current), ("total", &total)])
}

/// Maximum displayed width. Only a contained image is limited.
#[must_use]
pub fn width_limit(fit: Fit, max_image_width: MaxImageWidth) -> Option<f32> {
    match fit {
        #[allow(clippy::cast_precision_loss)]
        Fit::Contain => Some(max_image_width.value() as f32),
        Fit::Cover => None,
    }
}

/// Space kept free for an image that is still loading, so the layout does
/// not jump once it arrives.
#[must_use]
pub fn reserved_size(hint: SizeHint, limit: Option<f32>) -> Size {
    #[allow(clippy::cast_precision_loss)]
    let natural = hint.width as f32;
    let width = limit.map_or(natural, |limit| natural.min(limit));
    Size::new(width, width / hint.aspect_ratio())
}

fn toolbar<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let counter = container(
        text(counter_label(ctx.i18n, ctx.index, ctx.count)).size(typography::BODY_SM),
    )
    .padding([spacing::XXS, spacing::XS])
    .style(overlay::indicator(radius::FULL));

    let (layout_icon, layout_label) = match ctx.fit {
        Fit::Cover => (icons::frame_fitted(), "viewer-layout-contain"),
        Fit::Contain => (icons::frame_filled(), "viewer-layout-cover"),
    };

    let mut controls = row![].spacing(spacing::XXS).align_y(Alignment::Center);
    controls = controls.push(control_button(
        layout_icon,
        ctx.i18n.tr(layout_label),
        Message::ToggleLayout,
    ));

    if ctx.fullscreen_available {
        let (icon, label) = if ctx.fullscreen_active {
            (icons::corners_in(), "viewer-fullscreen-exit")
        } else {
            (icons::corners_out(), "viewer-fullscreen-enter")
        };
        controls = controls.push(control_button(
            icon,
            ctx.i18n.tr(label),
            Message::ToggleFullscreen,
        ));
    }

    controls = controls.push(control_button(
        icons::cross(),
        ctx.i18n.tr("viewer-close"),
        Message::ClosePressed,
    ));

    row![container(counter).width(Length::Fill), controls]
        .align_y(Alignment::Center)
        .padding(spacing::SM)
        .into()
}

fn stage<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let limit = width_limit(ctx.fit, ctx.max_image_width);

    let content: Element<'a, Message> = match (ctx.image, ctx.status) {
        (Some(image), _) => {
            let fit = match ctx.fit {
                Fit::Cover => ContentFit::Cover,
                Fit::Contain => ContentFit::Contain,
            };
            Image::new(image.handle.clone())
                .content_fit(fit)
                .opacity(ctx.fade)
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        }
        (None, DisplayStatus::Failed(_)) => text(ctx.i18n.tr("viewer-load-error"))
            .size(typography::BODY)
            .color(palette::GRAY_200)
            .into(),
        (None, _) => placeholder(ctx, limit),
    };

    let mut frame = container(content).center(Length::Fill);
    if let Some(limit) = limit {
        frame = frame.max_width(limit);
    }

    container(frame).center(Length::Fill).into()
}

fn placeholder<'a>(ctx: &ViewContext<'a>, limit: Option<f32>) -> Element<'a, Message> {
    let indicator: Element<'a, Message> = if ctx.loading {
        column![
            AnimatedSpinner::new(palette::WHITE, ctx.spinner).into_element(),
            text(ctx.i18n.tr("viewer-loading"))
                .size(typography::BODY_SM)
                .color(palette::GRAY_200),
        ]
        .spacing(spacing::XS)
        .align_x(Alignment::Center)
        .into()
    } else {
        Column::new().into()
    };

    match ctx.descriptor.size_hint() {
        Some(hint) => {
            let size = reserved_size(hint, limit);
            container(indicator)
                .width(Length::Fixed(size.width))
                .height(Length::Fixed(size.height))
                .center_x(Length::Fixed(size.width))
                .center_y(Length::Fixed(size.height))
                .into()
        }
        None => indicator,
    }
}

fn caption_bar<'a>(ctx: &ViewContext<'a>) -> Option<Element<'a, Message>> {
    let caption = ctx.descriptor.caption();
    let copyright = ctx.descriptor.copyright();
    if caption.is_none() && copyright.is_none() {
        return None;
    }

    let mut lines = Column::new()
        .spacing(spacing::XXS)
        .align_x(Alignment::Center);
    if let Some(caption) = caption {
        lines = lines.push(text(caption).size(typography::BODY));
    }
    if let Some(holder) = copyright {
        lines = lines.push(
            text(ctx.i18n.tr_with_args("viewer-copyright", &[("holder", holder)]))
                .size(typography::CAPTION)
                .color(palette::GRAY_200),
        );
    }

    Some(
        container(lines)
            .width(Length::Fill)
            .padding(spacing::SM)
            .center_x(Length::Fill)
            .style(overlay::caption_bar)
            .into(),
    )
}

fn nav_button<'a>(
    icon: iced::widget::Svg<'a>,
    label: String,
    on_press: Option<Message>,
) -> Element<'a, Message> {
    let button = button(container(icons::overlay_icon(icon)).center(Length::Fill))
        .width(Length::Fixed(sizing::CONTROL_BUTTON))
        .height(Length::Fixed(sizing::CONTROL_BUTTON * 2.0))
        .style(button_style::navigation)
        .on_press_maybe(on_press);

    with_tooltip(button.into(), label)
}

fn control_button<'a>(
    icon: iced::widget::Svg<'a>,
    label: String,
    on_press: Message,
) -> Element<'a, Message> {
    let button = button(container(icons::overlay_icon(icon)).center(Length::Fill))
        .width(Length::Fixed(sizing::CONTROL_BUTTON))
        .height(Length::Fixed(sizing::CONTROL_BUTTON))
        .style(button_style::control)
        .on_press(on_press);

    with_tooltip(button.into(), label)
}

fn with_tooltip<'a>(content: Element<'a, Message>, label: String) -> Element<'a, Message> {
    tooltip(
        content,
        container(text(label).size(typography::BODY_SM))
            .padding([spacing::XXS, spacing::XS])
            .style(overlay::indicator(radius::SM)),
        tooltip::Position::Bottom,
    )
    .into()
}
