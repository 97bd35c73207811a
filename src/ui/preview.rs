use iced::widget::{
    button, center, column, container, horizontal_space, image, mouse_area, opaque, row, stack,
    text,
};
use iced::{Alignment, Color, ContentFit, Element, Length};

use crate::state::data::ImageCard;
use crate::Message;

const OVERLAY_MAX_WIDTH: f32 = 960.0;

/// Layer the preview overlay above the gallery.
///
/// The outer mouse area covers the whole backdrop and dismisses the
/// overlay on press; the inner opaque region swallows presses on the
/// content itself, so only clicks landing exactly on the backdrop close it.
pub fn with_overlay<'a>(
    base: Element<'a, Message>,
    overlay: Element<'a, Message>,
) -> Element<'a, Message> {
    stack![
        base,
        opaque(
            mouse_area(center(opaque(overlay)).style(|_theme| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.85,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(Message::ClosePreview)
        )
    ]
    .into()
}

/// The overlay content for the selected card: the full-resolution image
/// (or a placeholder until its download settles), the tags, attribution,
/// and the save/close actions
pub fn overlay_content<'a>(
    card: &'a ImageCard,
    picture: Option<&image::Handle>,
) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match picture {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into(),
        None => container(text("Loading full resolution…").size(16))
            .width(Length::Fill)
            .height(Length::Fixed(320.0))
            .center_x(Length::Fill)
            .center_y(Length::Fixed(320.0))
            .into(),
    };

    let caption = row![text(&card.tags).size(16), horizontal_space()]
        .push(text(format!("♥ {}", card.likes)).size(14))
        .push_maybe(
            (!card.user.is_empty()).then(|| text(format!("by {}", card.user)).size(14)),
        )
        .spacing(12)
        .align_y(Alignment::Center);

    let actions = row![
        button(text("Save"))
            .on_press(Message::SaveImage(card.id))
            .padding([6.0, 14.0]),
        button(text("Close"))
            .style(button::secondary)
            .on_press(Message::ClosePreview)
            .padding([6.0, 14.0]),
    ]
    .spacing(8);

    container(
        column![picture, caption, actions]
            .spacing(12)
            .align_x(Alignment::Center),
    )
    .padding(16)
    .max_width(OVERLAY_MAX_WIDTH)
    .style(container::rounded_box)
    .into()
}
