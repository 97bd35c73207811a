use std::collections::HashMap;

use iced::widget::{button, container, image, text};
use iced::{ContentFit, Element, Length};
use iced_aw::Wrap;

use crate::state::data::ImageCard;
use crate::Message;

/// Rendered size of one gallery tile
const TILE_WIDTH: f32 = 260.0;
const TILE_HEIGHT: f32 = 175.0;

/// The responsive thumbnail grid. Tiles wrap to the window width; cards
/// whose thumbnail is still downloading render as placeholders.
pub fn gallery<'a>(
    cards: &'a [ImageCard],
    thumbs: &HashMap<u64, image::Handle>,
) -> Element<'a, Message> {
    let tiles = cards
        .iter()
        .map(|card| tile(card, thumbs.get(&card.id)))
        .collect();

    Wrap::with_elements(tiles)
        .spacing(10.0)
        .line_spacing(10.0)
        .into()
}

/// A single clickable tile
fn tile<'a>(card: &'a ImageCard, thumb: Option<&image::Handle>) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match thumb {
        Some(handle) => image(handle.clone())
            .width(Length::Fixed(TILE_WIDTH))
            .height(Length::Fixed(TILE_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(text("Loading…").size(14))
            .width(Length::Fixed(TILE_WIDTH))
            .height(Length::Fixed(TILE_HEIGHT))
            .center_x(Length::Fixed(TILE_WIDTH))
            .center_y(Length::Fixed(TILE_HEIGHT))
            .style(container::rounded_box)
            .into(),
    };

    button(picture)
        .padding(0)
        .style(button::text)
        .on_press(Message::OpenPreview(card.id))
        .into()
}
