use iced::widget::{button, row, text, text_input};
use iced::{Alignment, Element};

use crate::Message;

/// The search input row at the top of the window
pub fn searchbar(input: &str) -> Element<'_, Message> {
    row![
        text_input("Search free images, e.g. \"sunset beach\"", input)
            .on_input(Message::QueryChanged)
            .on_submit(Message::QuerySubmitted)
            .padding(10)
            .size(16),
        button(text("Search"))
            .on_press(Message::QuerySubmitted)
            .padding(10),
    ]
    .spacing(8)
    .into()
}

/// One-click chips for the most recent searches, shown while the gallery
/// is empty
pub fn recent_row(recent: &[String]) -> Element<'_, Message> {
    let label: Element<'_, Message> = text("Recent:").size(14).into();

    let chips = recent.iter().map(|query| {
        button(text(query.as_str()).size(14))
            .style(button::secondary)
            .padding([4.0, 10.0])
            .on_press(Message::RecallQuery(query.clone()))
            .into()
    });

    row(std::iter::once(label).chain(chips))
        .spacing(8)
        .align_y(Alignment::Center)
        .into()
}
