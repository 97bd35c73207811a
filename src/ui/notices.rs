use std::time::Duration;

use iced::widget::{button, column, container, horizontal_space, row, text};
use iced::{Alignment, Color, Element, Length};

use crate::Message;

/// How long a banner stays up before it expires on its own
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Severity of a notification banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Failure,
}

/// A non-blocking notification banner
#[derive(Debug, Clone)]
pub struct Notice {
    pub id: usize,
    pub level: NoticeLevel,
    pub text: String,
}

/// The stack of active banners, newest last
pub fn notices(list: &[Notice]) -> Element<'_, Message> {
    column(list.iter().map(banner)).spacing(6).into()
}

fn banner(notice: &Notice) -> Element<'_, Message> {
    let level = notice.level;

    container(
        row![
            text(&notice.text).size(14),
            horizontal_space(),
            button(text("✕").size(12))
                .style(button::text)
                .padding(2)
                .on_press(Message::DismissNotice(notice.id)),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    )
    .padding([6.0, 10.0])
    .width(Length::Fill)
    .style(move |_theme| banner_style(level))
    .into()
}

fn banner_style(level: NoticeLevel) -> container::Style {
    let background = match level {
        NoticeLevel::Info => Color::from_rgb8(0x1f, 0x6f, 0x43),
        NoticeLevel::Warning => Color::from_rgb8(0x8a, 0x6d, 0x1a),
        NoticeLevel::Failure => Color::from_rgb8(0x8c, 0x2f, 0x39),
    };

    container::Style {
        background: Some(background.into()),
        text_color: Some(Color::WHITE),
        border: iced::border::rounded(4.0),
        ..container::Style::default()
    }
}
