use iced::keyboard;
use iced::widget::{button, column, container, image, scrollable, text};
use iced::{Alignment, Element, Length, Size, Subscription, Task, Theme};
use rfd::FileDialog;
use std::collections::HashMap;
use std::path::PathBuf;

// Declare the application modules
mod api;
mod config;
mod state;
mod ui;

use api::cache;
use api::client::{ApiError, PixabayClient};
use config::Config;
use state::data::SearchPage;
use state::history::{SearchHistory, RECENT_LIMIT};
use state::overlay::Preview;
use state::session::{PageRequest, Resolution, SearchSession};
use ui::notices::{Notice, NoticeLevel, NOTICE_TTL};

/// A downloaded full-resolution image: the decoded handle for display
/// plus the raw bytes for saving to disk
#[derive(Debug, Clone)]
struct FullImage {
    handle: image::Handle,
    bytes: Vec<u8>,
}

/// Main application state
struct PixSeek {
    /// The query/pagination state machine
    session: SearchSession,
    /// The modal preview state
    preview: Preview,
    /// Recent-search store
    history: SearchHistory,
    /// Cached recent queries, newest first
    recent: Vec<String>,
    /// Pixabay client shared by all fetch tasks
    client: PixabayClient,
    /// Live contents of the search input
    input: String,
    /// Downloaded grid thumbnails by card ID
    thumbs: HashMap<u64, image::Handle>,
    /// Downloaded full-resolution images by card ID
    full_images: HashMap<u64, FullImage>,
    /// Active notification banners
    notices: Vec<Notice>,
    next_notice_id: usize,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// The search input changed
    QueryChanged(String),
    /// The search form was submitted
    QuerySubmitted,
    /// A recent-search chip was clicked
    RecallQuery(String),
    /// The "Load more" button was clicked
    LoadMore,
    /// A page fetch settled; the stamp identifies its fetch cycle
    PageFetched(u64, Result<SearchPage, ApiError>),
    /// A grid thumbnail download settled
    ThumbnailFetched(u64, Result<Vec<u8>, ApiError>),
    /// A full-resolution download settled
    FullImageFetched(u64, Result<Vec<u8>, ApiError>),
    /// A gallery tile was clicked
    OpenPreview(u64),
    /// Escape, a backdrop click, or the close button
    ClosePreview,
    /// The save button in the overlay was clicked
    SaveImage(u64),
    /// The background disk write settled
    ImageSaved(Result<PathBuf, String>),
    /// A banner's dismiss button was clicked
    DismissNotice(usize),
    /// A banner reached its time-to-live
    NoticeExpired(usize),
}

impl PixSeek {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = match Config::load() {
            Ok(config) => config,
            Err(message) => {
                eprintln!("❌ {}", message);
                std::process::exit(1);
            }
        };

        let history = match SearchHistory::open_default() {
            Ok(history) => history,
            Err(error) => {
                eprintln!(
                    "⚠️  Could not open the search history ({}), continuing without persistence",
                    error
                );
                SearchHistory::in_memory().expect("Failed to open in-memory search history")
            }
        };

        let remembered = history.query_count().unwrap_or(0);
        println!("🔍 PixSeek ready, {} remembered searches", remembered);

        let recent = history.recent(RECENT_LIMIT).unwrap_or_default();

        (
            PixSeek {
                session: SearchSession::new(config.per_page),
                preview: Preview::new(),
                history,
                recent,
                client: PixabayClient::new(config.api_key, config.endpoint),
                input: String::new(),
                thumbs: HashMap::new(),
                full_images: HashMap::new(),
                notices: Vec::new(),
                next_notice_id: 0,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::QueryChanged(value) => {
                self.input = value;
                Task::none()
            }
            Message::QuerySubmitted => {
                let query = self.input.trim().to_string();
                if query.is_empty() {
                    return self
                        .push_notice(NoticeLevel::Warning, "Type something to search for.");
                }
                self.submit(query)
            }
            Message::RecallQuery(query) => {
                self.input = query.clone();
                self.submit(query)
            }
            Message::LoadMore => {
                let request = self.session.load_next_page();
                self.dispatch(request)
            }
            Message::PageFetched(generation, result) => {
                match self.session.resolve(generation, result) {
                    Resolution::Appended { added } => self.fetch_new_thumbnails(added),
                    Resolution::Empty => self.push_notice(
                        NoticeLevel::Warning,
                        "Sorry, there are no images matching your search query. Please try again.",
                    ),
                    Resolution::Failed(error) => self.push_notice(
                        NoticeLevel::Failure,
                        format!("Something went wrong: {}", error),
                    ),
                    Resolution::Stale => Task::none(),
                }
            }
            Message::ThumbnailFetched(id, Ok(bytes)) => {
                self.thumbs.insert(id, image::Handle::from_bytes(bytes));
                Task::none()
            }
            Message::ThumbnailFetched(id, Err(error)) => {
                // A missing thumbnail is cosmetic; no banner for it
                eprintln!("⚠️  Thumbnail {} failed: {}", id, error);
                Task::none()
            }
            Message::OpenPreview(id) => {
                let Some(card) = self.session.card(id).cloned() else {
                    return Task::none();
                };
                let url = card.large_image_url.clone();
                self.preview.open(card);

                if self.full_images.contains_key(&id) {
                    return Task::none();
                }

                let client = self.client.clone();
                Task::perform(async move { client.fetch_bytes(url).await }, move |result| {
                    Message::FullImageFetched(id, result)
                })
            }
            Message::FullImageFetched(id, Ok(bytes)) => {
                let full = FullImage {
                    handle: image::Handle::from_bytes(bytes.clone()),
                    bytes,
                };
                self.full_images.insert(id, full);
                Task::none()
            }
            Message::FullImageFetched(id, Err(error)) => {
                eprintln!("⚠️  Full image {} failed: {}", id, error);
                self.push_notice(
                    NoticeLevel::Failure,
                    format!("Could not load the full-size image: {}", error),
                )
            }
            Message::ClosePreview => {
                self.preview.close();
                Task::none()
            }
            Message::SaveImage(id) => self.save_image(id),
            Message::ImageSaved(Ok(path)) => {
                self.push_notice(NoticeLevel::Info, format!("Saved to {}", path.display()))
            }
            Message::ImageSaved(Err(error)) => self.push_notice(
                NoticeLevel::Failure,
                format!("Could not save the image: {}", error),
            ),
            Message::DismissNotice(id) | Message::NoticeExpired(id) => {
                self.notices.retain(|notice| notice.id != id);
                Task::none()
            }
        }
    }

    /// Run a submitted query through the session, remembering it when it
    /// actually starts a new search
    fn submit(&mut self, query: String) -> Task<Message> {
        match self.session.submit_query(&query) {
            Some(request) => {
                if let Err(error) = self.history.record(&query) {
                    eprintln!("⚠️  Could not record the search: {}", error);
                }
                self.recent = self.history.recent(RECENT_LIMIT).unwrap_or_default();
                self.dispatch(request)
            }
            // Same query as before: nothing to do
            None => Task::none(),
        }
    }

    /// Turn a page request into the actual network task
    fn dispatch(&self, request: PageRequest) -> Task<Message> {
        let client = self.client.clone();
        let generation = request.generation;

        Task::perform(
            async move {
                client
                    .fetch_page(request.query, request.page, request.per_page)
                    .await
            },
            move |result| Message::PageFetched(generation, result),
        )
    }

    /// Start thumbnail downloads for the cards just appended to the session
    fn fetch_new_thumbnails(&self, added: usize) -> Task<Message> {
        let tasks: Vec<Task<Message>> = self
            .session
            .cards()
            .iter()
            .rev()
            .take(added)
            .filter(|card| !self.thumbs.contains_key(&card.id))
            .map(|card| {
                let id = card.id;
                let url = card.webformat_url.clone();
                Task::perform(
                    cache::fetch_thumbnail(self.client.clone(), id, url),
                    move |result| Message::ThumbnailFetched(id, result),
                )
            })
            .collect();

        Task::batch(tasks)
    }

    /// Ask where to save the selected image, then write it in the background
    fn save_image(&mut self, id: u64) -> Task<Message> {
        let full = match self.full_images.get(&id) {
            Some(full) => full,
            None => {
                return self.push_notice(
                    NoticeLevel::Warning,
                    "The full-size image hasn't finished loading yet.",
                );
            }
        };

        // Show the native save dialog
        let picked = FileDialog::new()
            .set_title("Save image")
            .set_file_name(format!("pixabay-{}.jpg", id))
            .save_file();

        let Some(path) = picked else {
            return Task::none();
        };

        let bytes = full.bytes.clone();
        Task::perform(
            async move {
                tokio::fs::write(&path, bytes)
                    .await
                    .map(|_| path)
                    .map_err(|error| error.to_string())
            },
            Message::ImageSaved,
        )
    }

    /// Queue a notification banner and schedule its expiry
    fn push_notice(&mut self, level: NoticeLevel, text: impl Into<String>) -> Task<Message> {
        let id = self.next_notice_id;
        self.next_notice_id += 1;
        self.notices.push(Notice {
            id,
            level,
            text: text.into(),
        });

        Task::perform(async { tokio::time::sleep(NOTICE_TTL).await }, move |_| {
            Message::NoticeExpired(id)
        })
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let mut content = column![ui::searchbar::searchbar(&self.input)]
            .spacing(16)
            .padding(20)
            .align_x(Alignment::Center);

        if !self.notices.is_empty() {
            content = content.push(ui::notices::notices(&self.notices));
        }

        // Offer recent searches while there is nothing else to show
        if self.session.cards().is_empty()
            && !self.session.is_loading()
            && !self.recent.is_empty()
        {
            content = content.push(ui::searchbar::recent_row(&self.recent));
        }

        if !self.session.cards().is_empty() {
            // total_hits is reset for the duration of a fetch, so the
            // summary only makes sense while the session is settled
            if !self.session.is_loading() {
                content = content.push(
                    text(format!(
                        "Showing {} of {} results for \"{}\"",
                        self.session.cards().len(),
                        self.session.total_hits(),
                        self.session.query(),
                    ))
                    .size(14),
                );
            }

            content = content.push(ui::gallery::gallery(self.session.cards(), &self.thumbs));
        }

        if self.session.is_loading() {
            content = content.push(text("Loading images…").size(16));
        }

        if self.session.can_load_more() {
            content = content.push(
                button(text("Load more"))
                    .on_press(Message::LoadMore)
                    .padding([8.0, 24.0]),
            );
        }

        let base: Element<Message> = scrollable(
            container(content)
                .width(Length::Fill)
                .center_x(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into();

        match self.preview.current() {
            Some(card) => {
                let picture = self.full_images.get(&card.id).map(|full| &full.handle);
                ui::preview::with_overlay(base, ui::preview::overlay_content(card, picture))
            }
            None => base,
        }
    }

    /// Register the Escape listener only while the overlay is open, so the
    /// global key subscription lives exactly as long as the overlay does
    fn subscription(&self) -> Subscription<Message> {
        if self.preview.is_open() {
            keyboard::on_key_press(escape_to_close)
        } else {
            Subscription::none()
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Map Escape to closing the preview; every other key is ignored
fn escape_to_close(key: keyboard::Key, _modifiers: keyboard::Modifiers) -> Option<Message> {
    match key {
        keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::ClosePreview),
        _ => None,
    }
}

fn main() -> iced::Result {
    iced::application("PixSeek", PixSeek::update, PixSeek::view)
        .subscription(PixSeek::subscription)
        .theme(PixSeek::theme)
        .window_size(Size::new(1100.0, 760.0))
        .centered()
        .run_with(PixSeek::new)
}
