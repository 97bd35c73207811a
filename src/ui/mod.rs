/// View helpers for the application
///
/// This module builds the widget tree, including:
/// - The search input row and recent-search chips (searchbar.rs)
/// - The thumbnail grid (gallery.rs)
/// - The full-size preview overlay (preview.rs)
/// - Notification banners (notices.rs)

pub mod searchbar;
pub mod gallery;
pub mod preview;
pub mod notices;
