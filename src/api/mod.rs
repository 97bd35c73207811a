/// Pixabay API module
///
/// This module handles:
/// - Search requests against the Pixabay REST API (client.rs)
/// - Downloading image bytes for thumbnails and previews (client.rs)
/// - The on-disk cache of downloaded thumbnails (cache.rs)

pub mod client;
pub mod cache;
