use std::path::{Path, PathBuf};

use super::client::{ApiError, PixabayClient};

/// Get the thumbnail cache directory
/// Returns ~/.cache/pixseek/thumbnails on Linux
pub fn cache_dir() -> PathBuf {
    let mut path = dirs::cache_dir()
        .or_else(dirs::home_dir)
        .expect("Could not determine cache directory");

    path.push("pixseek");
    path.push("thumbnails");

    // Ensure the directory exists
    std::fs::create_dir_all(&path).expect("Failed to create thumbnail cache directory");

    path
}

/// The cache path for a card's thumbnail inside a given directory
fn thumb_path_in(dir: &Path, id: u64) -> PathBuf {
    dir.join(format!("{}.jpg", id))
}

/// The cache path for a card's thumbnail (doesn't fetch, just returns the path)
pub fn thumb_path(id: u64) -> PathBuf {
    thumb_path_in(&cache_dir(), id)
}

/// Fetch a gallery thumbnail through the disk cache.
///
/// A cached file wins over the network; a fresh download is written back
/// best-effort, so a full cache disk only costs a warning.
pub async fn fetch_thumbnail(
    client: PixabayClient,
    id: u64,
    url: String,
) -> Result<Vec<u8>, ApiError> {
    fetch_thumbnail_at(thumb_path(id), client, id, url).await
}

async fn fetch_thumbnail_at(
    path: PathBuf,
    client: PixabayClient,
    id: u64,
    url: String,
) -> Result<Vec<u8>, ApiError> {
    if let Ok(bytes) = tokio::fs::read(&path).await {
        return Ok(bytes);
    }

    let bytes = client.fetch_bytes(url).await?;

    if let Err(error) = tokio::fs::write(&path, &bytes).await {
        eprintln!("⚠️  Could not cache thumbnail {}: {}", id, error);
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_client() -> PixabayClient {
        PixabayClient::new("test-key".to_string(), "http://127.0.0.1:1/".to_string())
    }

    #[test]
    fn test_thumb_paths_are_keyed_by_id() {
        let dir = Path::new("/tmp/thumbs");
        assert_eq!(thumb_path_in(dir, 42), PathBuf::from("/tmp/thumbs/42.jpg"));
        assert_ne!(thumb_path_in(dir, 42), thumb_path_in(dir, 7));
    }

    #[tokio::test]
    async fn test_cached_file_wins_over_network() {
        let dir = tempfile::tempdir().unwrap();
        let path = thumb_path_in(dir.path(), 42);
        tokio::fs::write(&path, b"cached-bytes").await.unwrap();

        // The URL is unreachable, so only a cache hit can satisfy this
        let bytes = fetch_thumbnail_at(
            path,
            offline_client(),
            42,
            "http://127.0.0.1:1/42.jpg".to_string(),
        )
        .await
        .unwrap();

        assert_eq!(bytes, b"cached-bytes");
    }

    #[tokio::test]
    async fn test_cache_miss_propagates_fetch_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = thumb_path_in(dir.path(), 7);

        let result = fetch_thumbnail_at(
            path,
            offline_client(),
            7,
            "http://127.0.0.1:1/7.jpg".to_string(),
        )
        .await;

        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}
