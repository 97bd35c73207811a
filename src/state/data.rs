/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the API layer and the UI layer. Field names mirror the Pixabay
/// response schema, which uses camelCase with uppercase "URL".

use serde::{Deserialize, Serialize};

/// A single image record returned by the search API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageCard {
    /// Unique Pixabay image ID
    pub id: u64,
    /// Comma-separated descriptive tags (e.g. "cat, pet, animal")
    #[serde(default)]
    pub tags: String,
    /// Medium-size image (640px), used as the gallery thumbnail
    #[serde(rename = "webformatURL")]
    pub webformat_url: String,
    /// Full-resolution image, shown in the preview overlay
    #[serde(rename = "largeImageURL")]
    pub large_image_url: String,
    /// Uploader's display name
    #[serde(default)]
    pub user: String,
    /// Like count, shown in the preview overlay
    #[serde(default)]
    pub likes: u64,
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Total matches known to the API
    #[serde(default)]
    pub total: u64,
    /// Total matches actually reachable through pagination
    #[serde(rename = "totalHits", default)]
    pub total_hits: u64,
    /// The images on this page
    pub hits: Vec<ImageCard>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixabay_field_mapping() {
        let json = r#"{
            "total": 4692,
            "totalHits": 500,
            "hits": [{
                "id": 195893,
                "tags": "blossom, bloom, flower",
                "webformatURL": "https://pixabay.com/get/webformat.jpg",
                "largeImageURL": "https://pixabay.com/get/large.jpg",
                "user": "Josch13",
                "likes": 310
            }]
        }"#;

        let page: SearchPage = serde_json::from_str(json).unwrap();

        assert_eq!(page.total, 4692);
        assert_eq!(page.total_hits, 500);
        assert_eq!(page.hits.len(), 1);

        let card = &page.hits[0];
        assert_eq!(card.id, 195893);
        assert_eq!(card.webformat_url, "https://pixabay.com/get/webformat.jpg");
        assert_eq!(card.large_image_url, "https://pixabay.com/get/large.jpg");
        assert_eq!(card.user, "Josch13");
        assert_eq!(card.likes, 310);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        // Pixabay omits some fields for certain image types
        let json = r#"{
            "hits": [{
                "id": 1,
                "webformatURL": "https://example.com/w.jpg",
                "largeImageURL": "https://example.com/l.jpg"
            }]
        }"#;

        let page: SearchPage = serde_json::from_str(json).unwrap();

        assert_eq!(page.total_hits, 0);
        assert_eq!(page.hits[0].tags, "");
        assert_eq!(page.hits[0].likes, 0);
    }
}
