/// Pixabay REST client
///
/// Thin wrapper around reqwest that turns (query, page, per_page) into a
/// decoded `SearchPage`, and downloads raw image bytes for the gallery and
/// the preview overlay. All failures collapse into `ApiError`, which is
/// `Clone` so results can travel inside application messages.

use crate::state::data::SearchPage;
use thiserror::Error;

/// The public Pixabay search endpoint
pub const DEFAULT_ENDPOINT: &str = "https://pixabay.com/api/";

/// Errors produced by the search API or an image download
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout, ...)
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-success status
    #[error("search service responded with HTTP {0}")]
    Status(u16),
    /// The response body was not the JSON we expected
    #[error("could not decode search response: {0}")]
    Decode(String),
}

/// Client for the Pixabay API. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct PixabayClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl PixabayClient {
    pub fn new(api_key: String, endpoint: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            endpoint,
        }
    }

    /// Fetch one page of search results.
    ///
    /// Always requests horizontal photos with safe search on, matching
    /// what the gallery renders.
    pub async fn fetch_page(
        &self,
        query: String,
        page: u32,
        per_page: u32,
    ) -> Result<SearchPage, ApiError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query.as_str()),
                ("image_type", "photo"),
                ("orientation", "horizontal"),
                ("safesearch", "true"),
            ])
            .query(&[("page", page), ("per_page", per_page)])
            .send()
            .await
            .map_err(|error| ApiError::Network(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        response
            .json::<SearchPage>()
            .await
            .map_err(|error| ApiError::Decode(error.to_string()))
    }

    /// Download the bytes of an image (thumbnail or full size)
    pub async fn fetch_bytes(&self, url: String) -> Result<Vec<u8>, ApiError> {
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|error| ApiError::Network(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|error| ApiError::Network(error.to_string()))?;

        Ok(bytes.to_vec())
    }
}
