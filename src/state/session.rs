/// Search session state machine
///
/// Owns the query/pagination state that drives the gallery: the current
/// query, the 1-indexed page, the accumulated result cards, the total
/// number of reachable hits, and the loading flag.
///
/// Mutations happen through two user triggers (`submit_query`,
/// `load_next_page`) plus the completion of a fetch (`resolve`). The
/// session never performs I/O itself: beginning a fetch returns a
/// `PageRequest` description which the application shell turns into an
/// actual network task, and the completion comes back through `resolve`.
/// Every issued request carries a generation stamp; a completion with a
/// stale stamp is discarded so a late response from an abandoned query
/// cannot overwrite newer results.

use crate::api::client::ApiError;
use super::data::{ImageCard, SearchPage};

/// Results requested per page. Pixabay accepts 3..=200.
pub const DEFAULT_PER_PAGE: u32 = 12;

/// Description of a fetch the session wants issued
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub query: String,
    pub page: u32,
    pub per_page: u32,
    /// Stamp identifying which fetch cycle this request belongs to
    pub generation: u64,
}

/// What a completed fetch did to the session
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Hits were appended to the accumulated cards
    Appended { added: usize },
    /// The fetch succeeded but returned zero hits; state untouched
    Empty,
    /// The fetch failed; state untouched
    Failed(ApiError),
    /// The response belonged to a superseded request and was discarded
    Stale,
}

/// The query/pagination state machine behind the gallery
#[derive(Debug)]
pub struct SearchSession {
    query: String,
    page: u32,
    per_page: u32,
    cards: Vec<ImageCard>,
    total_hits: u64,
    loading: bool,
    generation: u64,
}

impl SearchSession {
    pub fn new(per_page: u32) -> Self {
        Self {
            query: String::new(),
            page: 1,
            per_page,
            cards: Vec::new(),
            total_hits: 0,
            loading: false,
            generation: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The cards accumulated for the current query, in arrival order
    pub fn cards(&self) -> &[ImageCard] {
        &self.cards
    }

    /// Look up an accumulated card by its ID
    pub fn card(&self, id: u64) -> Option<&ImageCard> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn total_hits(&self) -> u64 {
        self.total_hits
    }

    /// Whether further pages exist beyond the ones already requested.
    ///
    /// Strictly `page * per_page < total_hits`; always false while a fetch
    /// is in flight because beginning a fetch resets `total_hits`.
    pub fn can_load_more(&self) -> bool {
        u64::from(self.page) * u64::from(self.per_page) < self.total_hits
    }

    /// Submit a search query.
    ///
    /// A query differing from the current one resets the page to 1 and
    /// clears the accumulated cards before a new fetch is issued.
    /// Submitting the identical query again is a no-op and returns `None`,
    /// so repeated submissions never trigger duplicate fetches.
    pub fn submit_query(&mut self, query: &str) -> Option<PageRequest> {
        if self.query == query {
            return None;
        }

        self.query = query.to_string();
        self.page = 1;
        self.cards.clear();

        Some(self.begin_fetch())
    }

    /// Request the next page of the current query.
    ///
    /// Increments the page and issues a fetch whose hits will be appended
    /// to the accumulated cards. The view layer only exposes the load-more
    /// control while `can_load_more` holds.
    pub fn load_next_page(&mut self) -> PageRequest {
        self.page += 1;
        self.begin_fetch()
    }

    /// Start a fetch cycle for the current (query, page).
    ///
    /// Resets `total_hits` so the load-more control disappears for the
    /// duration of the flight, and stamps the request with a fresh
    /// generation.
    fn begin_fetch(&mut self) -> PageRequest {
        self.loading = true;
        self.total_hits = 0;
        self.generation += 1;

        PageRequest {
            query: self.query.clone(),
            page: self.page,
            per_page: self.per_page,
            generation: self.generation,
        }
    }

    /// Apply the outcome of a completed fetch.
    ///
    /// The loading flag is always cleared by the completion that owns the
    /// current generation, whatever the outcome; a stale completion leaves
    /// the session untouched because a newer fetch is still in flight.
    pub fn resolve(
        &mut self,
        generation: u64,
        result: Result<SearchPage, ApiError>,
    ) -> Resolution {
        if generation != self.generation {
            return Resolution::Stale;
        }

        self.loading = false;

        match result {
            Ok(page) if page.hits.is_empty() => Resolution::Empty,
            Ok(page) => {
                let added = page.hits.len();
                self.cards.extend(page.hits);
                self.total_hits = page.total_hits;
                Resolution::Appended { added }
            }
            Err(error) => Resolution::Failed(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: u64) -> ImageCard {
        ImageCard {
            id,
            tags: format!("tag-{}", id),
            webformat_url: format!("https://example.com/{}_640.jpg", id),
            large_image_url: format!("https://example.com/{}_1280.jpg", id),
            user: "tester".to_string(),
            likes: 0,
        }
    }

    fn page_of(ids: std::ops::Range<u64>, total_hits: u64) -> SearchPage {
        SearchPage {
            total: total_hits,
            total_hits,
            hits: ids.map(card).collect(),
        }
    }

    #[test]
    fn test_new_query_resets_page_and_cards() {
        let mut session = SearchSession::new(12);

        let first = session.submit_query("cats").unwrap();
        session.resolve(first.generation, Ok(page_of(0..12, 30)));
        let more = session.load_next_page();
        session.resolve(more.generation, Ok(page_of(12..24, 30)));
        assert_eq!(session.cards().len(), 24);

        let request = session.submit_query("dogs").unwrap();
        assert!(session.cards().is_empty());
        assert_eq!(request.query, "dogs");
        assert_eq!(request.page, 1);
    }

    #[test]
    fn test_identical_query_is_a_no_op() {
        let mut session = SearchSession::new(12);

        assert!(session.submit_query("cats").is_some());
        assert!(session.submit_query("cats").is_none());

        // The first fetch is still the live one, and the page never moved
        assert!(session.is_loading());
        assert_eq!(session.load_next_page().page, 2);
    }

    #[test]
    fn test_cannot_load_more_without_hits() {
        let session = SearchSession::new(12);
        assert_eq!(session.total_hits(), 0);
        assert!(!session.can_load_more());
    }

    #[test]
    fn test_cannot_load_more_while_loading() {
        let mut session = SearchSession::new(12);

        let first = session.submit_query("cats").unwrap();
        session.resolve(first.generation, Ok(page_of(0..12, 30)));
        assert!(session.can_load_more());

        // Beginning the next fetch hides the control until it settles
        session.load_next_page();
        assert!(!session.can_load_more());
    }

    #[test]
    fn test_pagination_boundary() {
        let mut session = SearchSession::new(12);

        // Page 1: 12 of 30
        let request = session.submit_query("cats").unwrap();
        session.resolve(request.generation, Ok(page_of(0..12, 30)));
        assert_eq!(session.cards().len(), 12);
        assert!(session.can_load_more());

        // Page 2: 24 of 30
        let request = session.load_next_page();
        assert_eq!(request.page, 2);
        session.resolve(request.generation, Ok(page_of(12..24, 30)));
        assert_eq!(session.cards().len(), 24);
        assert!(session.can_load_more());

        // Page 3: the final 6; 36 < 30 is false, control disappears
        let request = session.load_next_page();
        session.resolve(request.generation, Ok(page_of(24..30, 30)));
        assert_eq!(session.cards().len(), 30);
        assert!(!session.can_load_more());
    }

    #[test]
    fn test_empty_result_leaves_state_untouched() {
        let mut session = SearchSession::new(12);

        let request = session.submit_query("xyzzy").unwrap();
        let resolution = session.resolve(request.generation, Ok(page_of(0..0, 0)));

        assert_eq!(resolution, Resolution::Empty);
        assert!(session.cards().is_empty());
        assert_eq!(session.total_hits(), 0);
        assert!(!session.is_loading());
    }

    #[test]
    fn test_failure_leaves_cards_untouched() {
        let mut session = SearchSession::new(12);

        let first = session.submit_query("cats").unwrap();
        session.resolve(first.generation, Ok(page_of(0..12, 30)));

        let request = session.load_next_page();
        let resolution = session.resolve(
            request.generation,
            Err(ApiError::Network("connection reset".to_string())),
        );

        assert!(matches!(resolution, Resolution::Failed(_)));
        assert_eq!(session.cards().len(), 12);
        assert!(!session.is_loading());
    }

    #[test]
    fn test_loading_always_clears_after_resolution() {
        let mut session = SearchSession::new(12);

        let request = session.submit_query("cats").unwrap();
        assert!(session.is_loading());
        session.resolve(request.generation, Ok(page_of(0..12, 30)));
        assert!(!session.is_loading());

        let request = session.load_next_page();
        assert!(session.is_loading());
        session.resolve(request.generation, Err(ApiError::Status(500)));
        assert!(!session.is_loading());

        let request = session.submit_query("empty").unwrap();
        assert!(session.is_loading());
        session.resolve(request.generation, Ok(page_of(0..0, 0)));
        assert!(!session.is_loading());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut session = SearchSession::new(12);

        let old = session.submit_query("cats").unwrap();
        // The user searches again before the first fetch lands
        let new = session.submit_query("dogs").unwrap();

        let resolution = session.resolve(old.generation, Ok(page_of(0..12, 30)));
        assert_eq!(resolution, Resolution::Stale);
        // The stale cat results must not leak into the dog session,
        // and the newer fetch still owns the loading flag
        assert!(session.cards().is_empty());
        assert!(session.is_loading());

        session.resolve(new.generation, Ok(page_of(100..106, 6)));
        assert_eq!(session.cards().len(), 6);
        assert!(!session.is_loading());
    }
}
