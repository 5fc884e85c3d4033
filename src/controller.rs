//! Search and pagination state machine
//!
//! `SearchController` owns the `SearchState` shown by the UI and the session
//! `ResultCache`. Every transition that moves to a different `(query, page)`
//! goes through a single fetch routine: cache hits are applied immediately,
//! misses are queued as `FetchRequest`s for the runtime to resolve and hand
//! back as `FetchOutcome`s.
//!
//! Responses can come back out of order. Each request carries a sequence
//! number and only the outcome the newest transition is waiting for is
//! applied to the state; older ones are cached and otherwise dropped.

use std::collections::HashMap;
use std::mem;

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::cache::ResultCache;
use crate::data::{ImageResult, ImageSearch, ResultPage, SearchError, DEFAULT_QUERY, MAX_TOTAL_PAGES};

/// Message shown to the user when a fetch fails, whatever the cause
pub const FETCH_ERROR_MESSAGE: &str = "Something went wrong, cannot fetch the data";

/// Errors from validating page-jump input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageJumpError {
    /// The input is not an integer
    #[error("Please enter a valid page number between 1 and {total_pages}.")]
    NotANumber { input: String, total_pages: u32 },

    /// The input is an integer outside `1..=total_pages`
    #[error("Please enter a valid page number between 1 and {total_pages}.")]
    OutOfRange { page: i64, total_pages: u32 },
}

/// Everything the presentation layer needs to draw the screen
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    /// Active search term
    pub query: String,
    /// 1-based page currently shown
    pub current_page: u32,
    /// Total pages for the active query, in `1..=200`
    pub total_pages: u32,
    /// Results of the last successfully applied page
    pub results: Vec<ImageResult>,
    /// Whether any page has been applied yet
    pub has_fetched_once: bool,
    /// User-visible error, cleared by the next successful fetch
    pub error_message: Option<String>,
    /// Whether the latest transition is still waiting on the network
    pub loading: bool,
    /// When the shown page was applied
    pub last_fetched: Option<DateTime<Local>>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            current_page: 1,
            total_pages: 1,
            results: Vec::new(),
            has_fetched_once: false,
            error_message: None,
            loading: false,
            last_fetched: None,
        }
    }
}

impl SearchState {
    /// Whether "Previous" is available
    pub fn can_go_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether "Next" is available
    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether to show the "no results" message
    pub fn is_empty_result(&self) -> bool {
        self.has_fetched_once && self.results.is_empty()
    }
}

/// A page the controller needs from the network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub query: String,
    pub page: u32,
}

impl FetchRequest {
    /// Runs the request against a search client
    pub async fn resolve<S: ImageSearch + ?Sized>(self, client: &S) -> FetchOutcome {
        let result = client.fetch_page(&self.query, self.page).await;
        FetchOutcome {
            seq: self.seq,
            query: self.query,
            page: self.page,
            result,
        }
    }
}

/// The answer to a `FetchRequest`
#[derive(Debug)]
pub struct FetchOutcome {
    pub seq: u64,
    pub query: String,
    pub page: u32,
    pub result: Result<ResultPage, SearchError>,
}

/// Owns the search state and applies user transitions to it
#[derive(Debug)]
pub struct SearchController {
    state: SearchState,
    cache: ResultCache,
    /// Sequence number for the next network request
    next_seq: u64,
    /// Request the newest transition is waiting on, if any
    awaiting: Option<u64>,
    /// Cache key -> sequence number of the request currently fetching it
    in_flight: HashMap<String, u64>,
    /// Requests not yet handed to the runtime
    pending: Vec<FetchRequest>,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(ResultCache::new())
    }
}

impl SearchController {
    /// Creates a controller at page 1 of the default query
    pub fn new(cache: ResultCache) -> Self {
        Self::with_query(cache, DEFAULT_QUERY)
    }

    /// Creates a controller at page 1 of `query`
    ///
    /// A blank `query` falls back to the default query.
    pub fn with_query(cache: ResultCache, query: &str) -> Self {
        let query = query.trim();
        let state = SearchState {
            query: if query.is_empty() {
                DEFAULT_QUERY.to_string()
            } else {
                query.to_string()
            },
            ..SearchState::default()
        };

        Self {
            state,
            cache,
            next_seq: 1,
            awaiting: None,
            in_flight: HashMap::new(),
            pending: Vec::new(),
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Loads the first page of the starting query
    pub fn initialize(&mut self) {
        tracing::debug!(query = %self.state.query, "initializing search");
        self.request_fetch();
    }

    /// Starts a new search from page 1
    ///
    /// Returns `false` and changes nothing when `raw_query` is blank.
    pub fn submit_search(&mut self, raw_query: &str) -> bool {
        let query = raw_query.trim();
        if query.is_empty() {
            return false;
        }

        tracing::debug!(query = %query, from_page = self.state.current_page, "submitting search");
        self.state.query = query.to_string();

        if self.state.current_page == 1 {
            // Page is unchanged, so the page rule below would not refetch
            self.request_fetch();
        } else {
            self.set_page(1);
        }
        true
    }

    /// Moves one page forward; returns `false` on the last page
    pub fn go_to_next_page(&mut self) -> bool {
        if !self.state.can_go_next() {
            return false;
        }
        self.set_page(self.state.current_page + 1);
        true
    }

    /// Moves one page back; returns `false` on the first page
    pub fn go_to_previous_page(&mut self) -> bool {
        if !self.state.can_go_previous() {
            return false;
        }
        self.set_page(self.state.current_page - 1);
        true
    }

    /// Jumps to the page typed by the user
    ///
    /// Invalid input sets the error message and leaves the page unchanged.
    pub fn jump_to_page(&mut self, raw_input: &str) -> Result<(), PageJumpError> {
        match parse_page(raw_input, self.state.total_pages) {
            Ok(page) => {
                self.state.error_message = None;
                self.set_page(page);
                Ok(())
            }
            Err(e) => {
                tracing::debug!(input = %raw_input, "rejected page jump");
                self.state.error_message = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Hands queued network requests to the caller
    pub fn take_requests(&mut self) -> Vec<FetchRequest> {
        mem::take(&mut self.pending)
    }

    /// Whether requests are queued and not yet taken
    pub fn has_pending_requests(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Applies the answer to a previously taken request
    ///
    /// Successful pages are always cached. The state only changes when the
    /// outcome answers the newest transition.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        let key = ResultCache::key(&outcome.query, outcome.page);
        if self.in_flight.get(&key) == Some(&outcome.seq) {
            self.in_flight.remove(&key);
        }

        let is_current = self.awaiting == Some(outcome.seq);

        match outcome.result {
            Ok(result_page) => {
                self.cache.put(&outcome.query, outcome.page, &result_page);
                if is_current {
                    self.awaiting = None;
                    self.apply_page(result_page);
                } else {
                    tracing::debug!(
                        seq = outcome.seq,
                        key = %key,
                        "cached superseded response without applying it"
                    );
                }
            }
            Err(e) => {
                if is_current {
                    tracing::warn!(seq = outcome.seq, key = %key, error = %e, "fetch failed");
                    self.awaiting = None;
                    self.state.loading = false;
                    self.state.error_message = Some(FETCH_ERROR_MESSAGE.to_string());
                } else {
                    tracing::warn!(
                        seq = outcome.seq,
                        key = %key,
                        error = %e,
                        "superseded fetch failed"
                    );
                }
            }
        }
    }

    /// Resolves every queued request against `client` and applies the results
    ///
    /// Requests queued together are fetched concurrently.
    pub async fn settle<S: ImageSearch + ?Sized>(&mut self, client: &S) {
        while self.has_pending_requests() {
            let requests = self.take_requests();
            let outcomes =
                futures::future::join_all(requests.into_iter().map(|req| req.resolve(client)))
                    .await;
            for outcome in outcomes {
                self.apply_outcome(outcome);
            }
        }
    }

    /// Moves to `page`, fetching it if it differs from the current page
    fn set_page(&mut self, page: u32) {
        if page == self.state.current_page {
            return;
        }
        self.state.current_page = page;
        self.request_fetch();
    }

    /// Loads the current `(query, page)` from the cache or the network
    fn request_fetch(&mut self) {
        let query = self.state.query.clone();
        let page = self.state.current_page;

        if let Some(cached) = self.cache.get(&query, page) {
            tracing::debug!(query = %query, page, "cache hit");
            // Anything still in flight is now stale
            self.awaiting = None;
            self.apply_page(cached);
            return;
        }

        let key = ResultCache::key(&query, page);
        if let Some(&seq) = self.in_flight.get(&key) {
            tracing::debug!(seq, key = %key, "waiting on in-flight request");
            self.awaiting = Some(seq);
            self.state.loading = true;
            return;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        tracing::debug!(seq, query = %query, page, "cache miss, queueing fetch");

        self.in_flight.insert(key, seq);
        self.awaiting = Some(seq);
        self.state.loading = true;
        self.pending.push(FetchRequest { seq, query, page });
    }

    fn apply_page(&mut self, result_page: ResultPage) {
        self.state.results = result_page.results;
        self.state.total_pages = result_page.total_pages.clamp(1, MAX_TOTAL_PAGES);
        self.state.has_fetched_once = true;
        self.state.error_message = None;
        self.state.loading = false;
        self.state.last_fetched = Some(Local::now());

        // A page moved to before the query's page count was known can lie past the end
        if self.state.current_page > self.state.total_pages {
            tracing::debug!(
                page = self.state.current_page,
                total_pages = self.state.total_pages,
                "page past the end, moving to the last page"
            );
            self.state.current_page = self.state.total_pages;
            self.request_fetch();
        }
    }
}

/// Parses page-jump input into a page within `1..=total_pages`
pub fn parse_page(raw_input: &str, total_pages: u32) -> Result<u32, PageJumpError> {
    let trimmed = raw_input.trim();
    let page: i64 = trimmed.parse().map_err(|_| PageJumpError::NotANumber {
        input: trimmed.to_string(),
        total_pages,
    })?;

    if page < 1 || page > i64::from(total_pages) {
        return Err(PageJumpError::OutOfRange { page, total_pages });
    }

    // In range of a u32 after the bounds check
    Ok(page as u32)
}
