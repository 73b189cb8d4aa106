use tracing::{debug, info, warn};

use crate::error::{ListingError, ScoutError};
use crate::hn_client::{HnApi, PageRequest, HITS_PER_PAGE};
use crate::models::{SearchPage, Story};
use crate::ranking::rank_hits;
use crate::routes::ListingQuery;

/// The first page of a listing route, ranked and ready to render.
#[derive(Debug, Clone)]
pub struct InitialPage {
    pub stories: Vec<Story>,
    pub current_page: u32,
    pub nb_pages: u32,
    /// Fewer than a full page came back.
    pub partial: bool,
}

/// Loads page `page` (1-based) for `query`.
///
/// `now` fixes the time window. `received_at` is read once the response arrives and
/// ranks the stories.
pub fn load_listing<F>(
    api: &dyn HnApi,
    page: i64,
    query: &ListingQuery,
    now: i64,
    received_at: F,
) -> Result<InitialPage, ListingError>
where
    F: FnOnce() -> i64,
{
    if page < 1 {
        return Err(ListingError::InvalidPage);
    }
    let Ok(page) = u32::try_from(page) else {
        return Err(ListingError::PageOutOfRange { page, nb_pages: 0 });
    };

    let request = PageRequest::new(page, query.window_days, query.domain.as_deref(), now);
    let response = api.search_page(&request)?;

    let nb_pages = response.total_pages();
    if page > nb_pages {
        return Err(ListingError::PageOutOfRange {
            page: i64::from(page),
            nb_pages,
        });
    }

    let stories = rank_hits(response.hits, received_at());
    let partial = stories.len() < HITS_PER_PAGE as usize;
    info!(page, nb_pages, count = stories.len(), "Loaded listing page");

    Ok(InitialPage {
        stories,
        current_page: page,
        nb_pages,
        partial,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    Idle,
    Loading,
    Exhausted,
    Errored,
}

impl FeedState {
    /// Text shown at the bottom of the list.
    pub fn sentinel_label(self) -> &'static str {
        match self {
            FeedState::Idle | FeedState::Loading => "Loading more...",
            FeedState::Errored => "Couldn't load more; scroll to retry",
            FeedState::Exhausted => "No more posts to load.",
        }
    }
}

/// Accumulated stories of one listing session plus the infinite-scroll state machine.
///
/// Fetching itself happens elsewhere: [`Feed::on_sentinel_visibility`] hands out the
/// request to run and [`Feed::complete`] folds the result back in.
#[derive(Debug, Clone)]
pub struct Feed {
    query: ListingQuery,
    stories: Vec<Story>,
    next_page: u32,
    total_pages: u32,
    state: FeedState,
    partial_first_page: bool,
    // visibility seen on the previous signal, for edge detection after an error
    sentinel_was_visible: bool,
}

impl Feed {
    pub fn new(query: ListingQuery, initial: InitialPage) -> Self {
        let mut feed = Self {
            query,
            stories: initial.stories,
            next_page: initial.current_page + 1,
            total_pages: initial.nb_pages,
            state: FeedState::Idle,
            partial_first_page: initial.partial,
            sentinel_was_visible: false,
        };
        feed.settle();
        feed
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn query(&self) -> &ListingQuery {
        &self.query
    }

    pub fn state(&self) -> FeedState {
        self.state
    }

    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn has_more(&self) -> bool {
        self.next_page <= self.total_pages
    }

    pub fn partial_first_page(&self) -> bool {
        self.partial_first_page
    }

    /// Feeds the sentinel's current visibility in. Returns the request to issue, if any.
    ///
    /// While loading or exhausted the signal is ignored. After a failure only a fresh
    /// edge (hidden, then visible again) starts another attempt.
    pub fn on_sentinel_visibility(&mut self, visible: bool, now: i64) -> Option<PageRequest> {
        let rising_edge = visible && !self.sentinel_was_visible;
        self.sentinel_was_visible = visible;

        let should_fetch = match self.state {
            FeedState::Idle => visible,
            FeedState::Errored => rising_edge,
            FeedState::Loading | FeedState::Exhausted => false,
        };
        if !should_fetch || !self.has_more() {
            return None;
        }

        self.state = FeedState::Loading;
        debug!(page = self.next_page, "Requesting next page");
        Some(PageRequest::new(
            self.next_page,
            self.query.window_days,
            self.query.domain.as_deref(),
            now,
        ))
    }

    /// Applies the outcome of the request last handed out.
    ///
    /// `now` is the receipt time used for ranking.
    pub fn complete(&mut self, result: Result<SearchPage, ScoutError>, now: i64) {
        if self.state != FeedState::Loading {
            warn!(state = ?self.state, "Ignoring page result with no request in flight");
            return;
        }
        match result {
            Ok(page) => {
                let ranked = rank_hits(page.hits, now);
                info!(page = self.next_page, count = ranked.len(), "Appended page");
                self.stories.extend(ranked);
                self.next_page += 1;
                self.state = FeedState::Idle;
                self.settle();
            }
            Err(e) => {
                warn!(page = self.next_page, error = %e, "Fetch error");
                self.state = FeedState::Errored;
            }
        }
    }

    /// Re-joins the saved flag after the bookmark set changed.
    pub fn apply_saved<F>(&mut self, is_saved: F)
    where
        F: Fn(&str) -> bool,
    {
        for story in &mut self.stories {
            story.saved = is_saved(&story.id);
        }
    }

    fn settle(&mut self) {
        if self.state == FeedState::Idle && !self.has_more() {
            self.state = FeedState::Exhausted;
        }
    }
}

/// Runs one incremental load synchronously; the UI does the same across a worker thread.
#[cfg(test)]
pub fn load_next_page(feed: &mut Feed, api: &dyn HnApi, visible: bool, now: i64) -> bool {
    match feed.on_sentinel_visibility(visible, now) {
        Some(request) => {
            let result = api.search_page(&request);
            feed.complete(result, now);
            true
        }
        None => false,
    }
}
