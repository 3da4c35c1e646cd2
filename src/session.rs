//! Discovery session: the query, coordinate and page owned by one view
//!
//! Fetches are split into a [`FetchTicket`] issued by the session and a
//! completion handed back to it. Each ticket carries a sequence number; only
//! the most recently issued ticket may replace the candidate set, so a slow
//! response to a superseded query is dropped instead of overwriting newer
//! results.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::geolocation::{GeolocationError, GeolocationProvider};
use crate::models::{Coordinate, DiscoveredPlace, Place};
use crate::ranking::{PageState, rank_and_page};
use crate::sources::PlaceSource;
use crate::tags::owned_tags_for_city;

/// Whether results are annotated with popularity tags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryMode {
    #[default]
    Standard,
    Live,
}

/// A pending fetch for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    sequence: u64,
    query: String,
}

impl FetchTicket {
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Resolve the candidates for this ticket.
    pub async fn run(&self, source: &dyn PlaceSource) -> Vec<Place> {
        source.resolve_places(Some(&self.query)).await
    }
}

#[derive(Debug, Clone)]
pub struct DiscoverySession {
    query: String,
    coordinate: Option<Coordinate>,
    notice: Option<String>,
    mode: DiscoveryMode,
    page: PageState,
    candidates: Vec<Place>,
    issued: u64,
    applied: u64,
}

impl Default for DiscoverySession {
    fn default() -> Self {
        Self::new(PageState::default().page_size(), DiscoveryMode::Standard)
    }
}

impl DiscoverySession {
    #[must_use]
    pub fn new(page_size: usize, mode: DiscoveryMode) -> Self {
        Self {
            query: String::new(),
            coordinate: None,
            notice: None,
            mode,
            page: PageState::new(page_size),
            candidates: Vec::new(),
            issued: 0,
            applied: 0,
        }
    }

    /// Change the query. Resets to page 1 and returns the ticket to fetch.
    pub fn set_query(&mut self, query: impl Into<String>) -> FetchTicket {
        self.query = query.into();
        self.page.reset();
        self.issue()
    }

    /// Re-fetch the current query without touching the page.
    pub fn refresh(&mut self) -> FetchTicket {
        self.issue()
    }

    fn issue(&mut self) -> FetchTicket {
        self.issued += 1;
        debug!("Issued fetch #{} for '{}'", self.issued, self.query);
        FetchTicket {
            sequence: self.issued,
            query: self.query.clone(),
        }
    }

    /// Apply fetched candidates. Returns `false` and drops them if a newer
    /// ticket has been issued since.
    pub fn complete_fetch(&mut self, ticket: &FetchTicket, places: Vec<Place>) -> bool {
        if ticket.sequence != self.issued {
            info!(
                "Discarding stale results for '{}' (fetch #{}, latest #{})",
                ticket.query, ticket.sequence, self.issued
            );
            return false;
        }

        debug!(
            "Applying {} candidates from fetch #{}",
            places.len(),
            ticket.sequence
        );
        self.candidates = places;
        self.applied = ticket.sequence;
        true
    }

    /// Issue a ticket for the current query, run it and apply the result.
    pub async fn fetch(&mut self, source: &dyn PlaceSource) -> bool {
        let ticket = self.refresh();
        let places = ticket.run(source).await;
        self.complete_fetch(&ticket, places)
    }

    /// Replace the coordinate. Re-ranks in place; the page is kept.
    pub fn set_coordinate(&mut self, coordinate: Option<Coordinate>) {
        self.coordinate = coordinate;
        if coordinate.is_some() {
            self.notice = None;
        }
    }

    /// Forget the coordinate; results fall back to source order.
    pub fn reset_location(&mut self) {
        self.coordinate = None;
        self.notice = None;
    }

    /// Record a geolocation outcome. Failure means "no coordinate" plus a notice.
    pub fn apply_geolocation(&mut self, outcome: Result<Coordinate, GeolocationError>) {
        match outcome {
            Ok(coordinate) => self.set_coordinate(Some(coordinate)),
            Err(e) => {
                info!("Geolocation unavailable: {}", e);
                self.coordinate = None;
                self.notice = Some(e.notice().to_string());
            }
        }
    }

    pub async fn locate(&mut self, provider: &dyn GeolocationProvider) {
        let outcome = provider.current_position().await;
        self.apply_geolocation(outcome);
    }

    /// Reveal the next page if any candidates remain hidden.
    pub fn load_more(&mut self) -> bool {
        self.page.advance(self.candidates.len())
    }

    pub fn set_mode(&mut self, mode: DiscoveryMode) {
        self.mode = mode;
    }

    /// The ranked, paged and (in live mode) tagged places to display
    #[must_use]
    pub fn visible(&self) -> Vec<DiscoveredPlace> {
        rank_and_page(
            &self.candidates,
            self.coordinate.as_ref(),
            self.page.page(),
            self.page.page_size(),
        )
        .into_iter()
        .map(|ranked| {
            let tags = match self.mode {
                DiscoveryMode::Live => owned_tags_for_city(Some(ranked.place.city.as_str())),
                DiscoveryMode::Standard => Vec::new(),
            };
            DiscoveredPlace { ranked, tags }
        })
        .collect()
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.page.has_more(self.candidates.len())
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn coordinate(&self) -> Option<&Coordinate> {
        self.coordinate.as_ref()
    }

    /// Informational message left by a failed geolocation
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page.page()
    }

    #[must_use]
    pub fn mode(&self) -> DiscoveryMode {
        self.mode
    }

    /// Sequence number of the fetch whose results are displayed; 0 before any
    #[must_use]
    pub fn applied_sequence(&self) -> u64 {
        self.applied
    }
}
