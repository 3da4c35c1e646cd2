//! Proximity ranking and cumulative paging of candidate places

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geo::distance_km;
use crate::models::{Coordinate, Place, RankedPlace};

/// Number of places revealed per page
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Rank `places` by distance from `at` and return the first `page * page_size` entries.
///
/// Without a coordinate the source order is kept and no distance is attached.
/// With one, places are stably sorted by their rounded distance, so ties keep
/// their source order. Page numbers start at 1; page 0 is treated as 1.
#[must_use]
pub fn rank_and_page(
    places: &[Place],
    at: Option<&Coordinate>,
    page: usize,
    page_size: usize,
) -> Vec<RankedPlace> {
    let visible = page.max(1).saturating_mul(page_size);

    let mut ranked: Vec<RankedPlace> = places
        .iter()
        .map(|place| RankedPlace {
            place: place.clone(),
            distance_km: at.map(|here| distance_km(here, &place.coordinate())),
        })
        .collect();

    if let Some(here) = at {
        // `sort_by` is stable.
        ranked.sort_by(|a, b| {
            let a = a.distance_km.unwrap_or(f64::INFINITY);
            let b = b.distance_km.unwrap_or(f64::INFINITY);
            a.total_cmp(&b)
        });
        debug!(
            "Ranked {} places from {}",
            ranked.len(),
            here.format_coordinates()
        );
    }

    ranked.truncate(visible);
    ranked
}

/// Cursor over cumulative pages of a candidate set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    page: usize,
    page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    /// Start at page 1. A zero page size falls back to the default.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        Self { page: 1, page_size }
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `min(page * page_size, total)`
    #[must_use]
    pub fn visible_count(&self, total: usize) -> usize {
        self.page.saturating_mul(self.page_size).min(total)
    }

    #[must_use]
    pub fn has_more(&self, total: usize) -> bool {
        self.visible_count(total) < total
    }

    /// Advance one page if more candidates remain. Returns whether it advanced.
    pub fn advance(&mut self, total: usize) -> bool {
        if self.has_more(total) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }
}
