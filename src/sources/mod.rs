//! Place sources
//!
//! A [`PlaceSource`] resolves the candidate set for a query: the curated
//! dataset when the query is empty, a geocoding text search otherwise.
//! Sources never fail outward; network and parse errors become empty results.

use async_trait::async_trait;
use tracing::warn;

use crate::error::ExplorerError;
use crate::models::{Coordinate, Place};

pub mod http;
pub mod nominatim;

pub use http::HttpPlaceSource;
pub use nominatim::Area;

const BUNDLED_DATASET: &str = include_str!("../../data/places.json");

#[async_trait]
pub trait PlaceSource: Send + Sync {
    /// Candidate places for `query`; the curated dataset when it is empty or absent.
    async fn resolve_places(&self, query: Option<&str>) -> Vec<Place>;

    /// First curated place whose id or name slug equals `id`.
    async fn find_place(&self, id: &str) -> Option<Place> {
        self.resolve_places(None)
            .await
            .into_iter()
            .find(|place| place.matches_id(id))
    }

    /// City and state around a coordinate, if the source can tell.
    async fn reverse_geocode(&self, _at: &Coordinate) -> Option<Area> {
        None
    }
}

/// Trimmed query, or `None` when nothing is left
#[must_use]
pub fn normalize_query(query: Option<&str>) -> Option<&str> {
    query.map(str::trim).filter(|q| !q.is_empty())
}

/// Parse a curated dataset document, dropping records with out-of-range coordinates.
pub fn parse_dataset(json: &str) -> Result<Vec<Place>, ExplorerError> {
    let places: Vec<Place> = serde_json::from_str(json)?;
    let total = places.len();

    let valid: Vec<Place> = places
        .into_iter()
        .filter(|place| {
            let ok = place.coordinate().is_valid();
            if !ok {
                warn!(
                    "Dropping place '{}' with invalid coordinates ({}, {})",
                    place.id, place.lat, place.lon
                );
            }
            ok
        })
        .collect();

    if valid.len() < total {
        warn!("Dropped {} of {} dataset records", total - valid.len(), total);
    }
    Ok(valid)
}

/// The curated dataset shipped with the crate
pub fn bundled_places() -> Result<Vec<Place>, ExplorerError> {
    parse_dataset(BUNDLED_DATASET)
}

/// In-memory source over a fixed curated list.
///
/// Queries filter by case-insensitive substring on name, city and state.
#[derive(Debug, Clone, Default)]
pub struct StaticPlaceSource {
    places: Vec<Place>,
}

impl StaticPlaceSource {
    #[must_use]
    pub fn new(places: Vec<Place>) -> Self {
        Self { places }
    }

    pub fn bundled() -> Result<Self, ExplorerError> {
        Ok(Self::new(bundled_places()?))
    }

    #[must_use]
    pub fn places(&self) -> &[Place] {
        &self.places
    }
}

#[async_trait]
impl PlaceSource for StaticPlaceSource {
    async fn resolve_places(&self, query: Option<&str>) -> Vec<Place> {
        let Some(query) = normalize_query(query) else {
            return self.places.clone();
        };
        let needle = query.to_lowercase();

        self.places
            .iter()
            .filter(|place| {
                place.name.to_lowercase().contains(&needle)
                    || place.city.to_lowercase().contains(&needle)
                    || place
                        .state
                        .as_deref()
                        .is_some_and(|s| s.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }
}
