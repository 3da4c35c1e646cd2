//! Heritage Explorer - location-ranked place discovery
//!
//! This library resolves candidate heritage places from a curated dataset or
//! a geocoding text search, ranks them by distance from the user's position,
//! reveals them in cumulative pages, and tags well-known cities with
//! popularity hints.

pub mod api;
pub mod config;
pub mod error;
pub mod geo;
pub mod geolocation;
pub mod logging;
pub mod models;
pub mod ranking;
pub mod session;
pub mod sources;
pub mod tags;
pub mod web;

// Re-export core types for public API
pub use config::ExplorerConfig;
pub use error::ExplorerError;
pub use geo::distance_km;
pub use geolocation::{FixedGeolocation, GeolocationError, GeolocationProvider};
pub use models::{Coordinate, DiscoveredPlace, Place, RankedPlace};
pub use ranking::{DEFAULT_PAGE_SIZE, PageState, rank_and_page};
pub use session::{DiscoveryMode, DiscoverySession, FetchTicket};
pub use sources::{Area, HttpPlaceSource, PlaceSource, StaticPlaceSource};
pub use tags::tags_for_city;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ExplorerError>;
