//! Data models for the heritage explorer
//!
//! - Location: the user's current coordinate
//! - Place: dataset/search records and their ranked, tagged derivatives

pub mod location;
pub mod place;

pub use location::Coordinate;
pub use place::{DiscoveredPlace, Place, RankedPlace};
