//! Coordinate model for the user's current position

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ExplorerError;

/// A latitude/longitude pair in WGS84 decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
}

impl Coordinate {
    /// Create a new coordinate without range checks
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Create a coordinate, rejecting values outside the WGS84 ranges
    pub fn checked(lat: f64, lon: f64) -> Result<Self, ExplorerError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ExplorerError::validation(format!(
                "Latitude must be between -90 and 90, got: {lat}"
            )));
        }

        if !(-180.0..=180.0).contains(&lon) {
            return Err(ExplorerError::validation(format!(
                "Longitude must be between -180 and 180, got: {lon}"
            )));
        }

        Ok(Self { lat, lon })
    }

    /// Whether both components lie inside the WGS84 ranges
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }

    /// Format coordinate as a `lat, lon` string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// Parses `"lat,lon"` or `"lat lon"`.
impl FromStr for Coordinate {
    type Err = ExplorerError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = input
            .trim()
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        if parts.len() != 2 {
            return Err(ExplorerError::validation(
                "Coordinates must be in format 'lat,lon'",
            ));
        }

        let lat = parts[0]
            .parse::<f64>()
            .map_err(|_| ExplorerError::validation(format!("Invalid latitude: {}", parts[0])))?;
        let lon = parts[1]
            .parse::<f64>()
            .map_err(|_| ExplorerError::validation(format!("Invalid longitude: {}", parts[1])))?;

        Self::checked(lat, lon)
    }
}
