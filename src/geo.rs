//! Great-circle distance between coordinates

use crate::models::Coordinate;

/// Haversine distance in kilometers (Earth radius 6371 km), rounded to one decimal.
///
/// Inputs are not range-checked; out-of-range degrees give a defined but
/// meaningless result.
#[must_use]
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let km = haversine::distance(
        haversine::Location {
            latitude: a.lat,
            longitude: a.lon,
        },
        haversine::Location {
            latitude: b.lat,
            longitude: b.lon,
        },
        haversine::Units::Kilometers,
    );
    round_tenth(km)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
