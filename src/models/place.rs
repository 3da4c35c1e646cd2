//! Place records as served by the curated dataset and the geocoding search

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A point of interest with coordinates and descriptive text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub history: String,
    #[serde(default)]
    pub significance: String,
    /// Names of nearby attractions, in display order
    #[serde(default)]
    pub nearby: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Place {
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }

    /// URL-style slug of the name: lower-cased, whitespace runs replaced by `-`
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Matches either the exact id or the name slug
    #[must_use]
    pub fn matches_id(&self, id: &str) -> bool {
        self.id == id || self.slug() == id
    }
}

/// A place annotated with its distance from the current coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPlace {
    #[serde(flatten)]
    pub place: Place,
    /// Kilometers, rounded to one decimal. Absent when no coordinate is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

/// A ranked place plus the popularity tags shown in live mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveredPlace {
    #[serde(flatten)]
    pub ranked: RankedPlace,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_fort() -> Place {
        Place {
            id: "red-fort".to_string(),
            name: "Red  Fort\tComplex".to_string(),
            city: "Delhi".to_string(),
            state: Some("Delhi".to_string()),
            lat: 28.6562,
            lon: 77.2410,
            history: String::new(),
            significance: String::new(),
            nearby: vec![],
            image: None,
        }
    }

    #[test]
    fn test_slug_collapses_whitespace() {
        assert_eq!(red_fort().slug(), "red-fort-complex");
    }

    #[test]
    fn test_matches_id_or_slug() {
        let place = red_fort();
        assert!(place.matches_id("red-fort"));
        assert!(place.matches_id("red-fort-complex"));
        assert!(!place.matches_id("Red Fort"));
    }

    #[test]
    fn test_deserialize_with_missing_optional_fields() {
        let json = r#"{"id":"1","name":"Qutub Minar","city":"Delhi","lat":28.5245,"lon":77.1855}"#;
        let place: Place = serde_json::from_str(json).unwrap();
        assert!(place.history.is_empty());
        assert!(place.nearby.is_empty());
        assert_eq!(place.state, None);
        assert_eq!(place.coordinate(), Coordinate::new(28.5245, 77.1855));
    }

    #[test]
    fn test_ranked_place_serializes_flat() {
        let ranked = RankedPlace {
            place: red_fort(),
            distance_km: Some(6.8),
        };
        let value = serde_json::to_value(&ranked).unwrap();
        assert_eq!(value["name"], "Red  Fort\tComplex");
        assert_eq!(value["distance_km"], 6.8);

        let unranked = RankedPlace {
            place: red_fort(),
            distance_km: None,
        };
        let value = serde_json::to_value(&unranked).unwrap();
        assert!(value.get("distance_km").is_none());
    }
}
