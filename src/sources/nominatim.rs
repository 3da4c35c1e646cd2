//! Nominatim-compatible geocoding records and their mapping into places

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::{Coordinate, Place};

pub const UNKNOWN_PLACE: &str = "Unknown Place";
pub const UNKNOWN_CITY: &str = "Unknown";
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Strings only; any other JSON type reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// An address that is not an object reads as absent.
fn lenient_address<'de, D>(deserializer: D) -> Result<Option<Address>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

/// One entry of a `/search` response. Fields of the wrong type read as
/// absent so the record still maps with placeholders.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRecord {
    /// Numeric on Nominatim, tolerated as a string elsewhere
    #[serde(default)]
    pub place_id: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub lat: Option<Value>,
    #[serde(default)]
    pub lon: Option<Value>,
    #[serde(default, deserialize_with = "lenient_address")]
    pub address: Option<Address>,
}

/// Address breakdown attached with `addressdetails=1`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Address {
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub town: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub state: Option<String>,
}

/// A `/reverse` response; only the address is used
#[derive(Debug, Clone, Deserialize)]
pub struct ReverseRecord {
    #[serde(default, deserialize_with = "lenient_address")]
    pub address: Option<Address>,
}

/// City and state resolved for a coordinate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub city: String,
    pub state: String,
}

impl Address {
    fn field(value: Option<&String>) -> Option<&str> {
        value.map(String::as_str).filter(|s| !s.is_empty())
    }

    /// city, then town, then state
    #[must_use]
    pub fn locality(&self) -> Option<&str> {
        Self::field(self.city.as_ref())
            .or_else(|| Self::field(self.town.as_ref()))
            .or_else(|| Self::field(self.state.as_ref()))
    }

    #[must_use]
    pub fn region(&self) -> Option<&str> {
        Self::field(self.state.as_ref())
    }
}

fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Coordinate text as received, so `"77.2410"` keeps its trailing zero.
fn raw_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn display_name_head(display_name: Option<&str>) -> String {
    let Some(full) = display_name.filter(|s| !s.is_empty()) else {
        return UNKNOWN_PLACE.to_string();
    };
    match full.split(',').next().map(str::trim) {
        Some(head) if !head.is_empty() => head.to_string(),
        _ => full.to_string(),
    }
}

impl SearchRecord {
    /// Map into a place. Records without usable coordinates yield `None`;
    /// missing names and cities become placeholders.
    #[must_use]
    pub fn into_place(self) -> Option<Place> {
        let lat = number(self.lat.as_ref())?;
        let lon = number(self.lon.as_ref())?;
        if !Coordinate::new(lat, lon).is_valid() {
            return None;
        }

        let id = match &self.place_id {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => format!(
                "{},{}",
                raw_text(self.lat.as_ref()),
                raw_text(self.lon.as_ref())
            ),
        };
        let address = self.address.unwrap_or_default();

        Some(Place {
            id,
            name: display_name_head(self.display_name.as_deref()),
            city: address.locality().unwrap_or(UNKNOWN_CITY).to_string(),
            state: address.region().map(ToString::to_string),
            lat,
            lon,
            history: String::new(),
            significance: String::new(),
            nearby: Vec::new(),
            image: Some(PLACEHOLDER_IMAGE.to_string()),
        })
    }
}

/// Map a `/search` response element by element. Elements that are not
/// records, or lack usable coordinates, are skipped without affecting the rest.
#[must_use]
pub fn places_from_search(records: Vec<Value>) -> Vec<Place> {
    records
        .into_iter()
        .filter_map(|value| serde_json::from_value::<SearchRecord>(value).ok())
        .filter_map(SearchRecord::into_place)
        .collect()
}

impl From<ReverseRecord> for Area {
    fn from(record: ReverseRecord) -> Self {
        let address = record.address.unwrap_or_default();
        Area {
            city: address.locality().unwrap_or_default().to_string(),
            state: address.region().unwrap_or_default().to_string(),
        }
    }
}
