use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT_LANGUAGE, CACHE_CONTROL, PRAGMA};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use super::nominatim::{Area, ReverseRecord, places_from_search};
use super::{PlaceSource, bundled_places, normalize_query, parse_dataset};
use crate::config::SourcesConfig;
use crate::error::ExplorerError;
use crate::models::{Coordinate, Place};

/// Place source backed by a hosted curated dataset and a Nominatim-compatible geocoder.
///
/// Each call is one independent attempt: no caching, no retry.
pub struct HttpPlaceSource {
    client: Client,
    /// `None` serves the bundled dataset instead
    dataset_url: Option<String>,
    search_base_url: String,
    accept_language: String,
    search_limit: u32,
}

impl HttpPlaceSource {
    pub fn new(config: &SourcesConfig) -> Result<Self, ExplorerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ExplorerError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            dataset_url: config.dataset_url.clone().filter(|url| !url.is_empty()),
            search_base_url: config.search_base_url.trim_end_matches('/').to_string(),
            accept_language: config.accept_language.clone(),
            search_limit: config.search_limit,
        })
    }

    /// Fetch the curated dataset, bypassing any HTTP cache.
    #[instrument(skip(self))]
    pub async fn fetch_dataset(&self) -> Result<Vec<Place>, ExplorerError> {
        let Some(url) = &self.dataset_url else {
            debug!("No dataset URL configured, using bundled dataset");
            return bundled_places();
        };

        let start_time = Instant::now();
        let body = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let places = parse_dataset(&body)?;
        info!(
            "Loaded {} curated places in {:.3}s",
            places.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(places)
    }

    /// Text search against the geocoder's `/search` endpoint.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Place>, ExplorerError> {
        let url = format!(
            "{}/search?format=json&addressdetails=1&limit={}&q={}",
            self.search_base_url,
            self.search_limit,
            urlencoding::encode(query)
        );
        debug!("Geocoding search URL: {}", url);

        let start_time = Instant::now();
        let records: Vec<Value> = self
            .client
            .get(&url)
            .header(ACCEPT_LANGUAGE, self.accept_language.as_str())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let total = records.len();
        let places = places_from_search(records);

        if places.len() < total {
            debug!(
                "Skipped {} unusable search records",
                total - places.len()
            );
        }
        info!(
            "Found {} places for '{}' in {:.3}s",
            places.len(),
            query,
            start_time.elapsed().as_secs_f64()
        );
        Ok(places)
    }

    /// City/state lookup against the geocoder's `/reverse` endpoint.
    #[instrument(skip(self))]
    pub async fn fetch_area(&self, at: &Coordinate) -> Result<Area, ExplorerError> {
        let url = format!(
            "{}/reverse?format=json&lat={}&lon={}&zoom=10&addressdetails=1",
            self.search_base_url, at.lat, at.lon
        );

        let record: ReverseRecord = self
            .client
            .get(&url)
            .header(ACCEPT_LANGUAGE, self.accept_language.as_str())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(Area::from(record))
    }
}

#[async_trait]
impl PlaceSource for HttpPlaceSource {
    async fn resolve_places(&self, query: Option<&str>) -> Vec<Place> {
        let result = match normalize_query(query) {
            Some(query) => self.search(query).await,
            None => self.fetch_dataset().await,
        };

        result.unwrap_or_else(|e| {
            warn!("Place source failed, returning no results: {}", e);
            Vec::new()
        })
    }

    async fn find_place(&self, id: &str) -> Option<Place> {
        match self.fetch_dataset().await {
            Ok(places) => places.into_iter().find(|place| place.matches_id(id)),
            Err(e) => {
                warn!("Failed to load dataset for place '{}': {}", id, e);
                None
            }
        }
    }

    async fn reverse_geocode(&self, at: &Coordinate) -> Option<Area> {
        self.fetch_area(at)
            .await
            .inspect_err(|e| {
                warn!(
                    "Reverse geocoding failed for {}: {}",
                    at.format_coordinates(),
                    e
                );
            })
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExplorerConfig;

    #[test]
    fn test_client_creation() {
        let mut config = ExplorerConfig::default().sources;
        config.search_base_url = "https://geocoder.example/".to_string();
        config.dataset_url = Some(String::new());

        let source = HttpPlaceSource::new(&config).unwrap();
        assert_eq!(source.search_base_url, "https://geocoder.example");
        assert_eq!(source.dataset_url, None);
        assert_eq!(source.search_limit, 20);
        assert_eq!(source.accept_language, "en");
    }

    #[tokio::test]
    async fn test_without_dataset_url_serves_bundled_places() {
        let mut config = ExplorerConfig::default().sources;
        config.dataset_url = None;
        // Unroutable: any geocoding call would fail and return nothing.
        config.search_base_url = "http://127.0.0.1:9".to_string();

        let source = HttpPlaceSource::new(&config).unwrap();
        let places = source.resolve_places(None).await;
        assert_eq!(places, bundled_places().unwrap());
    }
}
