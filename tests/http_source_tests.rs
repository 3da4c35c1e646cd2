//! HttpPlaceSource against an in-process fixture geocoder

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use heritage_explorer::config::SourcesConfig;
use heritage_explorer::{Area, Coordinate, HttpPlaceSource, PlaceSource};

const DATASET: &str = r#"[
  {"id": "red-fort", "name": "Red Fort", "city": "Delhi", "state": "Delhi",
   "lat": 28.6562, "lon": 77.2410, "history": "Built in 1639.", "significance": "UNESCO site.",
   "nearby": ["Chandni Chowk"], "image": "/images/red-fort.jpg"},
  {"id": "taj-mahal", "name": "Taj Mahal", "city": "Agra", "lat": 27.1751, "lon": 78.0421}
]"#;

const SEARCH: &str = r#"[
  {"place_id": 101, "display_name": "Red Fort, Old Delhi, Delhi, India",
   "lat": "28.6562", "lon": "77.2410", "address": {"state": "Delhi"}},
  {"place_id": 102, "display_name": "Lal Qila, Agra, Uttar Pradesh, India",
   "lat": "27.1795", "lon": "78.0211", "address": {"city": "Agra", "state": "Uttar Pradesh"}},
  {"place_id": 103, "display_name": "Nowhere", "lat": "not-a-number", "lon": "0"}
]"#;

const MIXED_SEARCH: &str = r#"[
  {"place_id": 101, "display_name": "Red Fort, Old Delhi, Delhi, India",
   "lat": "28.6562", "lon": "77.2410", "address": {"state": "Delhi"}},
  {"place_id": 2, "display_name": 42, "lat": "27.17", "lon": "78.04"}
]"#;

type Seen = Arc<Mutex<Vec<(String, HeaderMap, HashMap<String, String>)>>>;

async fn dataset(State(seen): State<Seen>, headers: HeaderMap) -> Response {
    seen.lock()
        .unwrap()
        .push(("dataset".to_string(), headers, HashMap::new()));
    DATASET.into_response()
}

async fn search(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let q = params.get("q").cloned().unwrap_or_default();
    seen.lock()
        .unwrap()
        .push(("search".to_string(), headers, params));
    match q.as_str() {
        "broken" => "[{\"place_id\": ".into_response(),
        "down" => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        "mixed" => MIXED_SEARCH.into_response(),
        _ => SEARCH.into_response(),
    }
}

async fn reverse(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("lat").map(String::as_str) == Some("0") {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    r#"{"address": {"city": "New Delhi", "state": "Delhi"}}"#.into_response()
}

async fn start_fixture() -> (SocketAddr, Seen) {
    let seen: Seen = Arc::default();
    let app = Router::new()
        .route("/places.json", get(dataset))
        .route("/search", get(search))
        .route("/reverse", get(reverse))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, seen)
}

fn config_for(addr: SocketAddr) -> SourcesConfig {
    SourcesConfig {
        dataset_url: Some(format!("http://{addr}/places.json")),
        search_base_url: format!("http://{addr}"),
        timeout_seconds: 5,
        ..SourcesConfig::default()
    }
}

#[tokio::test]
async fn test_empty_query_fetches_dataset_without_cache() {
    let (addr, seen) = start_fixture().await;
    let source = HttpPlaceSource::new(&config_for(addr)).unwrap();

    let places = source.resolve_places(Some("  ")).await;

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].id, "red-fort");
    assert_eq!(places[0].nearby, vec!["Chandni Chowk"]);
    assert_eq!(places[1].history, "");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (kind, headers, _) = &seen[0];
    assert_eq!(kind, "dataset");
    assert_eq!(headers["cache-control"], "no-cache");
    assert_eq!(headers["pragma"], "no-cache");
}

#[tokio::test]
async fn test_query_uses_geocoder() {
    let (addr, seen) = start_fixture().await;
    let source = HttpPlaceSource::new(&config_for(addr)).unwrap();

    let places = source.resolve_places(Some("red fort")).await;

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].id, "101");
    assert_eq!(places[0].name, "Red Fort");
    assert_eq!(places[0].city, "Delhi");
    assert_eq!(places[1].name, "Lal Qila");
    assert_eq!(places[1].city, "Agra");
    assert_eq!(places[1].state.as_deref(), Some("Uttar Pradesh"));

    let seen = seen.lock().unwrap();
    let (kind, headers, params) = &seen[0];
    assert_eq!(kind, "search");
    assert_eq!(headers["accept-language"], "en");
    assert_eq!(params["q"], "red fort");
    assert_eq!(params["limit"], "20");
    assert_eq!(params["format"], "json");
    assert_eq!(params["addressdetails"], "1");
}

#[tokio::test]
async fn test_malformed_or_failed_search_is_empty() {
    let (addr, _) = start_fixture().await;
    let source = HttpPlaceSource::new(&config_for(addr)).unwrap();

    assert!(source.resolve_places(Some("broken")).await.is_empty());
    assert!(source.resolve_places(Some("down")).await.is_empty());
}

#[tokio::test]
async fn test_badly_typed_record_keeps_the_batch() {
    let (addr, _) = start_fixture().await;
    let source = HttpPlaceSource::new(&config_for(addr)).unwrap();

    let places = source.resolve_places(Some("mixed")).await;

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].name, "Red Fort");
    assert_eq!(places[1].id, "2");
    assert_eq!(places[1].name, "Unknown Place");
    assert_eq!(places[1].city, "Unknown");
}

#[tokio::test]
async fn test_unreachable_host_is_empty() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = HttpPlaceSource::new(&config_for(addr)).unwrap();

    assert!(source.resolve_places(None).await.is_empty());
    assert!(source.resolve_places(Some("agra")).await.is_empty());
    assert!(source.find_place("red-fort").await.is_none());
    assert!(source.reverse_geocode(&Coordinate::new(28.6, 77.2)).await.is_none());
}

#[tokio::test]
async fn test_find_place_by_slug() {
    let (addr, _) = start_fixture().await;
    let source = HttpPlaceSource::new(&config_for(addr)).unwrap();

    let place = source.find_place("taj-mahal").await.unwrap();
    assert_eq!(place.city, "Agra");
    assert!(source.find_place("missing").await.is_none());
}

#[tokio::test]
async fn test_reverse_geocode() {
    let (addr, _) = start_fixture().await;
    let source = HttpPlaceSource::new(&config_for(addr)).unwrap();

    let area = source
        .reverse_geocode(&Coordinate::new(28.6139, 77.2090))
        .await;
    assert_eq!(
        area,
        Some(Area {
            city: "New Delhi".to_string(),
            state: "Delhi".to_string()
        })
    );
    assert!(source.reverse_geocode(&Coordinate::new(0.0, 0.0)).await.is_none());
}
