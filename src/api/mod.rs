use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    ExplorerError,
    models::{Coordinate, DiscoveredPlace, Place},
    session::{DiscoveryMode, DiscoverySession},
    sources::PlaceSource,
    tags::owned_tags_for_city,
};

/// Shared, immutable handler state
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn PlaceSource>,
    pub page_size: usize,
}

impl AppState {
    pub fn new(source: Arc<dyn PlaceSource>, page_size: usize) -> Self {
        Self { source, page_size }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PlacesParams {
    pub query: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub page: Option<usize>,
    pub mode: Option<DiscoveryMode>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlacesResponse {
    pub places: Vec<DiscoveredPlace>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
pub struct TagsParams {
    pub city: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TagsResponse {
    pub city: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AreaParams {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AreaResponse {
    pub city: String,
    pub state: String,
    pub tags: Vec<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ExplorerError {
    fn into_response(self) -> Response {
        let status = match self {
            ExplorerError::Validation { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/places", get(get_places))
        .route("/places/{id}", get(get_place))
        .route("/tags", get(get_tags))
        .route("/area", get(get_area))
        .with_state(state)
}

/// Both or neither of `lat`/`lon`; anything else is a validation error.
fn coordinate_from(lat: Option<f64>, lon: Option<f64>) -> Result<Option<Coordinate>, ExplorerError> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Coordinate::checked(lat, lon).map(Some),
        (None, None) => Ok(None),
        _ => Err(ExplorerError::validation(
            "Both lat and lon are required for location ranking",
        )),
    }
}

async fn get_places(
    State(state): State<AppState>,
    Query(params): Query<PlacesParams>,
) -> Result<Json<PlacesResponse>, ExplorerError> {
    let coordinate = coordinate_from(params.lat, params.lon)?;
    let mut session =
        DiscoverySession::new(state.page_size, params.mode.unwrap_or_default());

    let ticket = session.set_query(params.query.unwrap_or_default());
    let places = ticket.run(state.source.as_ref()).await;
    session.complete_fetch(&ticket, places);
    session.set_coordinate(coordinate);

    let requested = params.page.unwrap_or(1);
    while session.page() < requested && session.load_more() {}

    debug!(
        "Serving page {} of '{}' ({} candidates)",
        session.page(),
        session.query(),
        session.total()
    );

    Ok(Json(PlacesResponse {
        places: session.visible(),
        total: session.total(),
        page: session.page(),
        page_size: state.page_size,
        has_more: session.has_more(),
    }))
}

async fn get_place(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Place>, StatusCode> {
    state
        .source
        .find_place(&id)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_tags(Query(params): Query<TagsParams>) -> Json<TagsResponse> {
    let tags = owned_tags_for_city(params.city.as_deref());
    Json(TagsResponse {
        city: params.city,
        tags,
    })
}

async fn get_area(
    State(state): State<AppState>,
    Query(params): Query<AreaParams>,
) -> Result<Response, ExplorerError> {
    let Some(at) = coordinate_from(params.lat, params.lon)? else {
        return Err(ExplorerError::validation("lat and lon are required"));
    };

    let response = match state.source.reverse_geocode(&at).await {
        Some(area) => {
            let tags = owned_tags_for_city(Some(area.city.as_str()));
            Json(AreaResponse {
                city: area.city,
                state: area.state,
                tags,
            })
            .into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    };
    Ok(response)
}
