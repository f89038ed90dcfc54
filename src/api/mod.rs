use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::{
    DashboardError,
    config::AppConfig,
    http,
    maps::{GoogleMapsClient, MapsProvider},
    models::{AddressQuery, TrafficSummary, WeatherReport},
    page, traffic,
    weather::{self, OpenWeatherClient, WeatherProvider},
};

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub maps: Arc<dyn MapsProvider>,
    pub weather: Arc<dyn WeatherProvider>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: AppConfig,
        maps: Arc<dyn MapsProvider>,
        weather: Arc<dyn WeatherProvider>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            maps,
            weather,
        }
    }

    /// Wire the production provider clients from configuration
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let client = http::build_client(&config.http)?;
        let maps = GoogleMapsClient::new(client.clone(), &config.maps);
        let weather = OpenWeatherClient::new(client, &config.weather);
        Ok(Self::new(config, Arc::new(maps), Arc::new(weather)))
    }
}

/// Raw weather query; unparsable coordinates fall back to the defaults
#[derive(Debug, Deserialize)]
pub struct WeatherParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrafficParams {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub api_key: Option<String>,
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            warn!("Request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/weather", get(get_weather))
        .route("/traffic", get(get_traffic))
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(page::render_index(&state.config.settings))
}

fn coordinate_or(raw: Option<&str>, default: f64) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(default)
}

async fn get_weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherParams>,
) -> Result<Json<WeatherReport>, DashboardError> {
    let defaults = &state.config.weather;
    let latitude = coordinate_or(params.lat.as_deref(), defaults.default_latitude);
    let longitude = coordinate_or(params.lon.as_deref(), defaults.default_longitude);
    let api_key = params
        .api_key
        .unwrap_or_else(|| state.config.settings.weather_api_key.clone());

    let report = weather::current_weather(state.weather.as_ref(), latitude, longitude, &api_key)
        .await?;
    Ok(Json(report))
}

async fn get_traffic(
    State(state): State<AppState>,
    Query(params): Query<TrafficParams>,
) -> Result<Json<TrafficSummary>, DashboardError> {
    let api_key = params
        .api_key
        .unwrap_or_else(|| state.config.settings.traffic_api_key.clone());
    let query = AddressQuery::new(
        params.origin.unwrap_or_default(),
        params.destination.unwrap_or_default(),
    );

    let summary = traffic::lookup(state.maps.as_ref(), &query, &api_key).await?;
    Ok(Json(summary))
}
