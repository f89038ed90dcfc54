//! HTTP-level tests driving the full router with in-memory providers

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use commute_dashboard::maps::{
    DirectionsResponse, GeocodeResponse, GeocodeResult, Geometry, LatLng, Leg, Route, TextValue,
};
use commute_dashboard::{
    AppConfig, AppState, DashboardError, GeoLocation, MapsProvider, WeatherProvider,
    WeatherReport, web,
};
use serde_json::{Value, json};
use tower::ServiceExt;

#[derive(Default)]
struct StubMaps {
    geocodes: HashMap<String, GeocodeResponse>,
    directions: Option<DirectionsResponse>,
    calls: AtomicUsize,
}

#[async_trait]
impl MapsProvider for StubMaps {
    async fn geocode(
        &self,
        address: &str,
        _api_key: &str,
    ) -> commute_dashboard::Result<GeocodeResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.geocodes
            .get(address)
            .cloned()
            .ok_or_else(|| DashboardError::provider("connection refused"))
    }

    async fn directions(
        &self,
        _origin: &GeoLocation,
        _destination: &GeoLocation,
        _api_key: &str,
    ) -> commute_dashboard::Result<DirectionsResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.directions
            .clone()
            .ok_or_else(|| DashboardError::provider("connection refused"))
    }
}

/// Echoes the requested coordinates back through the city name
#[derive(Default)]
struct StubWeather {
    keys: std::sync::Mutex<Vec<String>>,
}

#[async_trait]
impl WeatherProvider for StubWeather {
    async fn current(
        &self,
        latitude: f64,
        longitude: f64,
        api_key: &str,
    ) -> commute_dashboard::Result<WeatherReport> {
        if let Ok(mut keys) = self.keys.lock() {
            keys.push(api_key.to_string());
        }
        if api_key == "broken" {
            return Err(DashboardError::provider("HTTP status client error (401 Unauthorized)"));
        }
        Ok(WeatherReport {
            city: format!("{latitude},{longitude}"),
            temp: 24,
            temp_min: 19,
            temp_max: 27,
            humidity: 64,
            wind_speed: 9.4,
            description: "poucas nuvens".to_string(),
            icon: "02d".to_string(),
        })
    }
}

fn geocode_ok(lat: f64, lng: f64) -> GeocodeResponse {
    GeocodeResponse {
        status: "OK".to_string(),
        results: vec![GeocodeResult {
            formatted_address: None,
            geometry: Geometry {
                location: LatLng { lat, lng },
            },
        }],
        error_message: None,
    }
}

fn guarulhos_directions() -> DirectionsResponse {
    DirectionsResponse {
        status: "OK".to_string(),
        routes: vec![Route {
            summary: Some("Rod. Ayrton Senna".to_string()),
            legs: vec![Leg {
                distance: TextValue {
                    text: "30 km".to_string(),
                    value: 30_000,
                },
                duration: TextValue {
                    text: "50 mins".to_string(),
                    value: 3000,
                },
                duration_in_traffic: Some(TextValue {
                    text: "1 hour".to_string(),
                    value: 3600,
                }),
            }],
        }],
        error_message: None,
    }
}

fn stub_maps() -> StubMaps {
    let mut maps = StubMaps::default();
    maps.geocodes.insert(
        "Av. Paulista, São Paulo".to_string(),
        geocode_ok(-23.561, -46.655),
    );
    maps.geocodes.insert(
        "Aeroporto de Guarulhos".to_string(),
        geocode_ok(-23.434, -46.481),
    );
    maps.directions = Some(guarulhos_directions());
    maps
}

struct Harness {
    state: AppState,
    maps: Arc<StubMaps>,
    weather: Arc<StubWeather>,
}

fn harness(config: AppConfig, maps: StubMaps) -> Harness {
    let maps = Arc::new(maps);
    let weather = Arc::new(StubWeather::default());
    let state = AppState::new(config, maps.clone(), weather.clone());
    Harness {
        state,
        maps,
        weather,
    }
}

async fn get(state: AppState, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = web::app(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(state: AppState, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(state, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn traffic_lookup_returns_summary() {
    let h = harness(AppConfig::default(), stub_maps());

    let (status, body) = get_json(
        h.state,
        "/api/traffic?origin=Av.%20Paulista%2C%20S%C3%A3o%20Paulo&destination=Aeroporto%20de%20Guarulhos&api_key=key",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "origin": "Av. Paulista, São Paulo",
            "destination": "Aeroporto de Guarulhos",
            "duration": 60,
            "normal_duration": 50,
            "distance": "30 km",
            "summary": "50 mins"
        })
    );
}

#[tokio::test]
async fn traffic_uses_configured_key_when_absent() {
    let mut config = AppConfig::default();
    config.settings.traffic_api_key = "configured".to_string();
    let h = harness(config, stub_maps());

    let (status, _) = get_json(
        h.state,
        "/api/traffic?origin=Av.%20Paulista%2C%20S%C3%A3o%20Paulo&destination=Aeroporto%20de%20Guarulhos",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn traffic_without_key_is_bad_request() {
    let h = harness(AppConfig::default(), stub_maps());

    let (status, body) = get_json(
        h.state,
        "/api/traffic?origin=Av.%20Paulista%2C%20S%C3%A3o%20Paulo&destination=Aeroporto%20de%20Guarulhos",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Traffic API key is not configured");
    assert_eq!(h.maps.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn traffic_without_destination_is_bad_request() {
    let h = harness(AppConfig::default(), stub_maps());

    let (status, body) = get_json(h.state, "/api/traffic?origin=Centro&api_key=key").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Origin and destination addresses are required");
    assert_eq!(h.maps.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn traffic_geocode_failure_is_bad_request() {
    let mut maps = stub_maps();
    maps.geocodes.insert(
        "Lugar Nenhum".to_string(),
        GeocodeResponse {
            status: "ZERO_RESULTS".to_string(),
            results: Vec::new(),
            error_message: None,
        },
    );
    let h = harness(AppConfig::default(), maps);

    let (status, body) = get_json(
        h.state,
        "/api/traffic?origin=Lugar%20Nenhum&destination=Aeroporto%20de%20Guarulhos&api_key=key",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Lugar Nenhum"));
}

#[tokio::test]
async fn traffic_without_routes_is_bad_request() {
    let mut maps = stub_maps();
    maps.directions = Some(DirectionsResponse {
        status: "OK".to_string(),
        routes: Vec::new(),
        error_message: None,
    });
    let h = harness(AppConfig::default(), maps);

    let (status, body) = get_json(
        h.state,
        "/api/traffic?origin=Av.%20Paulista%2C%20S%C3%A3o%20Paulo&destination=Aeroporto%20de%20Guarulhos&api_key=key",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No route found between the given addresses");
}

#[tokio::test]
async fn traffic_transport_failure_is_server_error() {
    let mut maps = stub_maps();
    maps.directions = None;
    let h = harness(AppConfig::default(), maps);

    let (status, body) = get_json(
        h.state,
        "/api/traffic?origin=Av.%20Paulista%2C%20S%C3%A3o%20Paulo&destination=Aeroporto%20de%20Guarulhos&api_key=key",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn weather_defaults_to_sao_paulo() {
    let h = harness(AppConfig::default(), StubMaps::default());

    let (status, body) = get_json(h.state, "/api/weather?api_key=key").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "-23.5505,-46.6333");
    assert_eq!(body["temp"], 24);
    assert_eq!(body["wind_speed"], 9.4);
}

#[tokio::test]
async fn weather_invalid_coordinates_fall_back() {
    let h = harness(AppConfig::default(), StubMaps::default());

    let (status, body) = get_json(h.state, "/api/weather?lat=abc&lon=-43.2&api_key=key").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "-23.5505,-43.2");
}

#[tokio::test]
async fn weather_uses_configured_key() {
    let mut config = AppConfig::default();
    config.settings.weather_api_key = "from-env".to_string();
    let h = harness(config, StubMaps::default());

    let (status, _) = get_json(h.state, "/api/weather").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(*h.weather.keys.lock().unwrap(), vec!["from-env".to_string()]);
}

#[tokio::test]
async fn weather_without_key_is_bad_request() {
    let h = harness(AppConfig::default(), StubMaps::default());

    let (status, body) = get_json(h.state, "/api/weather").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Weather API key is not configured");
    assert!(h.weather.keys.lock().unwrap().is_empty());
}

#[tokio::test]
async fn weather_provider_failure_is_server_error() {
    let h = harness(AppConfig::default(), StubMaps::default());

    let (status, body) = get_json(h.state, "/api/weather?api_key=broken").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("401"));
}

#[tokio::test]
async fn index_page_embeds_settings() {
    let mut config = AppConfig::default();
    config.settings.home_address = "Rua Augusta, 100".to_string();
    config.settings.dark_mode = true;
    let h = harness(config, StubMaps::default());

    let (status, body) = get(h.state, web::INDEX_PATH).await;
    let html = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#""home_address":"Rua Augusta, 100""#));
    assert!(html.contains(r#"class="dark""#));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let h = harness(AppConfig::default(), StubMaps::default());

    let (status, _) = get(h.state, "/api/unknown").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
