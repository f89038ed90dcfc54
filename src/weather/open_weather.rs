//! OpenWeatherMap current-weather client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::WeatherProvider;
use crate::config::WeatherConfig;
use crate::models::WeatherReport;
use crate::{DashboardError, Result};

/// City name used when the provider does not report one
pub const UNKNOWN_CITY: &str = "Unknown location";

pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    language: String,
}

impl OpenWeatherClient {
    #[must_use]
    pub fn new(client: Client, config: &WeatherConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[instrument(skip(self, api_key))]
    async fn current(&self, latitude: f64, longitude: f64, api_key: &str) -> Result<WeatherReport> {
        debug!("Calling the weather API");
        let url = format!("{}/weather", self.base_url);
        let latitude = latitude.to_string();
        let longitude = longitude.to_string();

        let response = self
            .client
            .get(url)
            .query(&[
                ("lat", latitude.as_str()),
                ("lon", longitude.as_str()),
                ("appid", api_key),
                ("units", "metric"),
                ("lang", self.language.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: CurrentWeatherResponse = response.json().await?;
        WeatherReport::from_openweather(body)
    }
}

/// Current weather response from OpenWeatherMap (metric units)
#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub name: Option<String>,
    pub main: MainReadings,
    pub wind: Wind,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u32,
}

#[derive(Debug, Deserialize)]
pub struct Wind {
    /// Meters per second
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct Condition {
    pub description: String,
    pub icon: String,
}

impl WeatherReport {
    /// Create a report from an OpenWeatherMap response
    pub fn from_openweather(response: CurrentWeatherResponse) -> Result<Self> {
        let condition = response.weather.into_iter().next().ok_or_else(|| {
            DashboardError::provider("Weather response contained no conditions")
        })?;

        Ok(Self {
            city: response
                .name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| UNKNOWN_CITY.to_string()),
            temp: Self::round_temperature(response.main.temp),
            temp_min: Self::round_temperature(response.main.temp_min),
            temp_max: Self::round_temperature(response.main.temp_max),
            humidity: response.main.humidity,
            wind_speed: Self::wind_speed_kmh(response.wind.speed),
            description: condition.description,
            icon: condition.icon,
        })
    }
}
