//! Current-weather lookup

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::models::WeatherReport;
use crate::{DashboardError, Result};

pub mod open_weather;

pub use open_weather::OpenWeatherClient;

/// Source of current weather conditions
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, latitude: f64, longitude: f64, api_key: &str) -> Result<WeatherReport>;
}

/// Fetch the current conditions at a coordinate pair
#[instrument(skip(provider, api_key))]
pub async fn current_weather(
    provider: &dyn WeatherProvider,
    latitude: f64,
    longitude: f64,
    api_key: &str,
) -> Result<WeatherReport> {
    if api_key.is_empty() {
        return Err(DashboardError::missing_parameter(
            "Weather API key is not configured",
        ));
    }

    let report = provider.current(latitude, longitude, api_key).await?;
    debug!(
        city = %report.city,
        temp = %report.format_temperature(),
        "Weather lookup complete"
    );
    Ok(report)
}
