//! Simplified current-weather report served to the dashboard

use serde::{Deserialize, Serialize};

/// Current conditions at a coordinate pair
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherReport {
    /// City name reported by the provider
    pub city: String,
    /// Temperature in whole degrees Celsius
    pub temp: i64,
    pub temp_min: i64,
    pub temp_max: i64,
    /// Relative humidity in percent
    pub humidity: u32,
    /// Wind speed in km/h, one decimal place
    pub wind_speed: f64,
    /// Human-readable description of weather conditions
    pub description: String,
    /// Weather condition icon ID from the provider
    pub icon: String,
}

impl WeatherReport {
    /// Round a Celsius reading to whole degrees, ties to even
    #[must_use]
    pub fn round_temperature(celsius: f64) -> i64 {
        celsius.round_ties_even() as i64
    }

    /// Convert wind speed from m/s to km/h with one decimal place
    #[must_use]
    pub fn wind_speed_kmh(meters_per_second: f64) -> f64 {
        (meters_per_second * 3.6 * 10.0).round() / 10.0
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}°C", self.temp)
    }
}
