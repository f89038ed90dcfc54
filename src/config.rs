//! Configuration management for the commute dashboard
//!
//! Settings are layered from serde defaults, an optional TOML file,
//! `DASHBOARD_`-prefixed environment variables and finally the bare
//! variables the dashboard has always honoured (`PORT`, `WEATHER_API_KEY`, ...).
//! The resulting [`AppConfig`] is immutable and shared with request handlers.

use crate::DashboardError;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

/// Bare environment variables mapped onto configuration keys
const ENV_OVERRIDES: [(&str, &str); 6] = [
    ("PORT", "server.port"),
    ("WEATHER_API_KEY", "settings.weather_api_key"),
    ("TRAFFIC_API_KEY", "settings.traffic_api_key"),
    ("HOME_ADDRESS", "settings.home_address"),
    ("WORK_ADDRESS", "settings.work_address"),
    ("DARK_MODE", "settings.dark_mode"),
];

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener
    pub server: ServerConfig,
    /// Dashboard settings exposed to the page
    pub settings: DashboardSettings,
    /// Weather provider
    pub weather: WeatherConfig,
    /// Geocoding and directions provider
    pub maps: MapsConfig,
    /// Outbound HTTP client
    pub http: HttpConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// The options the dashboard page is rendered with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub home_address: String,
    pub work_address: String,
    pub dark_mode: bool,
    /// Used when a weather request carries no `api_key`
    pub weather_api_key: String,
    /// Used when a traffic request carries no `api_key`
    pub traffic_api_key: String,
}

/// Weather provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Base URL of the OpenWeatherMap data API
    pub base_url: String,
    /// Language of the condition descriptions
    pub language: String,
    /// Latitude used when a request omits `lat`
    pub default_latitude: f64,
    /// Longitude used when a request omits `lon`
    pub default_longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapsConfig {
    /// Base URL of the Google Maps web services
    pub base_url: String,
}

/// Outbound HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    pub user_agent: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty, compact or json)
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            language: "pt_br".to_string(),
            // São Paulo
            default_latitude: -23.5505,
            default_longitude: -46.6333,
        }
    }
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com/maps/api".to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: format!("commute-dashboard/{}", crate::VERSION),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl ServerConfig {
    /// Socket address string the listener binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    /// Load configuration from the process environment and the default file
    pub fn load() -> Result<Self> {
        let vars: Map<String, String> = std::env::vars().collect();
        // an explicitly named file must exist, the default one is optional
        let path = match vars.get("DASHBOARD_CONFIG") {
            Some(explicit) => Some(PathBuf::from(explicit)),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            }
        };
        Self::load_from(path.as_deref(), vars)
    }

    /// Load configuration from an optional file and an explicit variable set
    pub fn load_from(config_path: Option<&Path>, vars: Map<String, String>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix("DASHBOARD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(Some(vars.clone())),
        );

        for (var, key) in ENV_OVERRIDES {
            builder = builder
                .set_override_option(key, vars.get(var).cloned())
                .with_context(|| format!("Failed to apply {var}"))?;
        }

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(DashboardError::config("Server port cannot be 0").into());
        }

        if self.http.timeout_seconds == 0 || self.http.timeout_seconds > 300 {
            return Err(DashboardError::config(
                "HTTP timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if !(-90.0..=90.0).contains(&self.weather.default_latitude) {
            return Err(DashboardError::config(
                "Default latitude must be between -90 and 90",
            )
            .into());
        }

        if !(-180.0..=180.0).contains(&self.weather.default_longitude) {
            return Err(DashboardError::config(
                "Default longitude must be between -180 and 180",
            )
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "compact", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(DashboardError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Weather", &self.weather.base_url),
            ("Maps", &self.maps.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(DashboardError::config(format!(
                    "{name} API base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
