//! Commute dashboard backend
//!
//! Proxies a weather provider and a geocoding/directions provider behind a
//! small JSON API and serves the dashboard page.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod location_resolver;
pub mod logging;
pub mod maps;
pub mod models;
pub mod page;
pub mod routing;
pub mod traffic;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::AppConfig;
pub use error::DashboardError;
pub use maps::{GoogleMapsClient, MapsProvider};
pub use models::{AddressQuery, GeoLocation, TrafficSummary, WeatherReport};
pub use weather::{OpenWeatherClient, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DashboardError>;
