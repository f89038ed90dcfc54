//! Data models for the commute dashboard
//!
//! - Location: geocoded coordinates
//! - Traffic: address queries and the normalized traffic summary
//! - Weather: the simplified current-weather report

pub mod location;
pub mod traffic;
pub mod weather;

pub use location::GeoLocation;
pub use traffic::{AddressQuery, TrafficSummary};
pub use weather::WeatherReport;
