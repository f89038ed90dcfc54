//! Error types and handling for the commute dashboard

use thiserror::Error;

/// Main error type for the dashboard backend
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A required request parameter or API key is absent
    #[error("{message}")]
    MissingParameter { message: String },

    /// Transport, HTTP status or decoding failure while talking to a provider
    #[error("Provider request failed: {message}")]
    ProviderRequestFailed { message: String },

    /// The geocoding provider could not resolve an address
    #[error("Could not geocode '{address}': {message}")]
    GeocodeFailed { address: String, message: String },

    /// The directions provider answered with a non-OK status
    #[error("Directions request failed: {message}")]
    DirectionsFailed { message: String },

    /// The directions provider answered OK but without a usable route
    #[error("No route found between the given addresses")]
    NoRouteFound,

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl DashboardError {
    /// Create a new missing-parameter error
    pub fn missing_parameter<S: Into<String>>(message: S) -> Self {
        Self::MissingParameter {
            message: message.into(),
        }
    }

    /// Create a new provider request error
    pub fn provider<S: Into<String>>(message: S) -> Self {
        Self::ProviderRequestFailed {
            message: message.into(),
        }
    }

    pub fn geocode<A: Into<String>, S: Into<String>>(address: A, message: S) -> Self {
        Self::GeocodeFailed {
            address: address.into(),
            message: message.into(),
        }
    }

    pub fn directions<S: Into<String>>(message: S) -> Self {
        Self::DirectionsFailed {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status code reported to API callers
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            DashboardError::MissingParameter { .. }
            | DashboardError::GeocodeFailed { .. }
            | DashboardError::DirectionsFailed { .. }
            | DashboardError::NoRouteFound => 400,
            DashboardError::ProviderRequestFailed { .. } | DashboardError::Config { .. } => 500,
        }
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        // request URLs carry the provider key as a query parameter
        Self::provider(err.without_url().to_string())
    }
}
