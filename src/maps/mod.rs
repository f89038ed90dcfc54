//! Geocoding and directions provider abstraction
//!
//! The orchestrator only sees the provider's JSON envelope (status plus
//! results), so status interpretation stays in one place regardless of
//! which client produced the response.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::models::GeoLocation;

pub mod google;

pub use google::GoogleMapsClient;

/// Status value the provider uses for a successful response
pub const STATUS_OK: &str = "OK";

/// Geocoding and directions backend
#[async_trait]
pub trait MapsProvider: Send + Sync {
    /// Resolve a free-text address
    async fn geocode(&self, address: &str, api_key: &str) -> Result<GeocodeResponse>;

    /// Route between two coordinates, departing now, with traffic estimates
    async fn directions(
        &self,
        origin: &GeoLocation,
        destination: &GeoLocation,
        api_key: &str,
    ) -> Result<DirectionsResponse>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: Option<String>,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for GeoLocation {
    fn from(value: LatLng) -> Self {
        GeoLocation::new(value.lat, value.lng)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub routes: Vec<Route>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub summary: Option<String>,
    #[serde(default)]
    pub legs: Vec<Leg>,
}

/// One origin-to-destination segment of a route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leg {
    pub distance: TextValue,
    pub duration: TextValue,
    /// Only present when a departure time was requested and traffic data exists
    pub duration_in_traffic: Option<TextValue>,
}

/// Provider quantity: formatted text plus raw value (meters or seconds)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: u64,
}

impl GeocodeResponse {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

impl DirectionsResponse {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory provider used by unit tests

    use super::*;
    use crate::DashboardError;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    pub struct FakeMaps {
        pub geocodes: HashMap<String, GeocodeResponse>,
        pub directions: Option<DirectionsResponse>,
        pub calls: AtomicUsize,
        pub directions_requests: Mutex<Vec<(GeoLocation, GeoLocation)>>,
    }

    impl FakeMaps {
        pub fn with_geocode(mut self, address: &str, lat: f64, lng: f64) -> Self {
            self.geocodes.insert(address.to_string(), geocode_ok(lat, lng));
            self
        }

        pub fn with_geocode_status(mut self, address: &str, status: &str, message: Option<&str>) -> Self {
            self.geocodes.insert(
                address.to_string(),
                GeocodeResponse {
                    status: status.to_string(),
                    results: Vec::new(),
                    error_message: message.map(str::to_string),
                },
            );
            self
        }

        pub fn with_directions(mut self, response: DirectionsResponse) -> Self {
            self.directions = Some(response);
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    pub fn geocode_ok(lat: f64, lng: f64) -> GeocodeResponse {
        GeocodeResponse {
            status: STATUS_OK.to_string(),
            results: vec![GeocodeResult {
                formatted_address: None,
                geometry: Geometry {
                    location: LatLng { lat, lng },
                },
            }],
            error_message: None,
        }
    }

    pub fn leg(traffic_seconds: Option<u64>, seconds: u64, distance: &str) -> Leg {
        Leg {
            distance: TextValue {
                text: distance.to_string(),
                value: 0,
            },
            duration: TextValue {
                text: format!("{} mins", seconds / 60),
                value: seconds,
            },
            duration_in_traffic: traffic_seconds.map(|value| TextValue {
                text: format!("{} mins", value / 60),
                value,
            }),
        }
    }

    pub fn directions_ok(legs: Vec<Leg>) -> DirectionsResponse {
        DirectionsResponse {
            status: STATUS_OK.to_string(),
            routes: vec![Route {
                summary: None,
                legs,
            }],
            error_message: None,
        }
    }

    #[async_trait]
    impl MapsProvider for FakeMaps {
        async fn geocode(&self, address: &str, _api_key: &str) -> Result<GeocodeResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.geocodes
                .get(address)
                .cloned()
                .ok_or_else(|| DashboardError::provider(format!("unexpected address {address}")))
        }

        async fn directions(
            &self,
            origin: &GeoLocation,
            destination: &GeoLocation,
            _api_key: &str,
        ) -> Result<DirectionsResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut requests) = self.directions_requests.lock() {
                requests.push((*origin, *destination));
            }
            self.directions
                .clone()
                .ok_or_else(|| DashboardError::provider("no directions configured"))
        }
    }
}
