//! Geocoded location model

use serde::{Deserialize, Serialize};

/// Coordinates decoded from a geocoding response
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl GeoLocation {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as the `lat,lng` pair the directions API expects
    #[must_use]
    pub fn to_query_param(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Format location as a short coordinates string for logs
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param_keeps_full_precision() {
        let location = GeoLocation::new(-23.561_414, -46.655_881);
        assert_eq!(location.to_query_param(), "-23.561414,-46.655881");
    }

    #[test]
    fn test_format_coordinates() {
        let location = GeoLocation::new(-23.434_56, -46.481_2);
        assert_eq!(location.format_coordinates(), "-23.4346, -46.4812");
    }
}
