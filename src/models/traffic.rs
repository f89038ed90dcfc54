//! Traffic lookup input and output models

use serde::{Deserialize, Serialize};

use crate::{DashboardError, Result};

/// Free-text origin and destination supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressQuery {
    pub origin: String,
    pub destination: String,
}

impl AddressQuery {
    #[must_use]
    pub fn new<O: Into<String>, D: Into<String>>(origin: O, destination: D) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
        }
    }

    /// Reject queries with an empty origin or destination
    pub fn validate(&self) -> Result<()> {
        if self.origin.is_empty() || self.destination.is_empty() {
            return Err(DashboardError::missing_parameter(
                "Origin and destination addresses are required",
            ));
        }
        Ok(())
    }
}

/// Normalized traffic estimate returned to the dashboard
///
/// Field names on the wire match what the page reads (`duration`,
/// `normal_duration`, `distance`, `summary`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficSummary {
    /// Origin exactly as the caller typed it
    pub origin: String,
    /// Destination exactly as the caller typed it
    pub destination: String,
    /// Travel time with current traffic, in whole minutes
    #[serde(rename = "duration")]
    pub duration_minutes: u64,
    /// Travel time without traffic, in whole minutes
    #[serde(rename = "normal_duration")]
    pub normal_duration_minutes: u64,
    /// Route distance as formatted by the provider (e.g. "30 km")
    #[serde(rename = "distance")]
    pub distance_text: String,
    /// Normal duration as formatted by the provider (e.g. "50 mins")
    #[serde(rename = "summary")]
    pub summary_text: String,
}

impl TrafficSummary {
    /// Build a summary from raw second counts
    #[must_use]
    pub fn new(
        query: &AddressQuery,
        traffic_seconds: u64,
        normal_seconds: u64,
        distance_text: String,
        summary_text: String,
    ) -> Self {
        Self {
            origin: query.origin.clone(),
            destination: query.destination.clone(),
            duration_minutes: seconds_to_minutes(traffic_seconds),
            normal_duration_minutes: seconds_to_minutes(normal_seconds),
            distance_text,
            summary_text,
        }
    }

    /// Minutes lost to traffic compared to the normal duration
    #[must_use]
    pub fn delay_minutes(&self) -> u64 {
        self.duration_minutes
            .saturating_sub(self.normal_duration_minutes)
    }
}

/// Whole minutes, rounded down
#[must_use]
pub fn seconds_to_minutes(seconds: u64) -> u64 {
    seconds / 60
}
