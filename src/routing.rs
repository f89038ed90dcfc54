use tracing::{debug, instrument, warn};

use crate::maps::{Leg, MapsProvider};
use crate::models::GeoLocation;
use crate::{DashboardError, Result};

/// Travel times and distance taken from the first leg of the first route
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEstimate {
    /// Traffic-aware duration, falling back to the normal one
    pub traffic_seconds: u64,
    pub normal_seconds: u64,
    pub distance_text: String,
    pub normal_duration_text: String,
}

impl From<Leg> for RouteEstimate {
    fn from(leg: Leg) -> Self {
        let traffic_seconds = leg
            .duration_in_traffic
            .as_ref()
            .map_or(leg.duration.value, |traffic| traffic.value);

        Self {
            traffic_seconds,
            normal_seconds: leg.duration.value,
            distance_text: leg.distance.text,
            normal_duration_text: leg.duration.text,
        }
    }
}

#[instrument(skip_all)]
pub async fn get_route_estimate(
    maps: &dyn MapsProvider,
    origin: &GeoLocation,
    destination: &GeoLocation,
    api_key: &str,
) -> Result<RouteEstimate> {
    let response = maps.directions(origin, destination, api_key).await?;

    if !response.is_ok() {
        let message = response
            .error_message
            .unwrap_or_else(|| format!("Directions API returned status {}", response.status));
        warn!("Directions request failed: {}", message);
        return Err(DashboardError::directions(message));
    }

    let leg = response
        .routes
        .into_iter()
        .next()
        .and_then(|route| route.legs.into_iter().next())
        .ok_or(DashboardError::NoRouteFound)?;

    let estimate = RouteEstimate::from(leg);
    debug!(
        traffic_seconds = estimate.traffic_seconds,
        normal_seconds = estimate.normal_seconds,
        "Route estimate"
    );
    Ok(estimate)
}
