//! Traffic lookup pipeline
//!
//! Both addresses are geocoded concurrently and joined before the single
//! directions call; the first leg of the first route is projected into a
//! [`TrafficSummary`].

use tracing::{debug, instrument};

use crate::location_resolver::{AddressRole, LocationResolver};
use crate::maps::MapsProvider;
use crate::models::{AddressQuery, TrafficSummary};
use crate::routing::get_route_estimate;
use crate::{DashboardError, Result};

/// Look up the current travel time between two free-text addresses
#[instrument(skip_all, fields(origin = %query.origin, destination = %query.destination))]
pub async fn lookup(
    maps: &dyn MapsProvider,
    query: &AddressQuery,
    api_key: &str,
) -> Result<TrafficSummary> {
    if api_key.is_empty() {
        return Err(DashboardError::missing_parameter(
            "Traffic API key is not configured",
        ));
    }
    query.validate()?;

    let (origin, destination) = futures::join!(
        LocationResolver::resolve_address(maps, &query.origin, AddressRole::Origin, api_key),
        LocationResolver::resolve_address(
            maps,
            &query.destination,
            AddressRole::Destination,
            api_key
        ),
    );
    // origin failures take precedence when both addresses fail
    let (origin, destination) = (origin?, destination?);

    let estimate = get_route_estimate(maps, &origin, &destination, api_key).await?;

    let summary = TrafficSummary::new(
        query,
        estimate.traffic_seconds,
        estimate.normal_seconds,
        estimate.distance_text,
        estimate.normal_duration_text,
    );

    debug!(
        duration = summary.duration_minutes,
        delay = summary.delay_minutes(),
        "Traffic lookup complete"
    );

    Ok(summary)
}
