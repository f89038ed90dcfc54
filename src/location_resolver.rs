//! Location Resolution Module
//!
//! Turns a free-text address into a [`GeoLocation`] with one geocoding call,
//! interpreting the provider status on the way.

use std::fmt;

use tracing::{debug, warn};

use crate::maps::MapsProvider;
use crate::models::GeoLocation;
use crate::{DashboardError, Result};

/// Which end of the trip an address belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressRole {
    Origin,
    Destination,
}

impl fmt::Display for AddressRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressRole::Origin => write!(f, "origin"),
            AddressRole::Destination => write!(f, "destination"),
        }
    }
}

/// Service for resolving addresses
pub struct LocationResolver;

impl LocationResolver {
    /// Resolve an address into coordinates using the first geocoding result
    pub async fn resolve_address(
        maps: &dyn MapsProvider,
        address: &str,
        role: AddressRole,
        api_key: &str,
    ) -> Result<GeoLocation> {
        debug!("Geocoding {}: {}", role, address);

        let response = maps.geocode(address, api_key).await?;

        if !response.is_ok() {
            let message = response
                .error_message
                .unwrap_or_else(|| format!("Failed to geocode {role} (status {})", response.status));
            warn!("Geocoding {} failed: {}", role, message);
            return Err(DashboardError::geocode(address, message));
        }

        let Some(first) = response.results.into_iter().next() else {
            warn!("Geocoding {} returned no results", role);
            return Err(DashboardError::geocode(
                address,
                format!("No results found for {role}"),
            ));
        };

        let location = GeoLocation::from(first.geometry.location);
        debug!(
            "Resolved {} to ({})",
            role,
            location.format_coordinates()
        );

        Ok(location)
    }
}
