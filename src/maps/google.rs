//! Google Maps Geocoding and Directions client

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use super::{DirectionsResponse, GeocodeResponse, MapsProvider};
use crate::Result;
use crate::config::MapsConfig;
use crate::models::GeoLocation;

/// Google Maps web services client
pub struct GoogleMapsClient {
    client: Client,
    base_url: String,
}

impl GoogleMapsClient {
    /// Create a new client on top of a shared HTTP client
    #[must_use]
    pub fn new(client: Client, config: &MapsConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, service: &str) -> String {
        format!("{}/{}/json", self.base_url, service)
    }
}

#[async_trait]
impl MapsProvider for GoogleMapsClient {
    #[instrument(skip(self, api_key))]
    async fn geocode(&self, address: &str, api_key: &str) -> Result<GeocodeResponse> {
        debug!("Calling the geocoding API");

        let response = self
            .client
            .get(self.endpoint("geocode"))
            .query(&[("address", address), ("key", api_key)])
            .send()
            .await?
            .error_for_status()?;

        let body: GeocodeResponse = response.json().await?;
        debug!(status = %body.status, results = body.results.len(), "Geocoding response");
        Ok(body)
    }

    #[instrument(skip_all, fields(from = %origin.format_coordinates(), to = %destination.format_coordinates()))]
    async fn directions(
        &self,
        origin: &GeoLocation,
        destination: &GeoLocation,
        api_key: &str,
    ) -> Result<DirectionsResponse> {
        debug!("Calling the directions API");
        let origin = origin.to_query_param();
        let destination = destination.to_query_param();

        let response = self
            .client
            .get(self.endpoint("directions"))
            .query(&[
                ("origin", origin.as_str()),
                ("destination", destination.as_str()),
                ("departure_time", "now"),
                ("traffic_model", "best_guess"),
                ("key", api_key),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: DirectionsResponse = response.json().await?;
        debug!(status = %body.status, routes = body.routes.len(), "Directions response");
        Ok(body)
    }
}
