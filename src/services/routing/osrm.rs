//! OSRM-style routing oracle client.
//!
//! Talks to a `GET /route/v1/{profile}/{lon1},{lat1};{lon2},{lat2}`-shaped
//! service (OSRM itself, or anything that speaks its wire format) per §6 of
//! the planner contract.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{degenerate_route, RoutingOracle};
use crate::error::PlannerError;
use crate::types::{Location, RouteInformation};

const METERS_PER_MILE: f64 = 1609.344;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// `OsrmClient` configuration.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL of the routing oracle (e.g. `"https://router.project-osrm.org/route/v1/driving"`).
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl OsrmConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }
}

/// Routing Oracle Client backed by an OSRM-compatible HTTP service.
pub struct OsrmClient {
    client: reqwest::Client,
    config: OsrmConfig,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to build routing oracle HTTP client");

        Self { client, config }
    }

    fn request_url(&self, origin: &Location, destination: &Location) -> String {
        format!(
            "{}/{},{};{},{}?overview=full&geometries=geojson",
            self.config.base_url.trim_end_matches('/'),
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude,
        )
    }
}

#[async_trait]
impl RoutingOracle for OsrmClient {
    async fn fetch_route(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<RouteInformation, PlannerError> {
        if let Some(degenerate) = degenerate_route(origin, destination) {
            return Ok(degenerate);
        }

        let url = self.request_url(origin, destination);
        debug!("requesting route from routing oracle: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PlannerError::RoutingUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("routing oracle returned status {}", status);
            return Err(PlannerError::RoutingUnavailable(format!(
                "oracle returned status {status}"
            )));
        }

        let body: OsrmResponse = response
            .json()
            .await
            .map_err(|e| PlannerError::RoutingMalformed(e.to_string()))?;

        let route = body
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| PlannerError::RoutingMalformed("no routes in response".to_string()))?;

        let geometry = route
            .geometry
            .coordinates
            .into_iter()
            .map(|[lon, lat]| Location::new(lat, lon))
            .collect::<Vec<_>>();

        if geometry.is_empty() {
            return Err(PlannerError::RoutingMalformed(
                "route geometry had no coordinates".to_string(),
            ));
        }

        Ok(RouteInformation {
            distance_miles: route.distance / METERS_PER_MILE,
            duration_hours: route.duration / SECONDS_PER_HOUR,
            geometry,
        })
    }

    fn name(&self) -> &str {
        "osrm"
    }
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}
