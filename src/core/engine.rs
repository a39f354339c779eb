//! OSRM routing engine client
//!
//! Speaks the `route/v1` service with GeoJSON geometries:
//!
//! ```text
//! GET {base}/route/v1/{profile}/{lon,lat;lon,lat;...}?overview=full&geometries=geojson
//! ```
//!
//! This is the only place where coordinates are swapped to and from the
//! engine's longitude-first order.

use std::time::Duration;

use log::debug;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;

use crate::core::config::EngineConfig;
use crate::core::error::{Error, Result};
use crate::core::mode::TravelMode;
use crate::core::waypoint::Waypoint;

/// Global HTTP client shared by every resolver
static GLOBAL_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .tcp_keepalive(Duration::from_secs(60))
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(8)
        .connect_timeout(Duration::from_secs(10))
        .user_agent(format!("butterfly-stitch/{}", env!("BUTTERFLY_VERSION")))
        .build()
        .expect("Failed to create HTTP client")
});

/// Body of a successful `route/v1` answer
///
/// Only the fields the stitcher needs are decoded; OSRM's `code`,
/// `waypoints`, `distance` and `duration` are ignored.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
pub struct Route {
    pub geometry: RouteGeometry,
}

/// GeoJSON LineString geometry, `[lon, lat]` pairs
#[derive(Debug, Deserialize)]
pub struct RouteGeometry {
    pub coordinates: Vec<[f64; 2]>,
}

impl RouteResponse {
    /// Geometry of the first route candidate, latitude-first
    ///
    /// `None` when the engine found no route.
    pub fn into_first_path(self) -> Option<Vec<Waypoint>> {
        self.routes.into_iter().next().map(|route| {
            route
                .geometry
                .coordinates
                .into_iter()
                .map(Waypoint::from_lon_lat)
                .collect()
        })
    }
}

/// Encode coordinates as `lon,lat;lon,lat;...`
pub fn encode_coordinates(coords: &[Waypoint]) -> String {
    coords
        .iter()
        .map(|w| {
            let [lon, lat] = w.to_lon_lat();
            format!("{lon},{lat}")
        })
        .collect::<Vec<_>>()
        .join(";")
}

/// Full request URL for one chunk
pub fn route_url(base_url: &str, mode: TravelMode, coords: &[Waypoint]) -> String {
    format!(
        "{}/route/v1/{}/{}?overview=full&geometries=geojson",
        base_url.trim_end_matches('/'),
        mode.name(),
        encode_coordinates(coords)
    )
}

/// Thin client for one configured engine
#[derive(Debug, Clone)]
pub struct EngineClient {
    config: EngineConfig,
}

impl EngineClient {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Request a route through `coords`
    ///
    /// Returns `Ok(None)` when the engine answered successfully but found no
    /// route. Non-success statuses and transport or decoding failures are
    /// errors.
    pub async fn route(&self, mode: TravelMode, coords: &[Waypoint]) -> Result<Option<Vec<Waypoint>>> {
        let url = route_url(&self.config.base_url, mode, coords);
        debug!("OSRM request URL: {url}");

        let response = GLOBAL_CLIENT
            .get(&url)
            .timeout(self.config.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::EngineStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let body: RouteResponse = response.json().await?;
        Ok(body.into_first_path())
    }
}
