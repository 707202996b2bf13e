use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::{
    entities::Coordinates,
    error::{upstream_error, Error},
    routing::{Distance, DistanceProvider},
};

const DEFAULT_API_BASE: &str = "api.openrouteservice.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// offline fallback values: a fixed constant per coordinate pair, and a
// function of the two names, so builds stay reproducible without a credential
const OFFLINE_COORDINATE_METERS: f64 = 1000.0;
const OFFLINE_METERS_PER_NAME_CHAR: f64 = 500.0;

#[derive(Clone, Debug, Deserialize)]
struct GeocodeResponse {
    features: Vec<GeocodeFeature>,
}

#[derive(Clone, Debug, Deserialize)]
struct GeocodeFeature {
    geometry: GeocodeGeometry,
}

#[derive(Clone, Debug, Deserialize)]
struct GeocodeGeometry {
    // GeoJSON pair ordering: [lon, lat]
    coordinates: [f64; 2],
}

#[derive(Clone, Debug, Serialize)]
struct MatrixRequest {
    locations: Vec<[f64; 2]>,
    metrics: [&'static str; 1],
    units: &'static str,
}

#[derive(Clone, Debug, Deserialize)]
struct MatrixResponse {
    distances: Vec<Vec<Option<f64>>>,
}

/// OpenRouteService client. Without an `ORS_API_KEY` it answers the
/// deterministic offline distances instead of calling out.
#[derive(Debug)]
pub struct OpenRouteService {
    api_key: Option<String>,
    api_base: String,
    http: reqwest::Client,
}

impl OpenRouteService {
    pub fn from_env() -> Self {
        let api_key = env::var("ORS_API_KEY").ok().filter(|key| !key.is_empty());
        let api_base = env::var("ORS_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());

        match api_key {
            Some(key) => {
                tracing::info!("ORS_API_KEY loaded");
                Self::new(Some(key), api_base)
            }
            None => {
                tracing::warn!("ORS_API_KEY not set, running in offline mode");
                Self::new(None, api_base)
            }
        }
    }

    pub fn offline() -> Self {
        Self::new(None, DEFAULT_API_BASE.into())
    }

    fn new(api_key: Option<String>, api_base: String) -> Self {
        Self {
            api_key,
            api_base,
            http: reqwest::Client::new(),
        }
    }

    async fn geocode(&self, name: &str, key: &str) -> Result<Coordinates, Error> {
        let url = format!("https://{}/geocode/search", self.api_base);

        let res = self
            .http
            .get(url)
            .timeout(REQUEST_TIMEOUT)
            .query(&[("api_key", key), ("text", name)])
            .query(&[("size", 1)])
            .send()
            .await?;

        if res.status().as_u16() != 200 {
            return Err(upstream_error());
        }

        let data: GeocodeResponse = res.json().await?;
        let feature = data.features.into_iter().next().ok_or_else(upstream_error)?;
        let [longitude, latitude] = feature.geometry.coordinates;

        Ok(Coordinates {
            latitude,
            longitude,
        })
    }

    async fn matrix(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
        key: &str,
    ) -> Result<f64, Error> {
        let url = format!("https://{}/v2/matrix/driving-car", self.api_base);

        let payload = MatrixRequest {
            locations: vec![origin.lon_lat(), destination.lon_lat()],
            metrics: ["distance"],
            units: "m",
        };

        let res = self
            .http
            .post(url)
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", key)
            .json(&payload)
            .send()
            .await?;

        if res.status().as_u16() != 200 {
            return Err(upstream_error());
        }

        let data: MatrixResponse = res.json().await?;

        // a null cell means the service could not route between the points
        data.distances
            .get(0)
            .and_then(|row| row.get(1))
            .copied()
            .flatten()
            .ok_or_else(upstream_error)
    }
}

#[async_trait]
impl DistanceProvider for OpenRouteService {
    #[tracing::instrument(skip(self))]
    async fn distance_between_coordinates(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
    ) -> Distance {
        let key = match self.api_key.as_deref() {
            Some(key) => key,
            None => return Distance::Meters(OFFLINE_COORDINATE_METERS),
        };

        match self.matrix(origin, destination, key).await {
            Ok(meters) => Distance::Meters(meters),
            Err(err) => {
                tracing::warn!(code = err.code, "matrix lookup failed");
                Distance::Unreachable
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn distance_between_names(&self, origin: &str, destination: &str) -> Distance {
        let key = match self.api_key.as_deref() {
            Some(key) => key,
            None => {
                let meters = (origin.len() + destination.len()) as f64 * OFFLINE_METERS_PER_NAME_CHAR;
                return Distance::Meters(meters);
            }
        };

        let from = match self.geocode(origin, key).await {
            Ok(coordinates) => coordinates,
            Err(err) => {
                tracing::warn!(name = origin, code = err.code, "geocoding failed");
                return Distance::Unreachable;
            }
        };

        let to = match self.geocode(destination, key).await {
            Ok(coordinates) => coordinates,
            Err(err) => {
                tracing::warn!(name = destination, code = err.code, "geocoding failed");
                return Distance::Unreachable;
            }
        };

        self.distance_between_coordinates(&from, &to).await
    }
}

#[test]
fn offline_name_distance_is_deterministic() {
    use tokio_test::block_on;

    let provider = OpenRouteService::offline();

    let first = block_on(provider.distance_between_names("India Gate", "Red Fort"));
    let second = block_on(provider.distance_between_names("India Gate", "Red Fort"));

    // "India Gate" (10) + "Red Fort" (8) characters at 500 m each
    assert_eq!(first.meters(), Some(9000.0));
    assert_eq!(first, second);
}

#[test]
fn offline_coordinate_distance_is_constant() {
    use tokio_test::block_on;

    let provider = OpenRouteService::offline();
    let origin = Coordinates {
        latitude: 28.6129,
        longitude: 77.2295,
    };
    let destination = Coordinates {
        latitude: 28.6562,
        longitude: 77.2410,
    };

    let distance = block_on(provider.distance_between_coordinates(&origin, &destination));
    assert_eq!(distance, Distance::Meters(1000.0));
}
