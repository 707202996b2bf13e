use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{MapSummary, Route};
use crate::error::Error;

#[async_trait]
pub trait RouteAPI {
    /// Plans the shortest route between two named landmarks. `Ok(None)` means
    /// no path exists; callers branch on it rather than on an error.
    async fn plan_route(
        &self,
        origin: String,
        destination: String,
        speed_kmh: f64,
    ) -> Result<Option<Route>, Error>;
}

#[async_trait]
pub trait MapAPI {
    async fn describe_map(&self) -> Result<MapSummary, Error>;
}

pub trait API: RouteAPI + MapAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
