mod map_api;
mod route_api;

use crate::api::API;
use crate::routing::{CityMap, DistanceProvider, GraphBuilder};

/// Serves routing queries over a city map built exactly once at startup.
/// The map is frozen after construction, so an `Engine` behind an `Arc` can
/// answer concurrent queries without locking.
pub struct Engine {
    map: CityMap,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub async fn new<P: DistanceProvider>(provider: P) -> Self {
        let map = GraphBuilder::new(provider).build_city_map().await;

        tracing::info!(
            locations = map.graph.node_count(),
            skipped = map.skipped.len(),
            "city map ready"
        );

        Self { map }
    }

    pub fn city_map(&self) -> &CityMap {
        &self.map
    }
}

impl API for Engine {}

#[test]
fn engine_builds_offline_map_once() {
    use crate::external::open_route_service::OpenRouteService;
    use tokio_test::block_on;

    let engine = block_on(Engine::new(OpenRouteService::offline()));

    assert_eq!(engine.city_map().graph.node_count(), 10);
    assert!(engine.city_map().skipped.is_empty());
}
