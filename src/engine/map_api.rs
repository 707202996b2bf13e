use super::Engine;

use async_trait::async_trait;

use crate::{api::MapAPI, entities::MapSummary, error::Error};

#[async_trait]
impl MapAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn describe_map(&self) -> Result<MapSummary, Error> {
        Ok(MapSummary {
            built_at: self.map.built_at,
            locations: self.map.locations(),
        })
    }
}

#[test]
fn describes_map_with_sorted_locations() {
    use crate::external::open_route_service::OpenRouteService;
    use tokio_test::block_on;

    let engine = block_on(Engine::new(OpenRouteService::offline()));
    let summary = block_on(engine.describe_map()).unwrap();

    assert_eq!(summary.locations.len(), 10);

    let names: Vec<&str> = summary
        .locations
        .iter()
        .map(|location| location.name.as_str())
        .collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert_eq!(names.first(), Some(&"Akshardham Temple"));
}
