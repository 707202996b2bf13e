use super::Engine;

use async_trait::async_trait;

use crate::{
    api::RouteAPI,
    entities::Route,
    error::{invalid_input_error, Error},
    routing::{format_duration, shortest_path, travel_seconds, ShortestPath},
};

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn plan_route(
        &self,
        origin: String,
        destination: String,
        speed_kmh: f64,
    ) -> Result<Option<Route>, Error> {
        if !speed_kmh.is_finite() || speed_kmh <= 0.0 {
            return Err(invalid_input_error());
        }

        match shortest_path(&self.map.graph, &origin, &destination) {
            ShortestPath::Found { meters, path } => {
                let seconds = travel_seconds(meters, speed_kmh);
                let eta = format_duration(seconds);

                Ok(Some(Route::new(path, meters, seconds, eta)))
            }
            ShortestPath::Unreachable => Ok(None),
        }
    }
}

#[test]
fn plans_route_across_offline_map() {
    use crate::external::open_route_service::OpenRouteService;
    use tokio_test::block_on;

    let engine = block_on(Engine::new(OpenRouteService::offline()));

    // offline mode weighs every demo connection at 1000 m, so the best route
    // is the one with the fewest hops
    let route = block_on(engine.plan_route("India Gate".into(), "Chandni Chowk".into(), 30.0))
        .unwrap()
        .expect("demo map connects India Gate to Chandni Chowk");

    assert_eq!(
        route.path,
        vec![
            "India Gate".to_string(),
            "Connaught Place".to_string(),
            "Red Fort".to_string(),
            "Chandni Chowk".to_string(),
        ]
    );
    assert_eq!(route.meters, 3000.0);
    assert_eq!(route.kilometers(), 3.0);
    assert_eq!(route.travel_seconds, 360.0);
    assert_eq!(route.eta, "6 min");
}

#[test]
fn same_origin_and_destination_is_a_zero_route() {
    use crate::external::open_route_service::OpenRouteService;
    use tokio_test::block_on;

    let engine = block_on(Engine::new(OpenRouteService::offline()));

    let route = block_on(engine.plan_route("India Gate".into(), "India Gate".into(), 30.0))
        .unwrap()
        .expect("identity route");

    assert_eq!(route.path, vec!["India Gate".to_string()]);
    assert_eq!(route.meters, 0.0);
    assert_eq!(route.eta, "< 1 min");
}

#[test]
fn unknown_landmark_yields_no_route() {
    use crate::external::open_route_service::OpenRouteService;
    use tokio_test::block_on;

    let engine = block_on(Engine::new(OpenRouteService::offline()));

    let route =
        block_on(engine.plan_route("India Gate".into(), "Taj Mahal".into(), 30.0)).unwrap();
    assert!(route.is_none());
}

#[test]
fn rejects_non_positive_speed() {
    use crate::external::open_route_service::OpenRouteService;
    use tokio_test::block_on;

    let engine = block_on(Engine::new(OpenRouteService::offline()));

    let result = block_on(engine.plan_route("India Gate".into(), "Red Fort".into(), 0.0));
    assert!(result.is_err());

    let result = block_on(engine.plan_route("India Gate".into(), "Red Fort".into(), f64::NAN));
    assert!(result.is_err());
}
