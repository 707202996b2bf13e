use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};

use crate::entities::{Coordinates, Location};

use super::graph::Graph;
use super::provider::{Distance, DistanceProvider};

const MAX_CONCURRENT_LOOKUPS: usize = 8;

// Delhi's top landmarks
#[rustfmt::skip]
const LANDMARKS: [(&str, Coordinates); 10] = [
    ("India Gate", Coordinates { latitude: 28.6129, longitude: 77.2295 }),
    ("Red Fort", Coordinates { latitude: 28.6562, longitude: 77.2410 }),
    ("Qutub Minar", Coordinates { latitude: 28.5244, longitude: 77.1855 }),
    ("Lotus Temple", Coordinates { latitude: 28.5535, longitude: 77.2588 }),
    ("Akshardham Temple", Coordinates { latitude: 28.6127, longitude: 77.2773 }),
    ("Humayun's Tomb", Coordinates { latitude: 28.5933, longitude: 77.2507 }),
    ("Jama Masjid", Coordinates { latitude: 28.6507, longitude: 77.2339 }),
    ("Connaught Place", Coordinates { latitude: 28.6333, longitude: 77.2167 }),
    ("Rashtrapati Bhavan", Coordinates { latitude: 28.6143, longitude: 77.1994 }),
    ("Chandni Chowk", Coordinates { latitude: 28.6505, longitude: 77.2285 }),
];

// road segments between landmarks
const CONNECTIONS: [(&str, &str); 12] = [
    ("India Gate", "Rashtrapati Bhavan"),
    ("India Gate", "Connaught Place"),
    ("India Gate", "Humayun's Tomb"),
    ("Red Fort", "Jama Masjid"),
    ("Red Fort", "Chandni Chowk"),
    ("Jama Masjid", "Chandni Chowk"),
    ("Connaught Place", "Red Fort"),
    ("Humayun's Tomb", "Lotus Temple"),
    ("Lotus Temple", "Akshardham Temple"),
    ("Lotus Temple", "Qutub Minar"),
    ("Rashtrapati Bhavan", "Connaught Place"),
    ("Akshardham Temple", "Red Fort"),
];

/// The built city map: the routing graph, the coordinate table for map
/// display, and the connections that had to be skipped. Frozen after
/// construction; routing queries only read it.
#[derive(Clone, Debug)]
pub struct CityMap {
    pub graph: Graph,
    pub coordinates: BTreeMap<String, Coordinates>,
    pub built_at: DateTime<Utc>,
    pub skipped: Vec<(String, String)>,
}

impl CityMap {
    pub fn location_names(&self) -> Vec<String> {
        self.coordinates.keys().cloned().collect()
    }

    pub fn locations(&self) -> Vec<Location> {
        self.coordinates
            .iter()
            .map(|(name, coordinates)| Location::new(name.clone(), *coordinates))
            .collect()
    }
}

pub struct GraphBuilder<P> {
    provider: P,
}

impl<P: DistanceProvider> GraphBuilder<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Builds the demonstration graph of Delhi landmarks, resolving every
    /// declared connection through the distance provider. Connections the
    /// provider cannot resolve are skipped in both directions; construction
    /// itself never fails.
    #[tracing::instrument(skip(self))]
    pub async fn build_city_map(&self) -> CityMap {
        let coordinates: BTreeMap<String, Coordinates> = LANDMARKS
            .iter()
            .map(|(name, coords)| (name.to_string(), *coords))
            .collect();

        let mut graph = Graph::new();
        for (name, _) in LANDMARKS {
            graph.add_location(name);
        }

        // one lookup per declared connection; bounded fan-out, results in
        // declaration order
        let lookups = CONNECTIONS.iter().map(|&(origin, destination)| {
            let from = coordinates[origin];
            let to = coordinates[destination];
            let provider = &self.provider;
            async move {
                let distance = provider.distance_between_coordinates(&from, &to).await;
                (origin, destination, distance)
            }
        });

        let resolved: Vec<_> = stream::iter(lookups)
            .buffered(MAX_CONCURRENT_LOOKUPS)
            .collect()
            .await;

        let mut skipped = Vec::new();

        for (origin, destination, distance) in resolved {
            match distance {
                // the demo table treats every connection as symmetric
                Distance::Meters(meters) => {
                    graph.add_edge(origin, destination, meters);
                    graph.add_edge(destination, origin, meters);
                }
                Distance::Unreachable => {
                    tracing::warn!(origin, destination, "no road found, connection skipped");
                    skipped.push((origin.to_string(), destination.to_string()));
                }
            }
        }

        CityMap {
            graph,
            coordinates,
            built_at: Utc::now(),
            skipped,
        }
    }

    /// Adds a single connection by place name, resolving each direction
    /// separately so asymmetric road distances survive. Directions the
    /// provider cannot resolve are skipped.
    #[tracing::instrument(skip(self, graph))]
    pub async fn connect(&self, graph: &mut Graph, origin: &str, destination: &str, one_way: bool) {
        self.connect_directed(graph, origin, destination).await;

        if !one_way {
            self.connect_directed(graph, destination, origin).await;
        }
    }

    async fn connect_directed(&self, graph: &mut Graph, origin: &str, destination: &str) {
        match self.provider.distance_between_names(origin, destination).await {
            Distance::Meters(meters) => graph.add_edge(origin, destination, meters),
            Distance::Unreachable => {
                tracing::warn!(origin, destination, "no road found, edge skipped")
            }
        }
    }
}

#[test]
fn build_city_map_installs_symmetric_edges() {
    use crate::external::open_route_service::OpenRouteService;
    use tokio_test::block_on;

    let builder = GraphBuilder::new(OpenRouteService::offline());
    let map = block_on(builder.build_city_map());

    assert_eq!(map.graph.node_count(), 10);
    assert!(map.skipped.is_empty());

    // offline mode resolves every coordinate pair to the same constant
    assert_eq!(map.graph.edge("India Gate", "Connaught Place"), Some(1000.0));
    assert_eq!(map.graph.edge("Connaught Place", "India Gate"), Some(1000.0));
    assert_eq!(map.graph.edge("India Gate", "Red Fort"), None);
}

#[test]
fn offline_builds_are_reproducible() {
    use crate::external::open_route_service::OpenRouteService;
    use tokio_test::block_on;

    let first = block_on(GraphBuilder::new(OpenRouteService::offline()).build_city_map());
    let second = block_on(GraphBuilder::new(OpenRouteService::offline()).build_city_map());

    assert_eq!(first.graph, second.graph);
    assert_eq!(first.location_names(), second.location_names());
}

#[test]
fn unreachable_connections_are_skipped_entirely() {
    use async_trait::async_trait;
    use tokio_test::block_on;

    struct Roadless;

    #[async_trait]
    impl DistanceProvider for Roadless {
        async fn distance_between_coordinates(
            &self,
            origin: &Coordinates,
            _destination: &Coordinates,
        ) -> Distance {
            // sever every connection leaving India Gate
            if origin.longitude == 77.2295 {
                Distance::Unreachable
            } else {
                Distance::Meters(500.0)
            }
        }

        async fn distance_between_names(&self, _origin: &str, _destination: &str) -> Distance {
            Distance::Unreachable
        }
    }

    let map = block_on(GraphBuilder::new(Roadless).build_city_map());

    let expected: Vec<(String, String)> = vec![
        ("India Gate".into(), "Rashtrapati Bhavan".into()),
        ("India Gate".into(), "Connaught Place".into()),
        ("India Gate".into(), "Humayun's Tomb".into()),
    ];
    assert_eq!(map.skipped, expected);

    // no edge in either direction for a skipped connection
    assert_eq!(map.graph.edge("India Gate", "Connaught Place"), None);
    assert_eq!(map.graph.edge("Connaught Place", "India Gate"), None);

    // the landmark itself stays registered, it is just disconnected
    assert!(map.graph.contains("India Gate"));
    assert_eq!(map.graph.neighbors("India Gate").count(), 0);
}

#[test]
fn connect_preserves_asymmetric_distances() {
    use async_trait::async_trait;
    use tokio_test::block_on;

    struct ByOriginLength;

    #[async_trait]
    impl DistanceProvider for ByOriginLength {
        async fn distance_between_coordinates(
            &self,
            _origin: &Coordinates,
            _destination: &Coordinates,
        ) -> Distance {
            Distance::Unreachable
        }

        async fn distance_between_names(&self, origin: &str, _destination: &str) -> Distance {
            Distance::Meters(origin.len() as f64 * 1000.0)
        }
    }

    let builder = GraphBuilder::new(ByOriginLength);
    let mut graph = Graph::new();

    block_on(builder.connect(&mut graph, "Ab", "Cdef", false));
    assert_eq!(graph.edge("Ab", "Cdef"), Some(2000.0));
    assert_eq!(graph.edge("Cdef", "Ab"), Some(4000.0));

    let mut one_way = Graph::new();
    block_on(builder.connect(&mut one_way, "Ab", "Cdef", true));
    assert_eq!(one_way.edge("Ab", "Cdef"), Some(2000.0));
    assert_eq!(one_way.edge("Cdef", "Ab"), None);
}
