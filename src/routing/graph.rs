use std::collections::BTreeMap;

/// Weighted directed graph keyed by location name. Weights are road
/// distances in meters. BTreeMap keeps neighbor iteration lexicographic,
/// which the search relies on for deterministic tie-breaking.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
    adjacency: BTreeMap<String, BTreeMap<String, f64>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node. Idempotent.
    pub fn add_location(&mut self, name: &str) {
        self.adjacency.entry(name.to_string()).or_default();
    }

    /// Sets the weight of the directed edge origin -> destination, registering
    /// both endpoints if absent. Overwriting an existing edge replaces its
    /// weight. Weights must be finite and non-negative.
    pub fn add_edge(&mut self, origin: &str, destination: &str, meters: f64) {
        debug_assert!(meters.is_finite() && meters >= 0.0);

        self.add_location(destination);
        self.adjacency
            .entry(origin.to_string())
            .or_default()
            .insert(destination.to_string(), meters);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.adjacency.contains_key(name)
    }

    /// Outgoing edges of a node, in lexicographic neighbor order. Empty for
    /// unknown nodes; use `contains` when that distinction matters.
    pub fn neighbors<'a>(&'a self, name: &str) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        self.adjacency
            .get(name)
            .into_iter()
            .flatten()
            .map(|(neighbor, meters)| (neighbor.as_str(), *meters))
    }

    pub fn edge(&self, origin: &str, destination: &str) -> Option<f64> {
        self.adjacency
            .get(origin)
            .and_then(|neighbors| neighbors.get(destination))
            .copied()
    }

    pub fn node_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }
}

#[test]
fn add_edge_registers_endpoints() {
    let mut graph = Graph::new();
    graph.add_edge("India Gate", "Red Fort", 5200.0);

    assert!(graph.contains("India Gate"));
    assert!(graph.contains("Red Fort"));
    assert_eq!(graph.edge("India Gate", "Red Fort"), Some(5200.0));
    assert_eq!(graph.edge("Red Fort", "India Gate"), None);
}

#[test]
fn add_edge_overwrites_existing_weight() {
    let mut graph = Graph::new();
    graph.add_edge("A", "B", 100.0);
    graph.add_edge("A", "B", 250.0);

    assert_eq!(graph.edge("A", "B"), Some(250.0));
    assert_eq!(graph.neighbors("A").count(), 1);
}

#[test]
fn add_location_is_idempotent() {
    let mut graph = Graph::new();
    graph.add_location("A");
    graph.add_location("A");

    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.neighbors("A").count(), 0);
}

#[test]
fn neighbors_of_unknown_node_is_empty() {
    let graph = Graph::new();

    assert_eq!(graph.neighbors("nowhere").count(), 0);
    assert!(!graph.contains("nowhere"));
}

#[test]
fn node_names_are_sorted() {
    let mut graph = Graph::new();
    graph.add_location("Qutub Minar");
    graph.add_location("India Gate");
    graph.add_location("Lotus Temple");

    let names: Vec<&str> = graph.node_names().collect();
    assert_eq!(names, vec!["India Gate", "Lotus Temple", "Qutub Minar"]);
}
