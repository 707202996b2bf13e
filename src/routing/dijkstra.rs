use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use super::graph::Graph;

/// Result of a shortest-path query. `Unreachable` covers both a missing
/// source/destination name and a disconnected pair; callers branch on the
/// variant instead of comparing a distance against infinity.
#[derive(Clone, Debug, PartialEq)]
pub enum ShortestPath {
    Found { meters: f64, path: Vec<String> },
    Unreachable,
}

impl ShortestPath {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

// Frontier entry. BinaryHeap is a max-heap, so the ordering is reversed to
// pop the cheapest tentative distance first; equal costs pop the
// lexicographically smallest node, keeping tie-breaks deterministic.
#[derive(Clone)]
struct Visit {
    meters: f64,
    node: String,
}

impl Ord for Visit {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .meters
            .partial_cmp(&self.meters)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Visit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Visit {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Visit {}

/// Dijkstra over non-negative edge weights. Negative weights are a
/// precondition violation and are not handled.
pub fn shortest_path(graph: &Graph, source: &str, destination: &str) -> ShortestPath {
    if !graph.contains(source) || !graph.contains(destination) {
        return ShortestPath::Unreachable;
    }

    if source == destination {
        return ShortestPath::Found {
            meters: 0.0,
            path: vec![source.to_string()],
        };
    }

    let mut best: HashMap<String, f64> = HashMap::new();
    let mut previous: HashMap<String, String> = HashMap::new();
    let mut frontier = BinaryHeap::new();

    best.insert(source.to_string(), 0.0);
    frontier.push(Visit {
        meters: 0.0,
        node: source.to_string(),
    });

    while let Some(Visit { meters, node }) = frontier.pop() {
        // the first pop of the destination carries its minimum distance
        if node == destination {
            break;
        }

        // stale entry: the node was already reached more cheaply
        if meters > best[&node] {
            continue;
        }

        for (neighbor, weight) in graph.neighbors(&node) {
            let candidate = meters + weight;

            if candidate < best.get(neighbor).copied().unwrap_or(f64::INFINITY) {
                best.insert(neighbor.to_string(), candidate);
                previous.insert(neighbor.to_string(), node.clone());
                frontier.push(Visit {
                    meters: candidate,
                    node: neighbor.to_string(),
                });
            }
        }
    }

    let total = match best.get(destination) {
        Some(meters) => *meters,
        None => return ShortestPath::Unreachable,
    };

    // walk predecessors back to the source, then reverse
    let mut path = Vec::new();
    let mut cursor = destination.to_string();

    while cursor != source {
        let parent = match previous.get(&cursor) {
            Some(parent) => parent.clone(),
            None => return ShortestPath::Unreachable,
        };
        path.push(cursor);
        cursor = parent;
    }

    path.push(cursor);
    path.reverse();

    ShortestPath::Found {
        meters: total,
        path,
    }
}

#[cfg(test)]
fn demo_graph() -> Graph {
    let mut graph = Graph::new();
    graph.add_edge("A", "B", 100.0);
    graph.add_edge("B", "C", 200.0);
    graph.add_edge("A", "C", 500.0);
    graph.add_location("D");
    graph
}

// every simple path from source to destination, by depth-first enumeration
#[cfg(test)]
fn all_path_costs(graph: &Graph, source: &str, destination: &str) -> Vec<f64> {
    fn walk(
        graph: &Graph,
        node: &str,
        destination: &str,
        visited: &mut Vec<String>,
        cost: f64,
        out: &mut Vec<f64>,
    ) {
        if node == destination {
            out.push(cost);
            return;
        }
        for (neighbor, weight) in graph.neighbors(node) {
            if visited.iter().any(|seen| seen == neighbor) {
                continue;
            }
            visited.push(neighbor.to_string());
            walk(graph, neighbor, destination, visited, cost + weight, out);
            visited.pop();
        }
    }

    let mut out = Vec::new();
    let mut visited = vec![source.to_string()];
    walk(graph, source, destination, &mut visited, 0.0, &mut out);
    out
}

#[test]
fn source_equals_destination() {
    let graph = demo_graph();

    assert_eq!(
        shortest_path(&graph, "A", "A"),
        ShortestPath::Found {
            meters: 0.0,
            path: vec!["A".to_string()],
        }
    );

    // holds even for a node with no outgoing edges
    assert_eq!(
        shortest_path(&graph, "D", "D"),
        ShortestPath::Found {
            meters: 0.0,
            path: vec!["D".to_string()],
        }
    );
}

#[test]
fn prefers_cheaper_two_hop_path() {
    let graph = demo_graph();

    assert_eq!(
        shortest_path(&graph, "A", "C"),
        ShortestPath::Found {
            meters: 300.0,
            path: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        }
    );
}

#[test]
fn disconnected_node_is_unreachable() {
    let graph = demo_graph();

    assert_eq!(shortest_path(&graph, "A", "D"), ShortestPath::Unreachable);
    assert!(!shortest_path(&graph, "A", "D").is_reachable());
    // edges are directed: nothing leads back out of C
    assert_eq!(shortest_path(&graph, "C", "A"), ShortestPath::Unreachable);
}

#[test]
fn unknown_names_are_unreachable() {
    let graph = demo_graph();

    assert_eq!(shortest_path(&graph, "A", "Z"), ShortestPath::Unreachable);
    assert_eq!(shortest_path(&graph, "Z", "A"), ShortestPath::Unreachable);
    assert_eq!(
        shortest_path(&Graph::new(), "A", "A"),
        ShortestPath::Unreachable
    );
}

#[test]
fn distance_matches_exhaustive_search() {
    let mut graph = Graph::new();
    graph.add_edge("A", "B", 120.0);
    graph.add_edge("A", "C", 90.0);
    graph.add_edge("B", "D", 60.0);
    graph.add_edge("C", "B", 20.0);
    graph.add_edge("C", "D", 210.0);
    graph.add_edge("B", "E", 300.0);
    graph.add_edge("D", "E", 75.0);

    match shortest_path(&graph, "A", "E") {
        ShortestPath::Found { meters, path } => {
            let exhaustive = all_path_costs(&graph, "A", "E");
            let minimum = exhaustive.iter().copied().fold(f64::INFINITY, f64::min);
            assert_eq!(meters, minimum);

            // returned distance equals the sum of the returned path's edges
            let total: f64 = path
                .windows(2)
                .map(|pair| graph.edge(&pair[0], &pair[1]).unwrap())
                .sum();
            assert_eq!(meters, total);
        }
        ShortestPath::Unreachable => panic!("expected a path from A to E"),
    }
}

#[test]
fn equal_cost_paths_break_ties_deterministically() {
    let mut graph = Graph::new();
    // two routes of identical cost: via B and via C
    graph.add_edge("A", "B", 100.0);
    graph.add_edge("A", "C", 100.0);
    graph.add_edge("B", "D", 100.0);
    graph.add_edge("C", "D", 100.0);

    // lexicographically smallest frontier entry wins the tie
    assert_eq!(
        shortest_path(&graph, "A", "D"),
        ShortestPath::Found {
            meters: 200.0,
            path: vec!["A".to_string(), "B".to_string(), "D".to_string()],
        }
    );
}

#[test]
fn repeated_queries_are_identical() {
    let graph = demo_graph();

    let first = shortest_path(&graph, "A", "C");
    let second = shortest_path(&graph, "A", "C");
    assert_eq!(first, second);
}
