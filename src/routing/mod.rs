mod builder;
mod dijkstra;
mod eta;
mod graph;
mod provider;

pub use builder::{CityMap, GraphBuilder};
pub use dijkstra::{shortest_path, ShortestPath};
pub use eta::{format_duration, travel_seconds};
pub use graph::Graph;
pub use provider::{Distance, DistanceProvider};
