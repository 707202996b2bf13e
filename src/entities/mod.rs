mod location;
mod map;
mod route;

pub use location::{Coordinates, Location};
pub use map::MapSummary;
pub use route::Route;
